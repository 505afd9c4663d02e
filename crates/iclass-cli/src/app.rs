//! Command handlers
//!
//! [`App`] ties the configuration, the saved-item store and the clock
//! together. Every command reloads the saved set from the store, applies
//! one core operation and writes the result back.

use crate::config::{AppConfig, ConfigError};
use crate::i18n::Message;
use iclass_core::{
    link, saved_set, share, Clock, Identifier, LaunchOutcome, LinkError, SavedItem,
    SavedSetError, SignInUrlBuilder, SystemClock,
};
use iclass_render::{export_offsets, ExportedCode, RenderError, SignInQr};
use iclass_scan::{decode_identifier_from_image, ImageSource, QrDecoder};
use iclass_store::SavedItemStore;
use std::path::Path;
use url::Url;

/// Errors surfaced by command handlers
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Localized notice for the user
    #[error("{0}")]
    Notice(String),

    #[error(transparent)]
    SavedSet(#[from] SavedSetError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Link(#[from] LinkError),
}

/// Result of an `import`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    /// Items decoded from the code
    pub decoded: usize,
    /// Items appended to the saved set
    pub added: usize,
    /// Items skipped as already saved
    pub skipped: usize,
}

/// Application state for one invocation
pub struct App<S, C = SystemClock> {
    config: AppConfig,
    store: S,
    builder: SignInUrlBuilder<C>,
}

impl<S: SavedItemStore> App<S, SystemClock> {
    /// App on the system clock
    #[must_use]
    pub fn new(config: AppConfig, store: S) -> Self {
        Self::with_clock(config, store, SystemClock)
    }
}

impl<S: SavedItemStore, C: Clock> App<S, C> {
    #[must_use]
    pub fn with_clock(config: AppConfig, store: S, clock: C) -> Self {
        Self {
            config,
            store,
            builder: SignInUrlBuilder::with_clock(clock),
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Localized text in the configured language
    #[must_use]
    pub fn text(&self, message: &Message) -> String {
        self.config.language.text(message)
    }

    fn notice(&self, message: &Message) -> AppError {
        AppError::Notice(self.text(message))
    }

    fn now(&self) -> i64 {
        self.builder.clock().now_millis()
    }

    /// Normalize user input, rejecting anything that normalizes to nothing
    ///
    /// # Errors
    /// Returns a localized "enter an id" notice.
    pub fn identifier(&self, raw: &str) -> Result<Identifier, AppError> {
        Identifier::parse_non_empty(raw).map_err(|_| self.notice(&Message::EnterId))
    }

    /// Sign-in URL for `raw` at `offset_seconds`
    ///
    /// # Errors
    /// Returns a notice if `raw` has no identifier in it.
    pub fn sign_in_url(&self, raw: &str, offset_seconds: i64) -> Result<String, AppError> {
        let id = self.identifier(raw)?;
        Ok(self.builder.build(&id, offset_seconds))
    }

    /// QR code for the sign-in URL
    ///
    /// # Errors
    /// Returns a notice for empty input or a render error.
    pub fn render(&self, raw: &str, offset_seconds: i64) -> Result<SignInQr, AppError> {
        let id = self.identifier(raw)?;
        let url = self.builder.build(&id, offset_seconds);
        Ok(SignInQr::encode(url, id.kind())?)
    }

    /// Write one image per offset into `dir`
    ///
    /// Uses the configured offsets when `offsets` is empty.
    ///
    /// # Errors
    /// Returns a notice for empty input or the first render error.
    pub fn export(
        &self,
        raw: &str,
        dir: &Path,
        offsets: &[i64],
    ) -> Result<Vec<ExportedCode>, AppError> {
        let id = self.identifier(raw)?;
        let offsets = if offsets.is_empty() {
            self.config.download_offsets.as_slice()
        } else {
            offsets
        };
        Ok(export_offsets(
            &self.builder,
            &id,
            offsets,
            dir,
            self.config.export_format.into(),
            self.config.qr_module_px,
        )?)
    }

    /// Identifier read from an image
    ///
    /// # Errors
    /// Returns a localized "could not decode" notice when nothing usable
    /// was found.
    pub async fn scan<D>(&self, decoder: &D, image: &ImageSource) -> Result<Identifier, AppError>
    where
        D: QrDecoder + ?Sized,
    {
        decode_identifier_from_image(decoder, image)
            .await
            .identifier()
            .ok_or_else(|| self.notice(&Message::CouldNotDecode))
    }

    /// Saved items in display order
    #[must_use]
    pub fn list(&self) -> Vec<SavedItem> {
        self.store.load()
    }

    /// Save an identifier at the end of the list
    ///
    /// # Errors
    /// Returns a localized notice for a duplicate or empty id, and
    /// [`SavedSetError::EmptyLabel`] for a blank label.
    pub fn save(&self, raw: &str, label: &str) -> Result<SavedItem, AppError> {
        let id = self.identifier(raw)?;
        let items = saved_set::save_current(self.store.load(), &id, label, self.now())
            .map_err(|e| {
                if e.is_duplicate() {
                    self.notice(&Message::IdAlreadySaved)
                } else {
                    AppError::SavedSet(e)
                }
            })?;
        self.persist(items, |items| items.last())
    }

    /// Add an item at the top of the list, without a duplicate check
    ///
    /// # Errors
    /// Returns a notice for empty input or a saved-set error.
    pub fn add(&self, raw: &str, label: &str) -> Result<SavedItem, AppError> {
        self.identifier(raw)?;
        let items = saved_set::add_item(self.store.load(), raw, label, self.now())?;
        self.persist(items, |items| items.first())
    }

    /// Change the id and/or label at `index`
    ///
    /// # Errors
    /// Returns [`SavedSetError::IndexOutOfRange`] for a bad index.
    pub fn edit(
        &self,
        index: usize,
        raw_id: Option<&str>,
        label: Option<&str>,
    ) -> Result<SavedItem, AppError> {
        let mut items = self.store.load();
        if let Some(raw_id) = raw_id {
            items = saved_set::edit_id(items, index, raw_id)?;
        }
        if let Some(label) = label {
            items = saved_set::edit_label(items, index, label)?;
        }
        if raw_id.is_none() && label.is_none() {
            let len = items.len();
            if index >= len {
                return Err(SavedSetError::IndexOutOfRange { index, len }.into());
            }
        }
        self.persist(items, |items| items.get(index))
    }

    /// Delete the item at `index`, returning it
    ///
    /// # Errors
    /// Returns [`SavedSetError::IndexOutOfRange`] for a bad index.
    pub fn delete(&self, index: usize) -> Result<SavedItem, AppError> {
        let items = self.store.load();
        let len = items.len();
        let removed = items
            .get(index)
            .cloned()
            .ok_or(SavedSetError::IndexOutOfRange { index, len })?;
        let items = saved_set::remove(items, index)?;
        self.store.save(&items);
        tracing::info!("deleted saved item {}", removed.id);
        Ok(removed)
    }

    /// Link importing every saved item
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidAppUrl`] for a bad `app_url`.
    pub fn share_link(&self) -> Result<Url, AppError> {
        let app_url = self.config.parsed_app_url()?;
        Ok(link::share_link(&app_url, &self.store.load()))
    }

    /// Link opening the app with `raw` prefilled
    ///
    /// # Errors
    /// Returns a notice for empty input or a config error.
    pub fn direct_link(&self, raw: &str) -> Result<Url, AppError> {
        let id = self.identifier(raw)?;
        let app_url = self.config.parsed_app_url()?;
        Ok(link::direct_link(&app_url, &id))
    }

    /// Merge a share code, or a link carrying one, into the saved set
    ///
    /// The store is only written when something was decoded.
    pub fn import(&self, input: &str) -> ImportReport {
        let code = link::extract_share_code(input);
        let imported = share::decode(&code);
        let decoded = imported.len();
        if decoded == 0 {
            return ImportReport {
                decoded,
                added: 0,
                skipped: 0,
            };
        }
        let merge = saved_set::merge_imported(self.store.load(), imported);
        self.store.save(&merge.items);
        tracing::info!("imported {} of {} shared items", merge.added, decoded);
        ImportReport {
            decoded,
            added: merge.added,
            skipped: merge.skipped,
        }
    }

    /// Localized summary of an import
    #[must_use]
    pub fn import_message(&self, report: &ImportReport) -> String {
        if report.decoded == 0 {
            self.text(&Message::NothingImported)
        } else {
            self.text(&Message::Imported(report.decoded))
        }
    }

    /// Process an app launch link
    ///
    /// # Errors
    /// Returns [`LinkError::InvalidUrl`] if `url` does not parse.
    pub fn open(&self, url: &str) -> Result<LaunchOutcome, AppError> {
        let params = link::LaunchParams::from_url(url)?;
        let outcome = params.apply(self.store.load());
        if outcome.changed() {
            self.store.save(&outcome.merge.items);
        }
        Ok(outcome)
    }

    fn persist<F>(&self, items: Vec<SavedItem>, pick: F) -> Result<SavedItem, AppError>
    where
        F: FnOnce(&[SavedItem]) -> Option<&SavedItem>,
    {
        self.store.save(&items);
        let len = items.len();
        let item = pick(&items)
            .cloned()
            .ok_or(SavedSetError::IndexOutOfRange { index: len, len })?;
        tracing::info!("saved item {} ({})", item.id, item.label);
        Ok(item)
    }
}
