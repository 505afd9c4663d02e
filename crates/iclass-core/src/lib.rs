//! iClass QR Core
//!
//! Pure, stateless building blocks of the sign-in helper.
//!
//! # Core Concepts
//!
//! - [`Identifier`]: canonical course code, numeric or 32-hex UUID form
//! - [`SignInUrlBuilder`]: time-stamped sign-in URL for either backend
//! - [`share`]: printable share codes for lists of [`SavedItem`]
//! - [`saved_set`]: save/add/edit/delete/merge over a caller-owned list
//! - [`link`]: `?id=` and `?share=` launch links
//!
//! # Example
//!
//! ```rust
//! use iclass_core::{share, FixedClock, Identifier, SavedItem, SignInUrlBuilder};
//!
//! let id = Identifier::normalize(" 123-45 ");
//! let builder = SignInUrlBuilder::with_clock(FixedClock::at(1_000));
//! assert!(builder.build(&id, 10).ends_with("courseSchedId=12345&timestamp=11000"));
//!
//! let code = share::encode(&[SavedItem::new(id, "Physics", 0)]);
//! assert_eq!(share::decode(&code).len(), 1);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod clock;
pub mod error;
pub mod identifier;
pub mod link;
pub mod saved_set;
pub mod share;
pub mod signin;
pub mod types;

// Re-exports
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{IdentifierError, LinkError, SavedSetError, ShareError};
pub use identifier::{Identifier, IdentifierKind};
pub use link::{direct_link, extract_share_code, share_link, LaunchOutcome, LaunchParams};
pub use saved_set::MergeOutcome;
pub use signin::{
    build_sign_in_url, SignInUrlBuilder, NUMERIC_SIGN_IN_ENDPOINT, UUID_SIGN_IN_ENDPOINT,
};
pub use types::{SavedItem, ShareData};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with iClass QR core
    pub use crate::{
        share, Clock, Identifier, IdentifierKind, SavedItem, SignInUrlBuilder, SystemClock,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
