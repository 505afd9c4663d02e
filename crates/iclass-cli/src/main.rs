//! `iclass-qr` binary

use anyhow::{Context, Result};
use clap::ArgMatches;
use iclass_cli::{command, App, AppConfig, Language, Message};
use iclass_core::Clock;
use iclass_scan::{ImageSource, RqrrDecoder};
use iclass_store::{JsonFileStore, SavedItemStore};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<AppConfig> {
    let path = matches.get_one::<PathBuf>("config");
    let mut config = AppConfig::load(path.map(PathBuf::as_path))?;
    if let Some(lang) = matches.get_one::<String>("lang") {
        config.language = lang.parse::<Language>().map_err(anyhow::Error::msg)?;
    }
    Ok(config)
}

fn arg<'a>(args: &'a ArgMatches, name: &str) -> &'a str {
    args.get_one::<String>(name).map_or("", String::as_str)
}

fn offset(args: &ArgMatches) -> i64 {
    args.get_one::<i64>("offset").copied().unwrap_or(0)
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = command().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let config = load_config(&matches)?;
    let store = JsonFileStore::new(config.storage_file());
    tracing::debug!("saved items at {}", store.path().display());
    let app = App::new(config, store);

    match matches.subcommand() {
        Some(("url", args)) => {
            println!("{}", app.sign_in_url(arg(args, "id"), offset(args))?);
        }
        Some(("show", args)) => {
            let qr = app.render(arg(args, "id"), offset(args))?;
            println!("{}", qr.to_terminal());
            println!("{}", qr.url());
            if let Some(path) = args.get_one::<PathBuf>("svg") {
                std::fs::write(path, qr.to_svg(256))
                    .with_context(|| format!("writing {}", path.display()))?;
            }
        }
        Some(("watch", args)) => {
            let secs = args
                .get_one::<u64>("interval")
                .copied()
                .unwrap_or(app.config().refresh_interval_secs);
            watch(&app, arg(args, "id"), secs).await?;
        }
        Some(("export", args)) => {
            let dir = args
                .get_one::<PathBuf>("dir")
                .map_or_else(|| PathBuf::from("."), Clone::clone);
            let offsets: Vec<i64> = args
                .get_many::<i64>("offsets")
                .map(|values| values.copied().collect())
                .unwrap_or_default();
            let written = app.export(arg(args, "id"), &dir, &offsets)?;
            for code in &written {
                println!("{}", code.path.display());
            }
            println!("{}", app.text(&Message::Exported(written.len())));
        }
        Some(("scan", args)) => {
            let path = args
                .get_one::<PathBuf>("image")
                .map_or_else(PathBuf::new, Clone::clone);
            let id = app.scan(&RqrrDecoder::new(), &ImageSource::path(path)).await?;
            println!("{id}");
        }
        Some(("list", _)) => print_list(&app),
        Some(("save", args)) => {
            let item = app.save(arg(args, "id"), arg(args, "label"))?;
            println!("{}", app.text(&Message::Saved(item.label)));
        }
        Some(("add", args)) => {
            let item = app.add(arg(args, "id"), arg(args, "label"))?;
            println!("{}", app.text(&Message::Saved(item.label)));
        }
        Some(("edit", args)) => {
            let index = args.get_one::<usize>("index").copied().unwrap_or_default();
            let item = app.edit(
                index,
                args.get_one::<String>("id").map(String::as_str),
                args.get_one::<String>("label").map(String::as_str),
            )?;
            println!("{index}. {}  {}", item.label, item.id);
        }
        Some(("delete", args)) => {
            let index = args.get_one::<usize>("index").copied().unwrap_or_default();
            let item = app.delete(index)?;
            println!("{}  {}", item.label, item.id);
        }
        Some(("share", _)) => {
            println!("{}", app.text(&Message::ShareLink));
            println!("{}", app.share_link()?);
        }
        Some(("link", args)) => {
            println!("{}", app.direct_link(arg(args, "id"))?);
        }
        Some(("import", args)) => {
            let report = app.import(arg(args, "code"));
            println!("{}", app.import_message(&report));
        }
        Some(("open", args)) => {
            let outcome = app.open(arg(args, "url"))?;
            if outcome.imported > 0 {
                println!("{}", app.text(&Message::Imported(outcome.imported)));
            }
            if let Some(id) = outcome.prefill {
                let qr = app.render(id.as_str(), 0)?;
                println!("{}", qr.to_terminal());
                println!("{}", qr.url());
            }
        }
        _ => {}
    }
    Ok(())
}

fn print_list<S: SavedItemStore, C: Clock>(app: &App<S, C>) {
    let items = app.list();
    if items.is_empty() {
        println!("{}", app.text(&Message::NoSavedTags));
        return;
    }
    for (index, item) in items.iter().enumerate() {
        println!("{index}. {}  {} ({})", item.label, item.id, item.id.kind());
    }
}

async fn watch<S: SavedItemStore, C: Clock>(app: &App<S, C>, raw: &str, secs: u64) -> Result<()> {
    let id = app.identifier(raw)?;
    let mut ticker = tokio::time::interval(Duration::from_secs(secs));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let qr = app.render(id.as_str(), 0)?;
                // Clear screen and home the cursor.
                print!("\x1b[2J\x1b[H");
                println!("{}", qr.to_terminal());
                println!("{}", qr.url());
                println!("{}", app.text(&Message::AutoRefreshing(secs)));
            }
            _ = &mut ctrl_c => {
                tracing::debug!("watch stopped");
                break;
            }
        }
    }
    Ok(())
}
