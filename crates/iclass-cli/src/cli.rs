//! `iclass-qr` argument definitions

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .allow_hyphen_values(true)
        .help("Course identifier, numeric or 32-hex")
}

fn offset_arg() -> Arg {
    Arg::new("offset")
        .long("offset")
        .short('o')
        .default_value("0")
        .allow_negative_numbers(true)
        .value_parser(value_parser!(i64))
        .help("Seconds added to the current time")
}

fn index_arg() -> Arg {
    Arg::new("index")
        .required(true)
        .value_parser(value_parser!(usize))
        .help("Position in `list`, starting at 0")
}

fn label_arg(required: bool) -> Arg {
    Arg::new("label")
        .long("label")
        .short('l')
        .required(required)
        .help("Display label")
}

/// Full command tree
#[must_use]
pub fn command() -> Command {
    Command::new("iclass-qr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Time-stamped iClass sign-in QR codes")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML config file (default: $ICLASS_QR_CONFIG)"),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .global(true)
                .value_parser(["en", "zh"])
                .help("Message language"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("url")
                .about("Print the sign-in URL")
                .arg(id_arg())
                .arg(offset_arg()),
        )
        .subcommand(
            Command::new("show")
                .about("Render the sign-in QR code in the terminal")
                .arg(id_arg())
                .arg(offset_arg())
                .arg(
                    Arg::new("svg")
                        .long("svg")
                        .value_parser(value_parser!(PathBuf))
                        .help("Also write the code as SVG"),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Re-render the QR code until Ctrl-C")
                .arg(id_arg())
                .arg(
                    Arg::new("interval")
                        .long("interval")
                        .value_parser(value_parser!(u64).range(1..))
                        .help("Seconds between refreshes"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write QR images for several time offsets")
                .arg(id_arg())
                .arg(
                    Arg::new("dir")
                        .long("dir")
                        .short('d')
                        .default_value(".")
                        .value_parser(value_parser!(PathBuf))
                        .help("Output directory"),
                )
                .arg(
                    Arg::new("offsets")
                        .long("offsets")
                        .value_delimiter(',')
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i64))
                        .help("Offsets in seconds, e.g. 0,5,10"),
                ),
        )
        .subcommand(
            Command::new("scan")
                .about("Read an identifier from a QR code image")
                .arg(
                    Arg::new("image")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(Command::new("list").about("List saved items"))
        .subcommand(
            Command::new("save")
                .about("Save an identifier, rejecting duplicates")
                .arg(id_arg())
                .arg(label_arg(true)),
        )
        .subcommand(
            Command::new("add")
                .about("Add an item at the top of the list")
                .arg(id_arg())
                .arg(label_arg(true)),
        )
        .subcommand(
            Command::new("edit")
                .about("Change a saved item")
                .arg(index_arg())
                .arg(
                    Arg::new("id")
                        .long("id")
                        .allow_hyphen_values(true)
                        .help("New identifier"),
                )
                .arg(label_arg(false)),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a saved item")
                .arg(index_arg()),
        )
        .subcommand(Command::new("share").about("Print a link sharing every saved item"))
        .subcommand(
            Command::new("link")
                .about("Print a link opening the app with an identifier")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("import")
                .about("Import a share code or share link")
                .arg(Arg::new("code").required(true)),
        )
        .subcommand(
            Command::new("open")
                .about("Process an app launch link")
                .arg(Arg::new("url").required(true)),
        )
}
