//! Command-line front-end: decode one BMP file and report the result.

use std::path::PathBuf;
use std::process::exit;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use log::{Level, error, info};

fn create_cmd_args() -> Command {
    Command::new("bmpbuf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Decode an uncompressed BMP file into an RGB pixel buffer")
        .arg(
            Arg::new("file")
                .help("BMP file to decode")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Display debug information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .help("Display very verbose information")
                .action(ArgAction::SetTrue),
        )
}

fn setup_logger(options: &ArgMatches) {
    let log_level = if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("debug") {
        Level::Debug
    } else {
        Level::Info
    };

    simple_logger::init_with_level(log_level).unwrap();
}

fn main() {
    let options = create_cmd_args().get_matches();
    setup_logger(&options);

    // Required argument; clap already exited with a usage error if absent.
    let path = options.get_one::<PathBuf>("file").unwrap();

    match bmpbuf::decode_path(path) {
        Ok(image) => {
            info!(
                "decoded {}: {}x{} pixels, {} bytes",
                path.display(),
                image.width(),
                image.height(),
                image.as_bytes().len()
            );
        }
        Err(err) => {
            error!("could not decode {}: {err}", path.display());
            exit(1);
        }
    }
}
