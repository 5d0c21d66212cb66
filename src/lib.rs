#[macro_use]
extern crate log;

mod common;
mod error;
pub mod plot;
pub mod show;

pub use common::*;
pub use error::*;

use clap::{App, Arg};

pub const INPUT_ARG: &str = "input";
pub const OUTPUT_ARG: &str = "output";
pub const IMAGE_ARG: &str = "image";
pub const CONFIG_ARG: &str = "config";
pub const NO_SHOW_ARG: &str = "no-show";

/// Command line of the `kbplot` binary.
pub fn app() -> App<'static, 'static> {
    App::new("kbplot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("plot input vs output kilobytes over time")
        .args(&[
            Arg::with_name(INPUT_ARG)
                .short("i")
                .long("input")
                .takes_value(true)
                .default_value(option::DEFAULT_INPUT_FILE),
            Arg::with_name(OUTPUT_ARG)
                .short("o")
                .long("output")
                .takes_value(true)
                .default_value(option::DEFAULT_OUTPUT_FILE),
            Arg::with_name(IMAGE_ARG)
                .long("image")
                .takes_value(true)
                .default_value(option::DEFAULT_IMAGE_FILE),
            Arg::with_name(CONFIG_ARG)
                .long("config")
                .takes_value(true)
                .help("yaml file overriding title, labels, ticks and canvas size"),
            Arg::with_name(NO_SHOW_ARG)
                .long("no-show")
                .help("save the chart without opening a viewer"),
        ])
}
