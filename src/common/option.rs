use crate::plot::ChartStyle;
use crate::{Result, CONFIG_ARG, IMAGE_ARG, INPUT_ARG, NO_SHOW_ARG, OUTPUT_ARG};
use clap::ArgMatches;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_FILE: &str = "input.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "output1.txt";
pub const DEFAULT_IMAGE_FILE: &str = "inputvsoutput1.png";

/// Everything one run needs, resolved from the command line.
pub struct PlotOpts {
    input: PathBuf,
    output: PathBuf,
    image: PathBuf,
    show: bool,
    style: ChartStyle,
}

impl PlotOpts {
    pub fn get_config(matches: &ArgMatches) -> Result<PlotOpts> {
        let style = match matches.value_of(CONFIG_ARG) {
            Some(path) => ChartStyle::from_file(Path::new(path))?,
            None => ChartStyle::default(),
        };

        Ok(PlotOpts {
            input: PathBuf::from(matches.value_of(INPUT_ARG).unwrap_or(DEFAULT_INPUT_FILE)),
            output: PathBuf::from(matches.value_of(OUTPUT_ARG).unwrap_or(DEFAULT_OUTPUT_FILE)),
            image: PathBuf::from(matches.value_of(IMAGE_ARG).unwrap_or(DEFAULT_IMAGE_FILE)),
            show: !matches.is_present(NO_SHOW_ARG),
            style,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn image(&self) -> &Path {
        &self.image
    }

    pub fn show(&self) -> bool {
        self.show
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }
}
