use failure::Fail;
use std::path::PathBuf;

#[derive(Debug, Fail)]
pub enum PlotErr {
    #[fail(display = "cannot read {:?}: {}", _0, _1)]
    FileIoErr(PathBuf, std::io::Error),

    #[fail(display = "line {}: {:?} is not a number", line, token)]
    ParseErr { line: usize, token: String },

    #[fail(display = "line {}: expected a time and a byte count", line)]
    MissingFieldErr { line: usize },

    #[fail(display = "invalid chart config: {}", _0)]
    ConfigErr(String),

    #[fail(display = "render failed: {}", _0)]
    RenderErr(String),

    #[fail(display = "viewer failed: {}", _0)]
    ViewerErr(String),

    #[fail(display = "{}", _0)]
    IoErr(std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlotErr>;

impl From<std::io::Error> for PlotErr {
    fn from(e: std::io::Error) -> Self {
        PlotErr::IoErr(e)
    }
}

impl From<serde_yaml::Error> for PlotErr {
    fn from(e: serde_yaml::Error) -> Self {
        PlotErr::ConfigErr(e.to_string())
    }
}
