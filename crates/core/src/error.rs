use log::error;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Terminal IO error: {}", _0)]
    Io(#[from] std::io::Error),

    #[error("Offset {} is out of range for a buffer of length {}", .offset, .len)]
    OutOfRange { offset: usize, len: usize },

    #[error("Error {} theme file at `{}`: {}", .action, .path, .original)]
    Yaml {
        action: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with theme file at path `{}`: {}", .path, .original)]
    ConfigIo {
        path: String,
        original: std::io::Error,
    },

    #[error("For a color, only one of `rgb`, `ansi` or `name` should be defined.")]
    MultipleColorTypes,

    #[error("Unknown color name: \"{}\"", _0)]
    UnknownColorName(String),

    #[error(
        "A bullet of width {} does not fit a window of width {}",
        .bullet_width,
        .window_width
    )]
    LayoutTooNarrow {
        bullet_width: usize,
        window_width: usize,
    },

    #[error("Unbalanced quotes in input: {}", _0)]
    UnbalancedQuotes(String),
}

impl Error {
    pub fn out_of_range(offset: usize, len: usize) -> Self {
        error!("Buffer offset {offset} requested with length {len}");
        Self::OutOfRange { offset, len }
    }

    pub fn yaml_error(action: String, path: String, original: serde_yaml::Error) -> Self {
        Self::Yaml {
            action,
            path,
            original,
        }
    }

    pub fn config_io_error(path: String, original: std::io::Error) -> Self {
        Self::ConfigIo { path, original }
    }
}
