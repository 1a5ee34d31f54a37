use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::xtm_gen::GenError;

/// Fatal application errors; any of these ends the process
#[derive(Error, Debug)]
pub enum Error {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("Cannot read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Board generation failed: {0}")]
    Gen(#[from] GenError),
}

pub type Result<T> = std::result::Result<T, Error>;
