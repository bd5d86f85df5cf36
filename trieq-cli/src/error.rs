//! Errors surfaced by the command line front end.

use thiserror::Error;
use trieq_lib::engine::EngineError;
use trieq_lib::params::ParamsError;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing argument {0}")]
    MissingArgument(&'static str),

    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: String, value: String },

    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
