use std::path::PathBuf;

use crate::input::InputError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: InputError,
    },
    #[error("failed to parse log directive: `{0}`")]
    LogParse(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to install log subscriber: {0}")]
    LogInit(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("I/O error: `{0}`")]
    Io(#[from] std::io::Error),
    #[error("JSON error: `{0}`")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: `{0}`")]
    Csv(#[from] csv::Error),
    #[error("unknown station `{name}`; known stations: {known}")]
    UnknownStation { name: String, known: String },
    #[error("invalid scoring profile: {0}")]
    Profile(String),
}

impl Error {
    pub fn load(path: impl Into<PathBuf>, source: InputError) -> Self {
        Error::Load {
            path: path.into(),
            source,
        }
    }
}
