use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VizError>;

#[derive(Error, Debug)]
pub enum VizError {
    #[error("No contributor data files found in {}", .0.display())]
    DataNotFound(PathBuf),
    #[error("Invalid contributor data in {}: {source}", path.display())]
    DataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Count overflow: {0} exceeds the supported range")]
    CountOverflow(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VizError {
    pub fn render(msg: impl Into<String>) -> Self {
        VizError::Render(msg.into())
    }
}
