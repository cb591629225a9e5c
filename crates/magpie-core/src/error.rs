use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
