use thiserror::Error;

use crate::writer::WriterState;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read or write transactions")]
    FileError(#[from] std::io::Error),
    #[error("could not parse CSV rows")]
    CsvError(#[from] csv::Error),
    #[error("could not serialize JSON output")]
    JsonError(#[from] serde_json::Error),
    #[error("cannot {operation} a writer that is {state}")]
    WriterState {
        operation: &'static str,
        state: WriterState,
    },
    #[error(transparent)]
    BusinessError(#[from] crate::domain::error::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
