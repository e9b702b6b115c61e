use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("column spec is missing required field `{field}`")]
    MissingColumn { field: &'static str },
    #[error("column spec must be a JSON object of column indices")]
    MalformedColumnSpec(#[from] serde_json::Error),
    #[error("line {line}: field `{field}` expects column {index} but the row has {cells} cells")]
    RowShape {
        line: u64,
        field: String,
        index: usize,
        cells: usize,
    },
    #[error("line {line}: cannot parse date {raw:?}, expected MM/DD/YYYY")]
    DateParse { line: u64, raw: String },
    #[error("line {line}: amount {raw:?} is not a decimal number")]
    InvalidAmount { line: u64, raw: String },
    #[error("output format `{0}` is not supported")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
