//! Output formats for converted transactions.
//!
//! Every format goes through the same three steps: [`TransactionWriter::begin`]
//! with the account, [`TransactionWriter::write_record`] once per transaction
//! and [`TransactionWriter::end`]. Calls out of that order are rejected before
//! anything is written.

use std::{fmt, io::Write, str::FromStr};

use crate::{
    domain::{account::Account, error::Error as DomainError, transaction::Transaction},
    error::{Error, Result},
};

mod json;
mod qif;

pub use qif::format_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Qif,
    Json,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Qif => "qif",
            Self::Json => "json",
        }
    }
}

impl FromStr for Format {
    type Err = DomainError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qif" => Ok(Self::Qif),
            "json" => Ok(Self::Json),
            _ => Err(DomainError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    Unopened,
    Begun,
    Ended,
}

impl fmt::Display for WriterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unopened => "not begun",
            Self::Begun => "already begun",
            Self::Ended => "already ended",
        })
    }
}

pub struct TransactionWriter<W> {
    format: Format,
    state: WriterState,
    out: W,
}

impl<W: Write> TransactionWriter<W> {
    pub fn new(format: Format, out: W) -> Self {
        Self {
            format,
            state: WriterState::Unopened,
            out,
        }
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    pub fn begin(&mut self, account: &Account) -> Result<()> {
        self.expect("begin", WriterState::Unopened)?;
        match self.format {
            Format::Qif => qif::write_account(&mut self.out, account)?,
            Format::Json => json::write_account(&mut self.out, account)?,
        }
        self.state = WriterState::Begun;
        Ok(())
    }

    pub fn write_record(&mut self, transaction: &Transaction) -> Result<()> {
        self.expect("write a record to", WriterState::Begun)?;
        match self.format {
            Format::Qif => qif::write_transaction(&mut self.out, transaction)?,
            Format::Json => json::write_transaction(&mut self.out, transaction)?,
        }
        Ok(())
    }

    pub fn end(&mut self) -> Result<()> {
        self.expect("end", WriterState::Begun)?;
        self.out.flush()?;
        self.state = WriterState::Ended;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn expect(&self, operation: &'static str, state: WriterState) -> Result<()> {
        if self.state != state {
            return Err(Error::WriterState {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }
}
