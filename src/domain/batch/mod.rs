use chrono::NaiveDate;
use itertools::Itertools;

use super::{
    account::Account,
    column::ColumnSpec,
    error::{Error, Result},
    transaction::Transaction,
};

/// Date layout used by the bank statements, e.g. `03/14/2024`.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// One data line of the input, as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line: u64,
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(line: u64, cells: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            line,
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Cell at `index`, or a [`Error::RowShape`] naming the field that wanted it.
    pub fn cell(&self, field: &str, index: usize) -> Result<&str> {
        self.cells
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| Error::RowShape {
                line: self.line,
                field: field.to_string(),
                index,
                cells: self.cells.len(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedRow {
    pub posted_on: NaiveDate,
    pub row: RawRow,
}

/// First and last transaction dates of a non empty batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    /// `<start>--<end>-<account>.<extension>` with ISO dates.
    pub fn file_name(&self, account: &Account, extension: &str) -> String {
        format!(
            "{}--{}-{}.{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d"),
            account.short_name(),
            extension
        )
    }
}

/// All rows of one conversion, ordered by date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    header: Vec<String>,
    rows: Vec<DatedRow>,
    span: Option<DateSpan>,
}

impl Batch {
    /// Parses the date of every row and sorts them by it.
    ///
    /// Rows sharing a date keep their input order. Any unparsable date fails
    /// the whole batch.
    pub fn sort(header: Vec<String>, rows: Vec<RawRow>, date_column: usize) -> Result<Self> {
        let rows: Vec<DatedRow> = rows
            .into_iter()
            .map(|row| {
                let raw = row.cell("date", date_column)?;
                let posted_on = parse_date(raw).ok_or_else(|| Error::DateParse {
                    line: row.line,
                    raw: raw.to_string(),
                })?;
                Ok(DatedRow { posted_on, row })
            })
            .collect::<Result<_>>()?;

        let rows: Vec<_> = rows.into_iter().sorted_by_key(|r| r.posted_on).collect();
        let span = match (rows.first(), rows.last()) {
            (Some(first), Some(last)) => Some(DateSpan {
                start: first.posted_on,
                end: last.posted_on,
            }),
            _ => None,
        };

        Ok(Self { header, rows, span })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[DatedRow] {
        &self.rows
    }

    pub fn span(&self) -> Option<DateSpan> {
        self.span
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Maps every row through `columns`, stopping at the first bad row.
    pub fn transactions(&self, columns: &ColumnSpec) -> Result<Vec<Transaction>> {
        self.rows.iter().map(|row| columns.apply(row)).collect()
    }
}

/// Parses `MM/DD/YYYY`, requiring a four digit year.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let year = raw.rsplit('/').next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}
