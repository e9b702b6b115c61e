use std::{collections::BTreeMap, str::FromStr};

use rust_decimal::Decimal;

use super::{
    batch::DatedRow,
    error::{Error, Result},
    transaction::Transaction,
};

/// Column layout of the usual checking account export:
/// `Details,Posting Date,Description,Amount,Type,Balance,Check or Slip #`.
pub const DEFAULT_COLUMNS: &str = r#"{"date":1,"name":2,"amount":3,"check_number":6}"#;

/// Where each transaction field lives in an input row.
///
/// Built once from a JSON object such as `{"date":1,"name":2,"amount":3}`.
/// `date`, `name` and `amount` are required; `check_number` is optional and
/// any other key is carried along as an extra field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    date: usize,
    name: usize,
    amount: usize,
    check_number: Option<usize>,
    extra: BTreeMap<String, usize>,
}

impl ColumnSpec {
    pub fn from_json(spec: &str) -> Result<Self> {
        let fields: BTreeMap<String, usize> = serde_json::from_str(spec)?;
        Self::from_fields(fields)
    }

    pub fn from_fields(mut fields: BTreeMap<String, usize>) -> Result<Self> {
        let mut required = |field: &'static str| {
            fields
                .remove(field)
                .ok_or(Error::MissingColumn { field })
        };
        let date = required("date")?;
        let name = required("name")?;
        let amount = required("amount")?;
        let check_number = fields.remove("check_number");

        Ok(Self {
            date,
            name,
            amount,
            check_number,
            extra: fields,
        })
    }

    pub fn date(&self) -> usize {
        self.date
    }

    /// Builds the [`Transaction`] for one dated row.
    pub fn apply(&self, dated: &DatedRow) -> Result<Transaction> {
        let row = &dated.row;
        let date = row.cell("date", self.date)?.trim().to_string();
        let name = row.cell("name", self.name)?.to_string();

        let raw_amount = row.cell("amount", self.amount)?;
        let amount = Decimal::from_str(raw_amount.trim()).map_err(|_| Error::InvalidAmount {
            line: row.line,
            raw: raw_amount.to_string(),
        })?;

        let check_number = match self.check_number {
            Some(index) => Some(row.cell("check_number", index)?.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            None => None,
        };

        let extra = self
            .extra
            .iter()
            .map(|(field, &index)| Ok((field.clone(), row.cell(field, index)?.to_string())))
            .collect::<Result<_>>()?;

        Ok(Transaction {
            line: row.line,
            posted_on: dated.posted_on,
            date,
            name,
            amount,
            check_number,
            extra,
        })
    }
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            date: 1,
            name: 2,
            amount: 3,
            check_number: Some(6),
            extra: BTreeMap::new(),
        }
    }
}

impl FromStr for ColumnSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(s)
    }
}
