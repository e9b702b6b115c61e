use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A transaction after its row went through the column spec.
///
/// `date` keeps the text exactly as it appeared in the statement, while
/// `posted_on` is the parsed calendar date used for ordering and JSON output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub line: u64,
    pub posted_on: NaiveDate,
    pub date: String,
    pub name: String,
    pub amount: Decimal,
    pub check_number: Option<String>,
    pub extra: BTreeMap<String, String>,
}
