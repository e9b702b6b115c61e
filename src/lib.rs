//! Converts CSV bank statements into QIF (or JSON) for personal finance tools.
//!
//! ```
//! use csv2qif::{
//!     convert::{read_batch, render, TracingObserver},
//!     domain::{account::Account, column::ColumnSpec},
//!     writer::Format,
//! };
//!
//! let statement = "Date,Payee,Amount\n03/14/2024,Coffee Shop,4.50\n";
//! let columns = ColumnSpec::from_json(r#"{"date":0,"name":1,"amount":2}"#).unwrap();
//! let batch = read_batch(statement.as_bytes(), &columns).unwrap();
//! let transactions = batch.transactions(&columns).unwrap();
//!
//! let mut qif = Vec::new();
//! let account = Account::new("Assets:Checking:Joint", "Bank");
//! render(&mut qif, Format::Qif, &account, &transactions, &TracingObserver).unwrap();
//! assert!(String::from_utf8(qif).unwrap().ends_with("PCoffee Shop\nT-4.50\n^\n"));
//! ```

pub mod convert;
pub mod csv;
pub mod domain;
pub mod error;
pub mod writer;
