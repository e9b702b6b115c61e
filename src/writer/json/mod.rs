use std::io::Write;

use serde_json::{Map, Value};

use crate::{
    domain::{account::Account, transaction::Transaction},
    error::Result,
};

// `serde_json::Map` is ordered by key, so every document comes out with sorted keys.

pub(super) fn write_account(out: &mut impl Write, account: &Account) -> Result<()> {
    let document = serde_json::to_value(account)?;
    write_document(out, &document)
}

pub(super) fn write_transaction(out: &mut impl Write, transaction: &Transaction) -> Result<()> {
    let mut document: Map<String, Value> = transaction
        .extra
        .iter()
        .map(|(field, value)| (field.clone(), Value::from(value.as_str())))
        .collect();
    document.insert(
        "date".into(),
        transaction.posted_on.format("%Y-%m-%d").to_string().into(),
    );
    document.insert("name".into(), transaction.name.as_str().into());
    document.insert("amount".into(), transaction.amount.to_string().into());
    document.insert(
        "check_number".into(),
        transaction.check_number.as_deref().map_or(Value::Null, Value::from),
    );

    write_document(out, &Value::Object(document))
}

fn write_document(out: &mut impl Write, document: &Value) -> Result<()> {
    serde_json::to_writer(&mut *out, document)?;
    writeln!(out)?;
    Ok(())
}
