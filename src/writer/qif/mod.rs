use std::{
    borrow::Cow,
    io::{self, Write},
};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{account::Account, transaction::Transaction};

/// Check number line value when the statement has none.
const NO_CHECK_NUMBER: &str = "N/A";

pub(super) fn write_account(out: &mut impl Write, account: &Account) -> io::Result<()> {
    writeln!(out, "!Account")?;
    writeln!(out, "N{}", single_line(account.short_name()))?;
    writeln!(out, "T{}", single_line(&account.kind))?;
    if let Some(description) = &account.description {
        writeln!(out, "D{}", single_line(description))?;
    }
    writeln!(out, "^")?;
    writeln!(out, "!Type:{}", single_line(&account.kind))
}

pub(super) fn write_transaction(out: &mut impl Write, transaction: &Transaction) -> io::Result<()> {
    // blank cleared status: not cleared
    writeln!(out, "C")?;
    writeln!(out, "D{}", single_line(&transaction.date))?;
    writeln!(
        out,
        "N{}",
        single_line(
            transaction
                .check_number
                .as_deref()
                .unwrap_or(NO_CHECK_NUMBER)
        )
    )?;
    writeln!(out, "P{}", single_line(&transaction.name))?;
    writeln!(out, "T{}", format_amount(transaction.amount))?;
    writeln!(out, "^")
}

/// Every QIF value sits on its tag's line, so line breaks become spaces.
fn single_line(value: &str) -> Cow<'_, str> {
    if value.contains(['\r', '\n']) {
        Cow::Owned(value.replace("\r\n", " ").replace(['\r', '\n'], " "))
    } else {
        Cow::Borrowed(value)
    }
}

/// Formats a statement amount for QIF.
///
/// Statements list money leaving the account as positive, QIF wants it
/// negative, so the amount is rounded half-up to cents and then negated.
pub fn format_amount(amount: Decimal) -> String {
    let mut amount = -amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if amount.is_zero() {
        amount = Decimal::ZERO;
    }
    amount.rescale(2);
    amount.to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn amounts_are_rounded_half_up_then_negated() {
        assert_eq!(format_amount(dec!(12.345)), "-12.35");
        assert_eq!(format_amount(dec!(-12.345)), "12.35");
        assert_eq!(format_amount(dec!(12.344)), "-12.34");
        assert_eq!(format_amount(dec!(0.125)), "-0.13");
        assert_eq!(format_amount(dec!(-5)), "5.00");
        assert_eq!(format_amount(dec!(4.5)), "-4.50");
        assert_eq!(format_amount(dec!(1234567.891)), "-1234567.89");
    }

    #[test]
    fn zero_is_never_negative() {
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(0.004)), "0.00");
        assert_eq!(format_amount(dec!(-0.00)), "0.00");
    }

    #[test]
    fn account_header() {
        let mut out = Vec::new();
        write_account(&mut out, &Account::new("Assets:Checking:Joint", "Bank")).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "!Account\nNJoint\nTBank\n^\n!Type:Bank\n"
        );
    }

    #[test]
    fn account_header_with_description() {
        let account = Account::new("Liabilities:Visa", "CCard")
            .with_description(Some("Rewards card".into()));
        let mut out = Vec::new();
        write_account(&mut out, &account).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "!Account\nNVisa\nTCCard\nDRewards card\n^\n!Type:CCard\n"
        );
    }

    #[test]
    fn line_breaks_in_values_stay_on_their_tag_line() {
        let transaction = Transaction {
            line: 2,
            posted_on: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            date: "03/14/2024".into(),
            name: "Coffee\nShop\r\nDowntown".into(),
            amount: dec!(4.50),
            check_number: Some("10\r42".into()),
            extra: BTreeMap::new(),
        };
        let mut out = Vec::new();
        write_transaction(&mut out, &transaction).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "C\nD03/14/2024\nN10 42\nPCoffee Shop Downtown\nT-4.50\n^\n"
        );
    }

    #[test]
    fn line_breaks_in_account_header_are_flattened() {
        let account = Account::new("Assets:Checking\nJoint", "Bank")
            .with_description(Some("Shared\naccount".into()));
        let mut out = Vec::new();
        write_account(&mut out, &account).unwrap();

        let header = String::from_utf8(out).unwrap();
        assert_eq!(
            header,
            "!Account\nNChecking Joint\nTBank\nDShared account\n^\n!Type:Bank\n"
        );
        assert!(header
            .lines()
            .all(|line| line == "^" || line.starts_with(['!', 'N', 'T', 'D'])));
    }

    #[test]
    fn transaction_block() {
        let transaction = Transaction {
            line: 2,
            posted_on: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            date: "01/02/2024".into(),
            name: "Landlord".into(),
            amount: dec!(1200),
            check_number: Some("0".into()),
            extra: BTreeMap::from([("memo".to_string(), "ignored".to_string())]),
        };
        let mut out = Vec::new();
        write_transaction(&mut out, &transaction).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "C\nD01/02/2024\nN0\nPLandlord\nT-1200.00\n^\n"
        );
    }
}
