use std::io::{Read, Write};

use csv::{ReaderBuilder, Result, WriterBuilder};

use crate::domain::batch::{DatedRow, RawRow};

/// Reads a statement, splitting off its header line.
///
/// Rows are allowed to differ in length: whether a row is wide enough is
/// decided later against the column spec, which can name the missing field.
pub fn read(reader: impl Read) -> Result<(Vec<String>, Vec<RawRow>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|record| {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            Ok(RawRow::new(line, record.iter()))
        })
        .collect::<Result<_>>()?;

    Ok((header, rows))
}

/// Writes rows back out in the order given, header first.
pub fn write(header: &[String], rows: &[DatedRow], writer: impl Write) -> Result<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(writer);

    if !header.is_empty() {
        writer.write_record(header)?;
    }
    for row in rows {
        writer.write_record(&row.row.cells)?;
    }

    writer.flush()?;
    Ok(())
}
