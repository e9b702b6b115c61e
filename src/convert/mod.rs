//! Statement conversion from start to finish.
//!
//! [`convert`] reads the statement, sorts it, names the output after the dates
//! it covers and drives a [`TransactionWriter`] over it. Progress goes to an
//! [`Observer`] rather than straight to the log so callers can watch a run.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use crate::{
    domain::{
        account::Account,
        batch::{Batch, DateSpan},
        column::ColumnSpec,
        error::Error as DomainError,
        transaction::Transaction,
    },
    error::Result,
    writer::{Format, TransactionWriter},
};

mod observer;

pub use observer::{Observer, TracingObserver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` and `stdin` select standard input, anything else is a path.
    pub fn parse(value: &str) -> Self {
        match value {
            "-" | "stdin" => Self::Stdin,
            path => Self::File(PathBuf::from(path)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    Directory(PathBuf),
}

impl OutputTarget {
    /// `-` and `stdout` select standard output, anything else is a directory.
    pub fn parse(value: &str) -> Self {
        match value {
            "-" | "stdout" => Self::Stdout,
            dir => Self::Directory(PathBuf::from(dir)),
        }
    }

    /// Directory that receives files for this target.
    fn directory(&self) -> &Path {
        match self {
            Self::Stdout => Path::new("."),
            Self::Directory(dir) => dir,
        }
    }
}

/// Everything one run needs, validated up front.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub account: Account,
    pub input: InputSource,
    pub output: OutputTarget,
    pub format: Format,
    pub columns: ColumnSpec,
    pub backup: bool,
    pub json_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The statement had no transactions; nothing was written.
    Empty,
    Written {
        destination: Destination,
        records: usize,
        backup: Option<PathBuf>,
    },
}

pub fn convert(conversion: &Conversion, observer: &dyn Observer) -> Result<Outcome> {
    if conversion.format == Format::Json && !conversion.json_enabled {
        return Err(DomainError::UnsupportedFormat(conversion.format.to_string()).into());
    }

    let batch = match &conversion.input {
        InputSource::Stdin => read_batch(io::stdin().lock(), &conversion.columns)?,
        InputSource::File(path) => read_batch(File::open(path)?, &conversion.columns)?,
    };
    observer.batch_read(batch.len(), batch.span());

    let Some(span) = batch.span() else {
        observer.empty_batch(&conversion.input.describe());
        return Ok(Outcome::Empty);
    };
    let transactions = batch.transactions(&conversion.columns)?;

    let backup = if conversion.backup {
        let path = conversion
            .output
            .directory()
            .join(span.file_name(&conversion.account, "csv"));
        write_backup(&batch, &path)?;
        observer.backup_written(&path);
        Some(path)
    } else {
        None
    };

    let mut sink = Sink::open(&conversion.output, &span, &conversion.account, conversion.format)?;
    observer.output_opened(&sink.describe());

    let written = render(
        &mut sink,
        conversion.format,
        &conversion.account,
        &transactions,
        observer,
    );
    let destination = match written {
        Ok(()) => sink.close(),
        Err(err) => {
            sink.discard();
            return Err(err);
        }
    };

    Ok(Outcome::Written {
        destination,
        records: transactions.len(),
        backup,
    })
}

/// Reads and sorts a statement.
pub fn read_batch(reader: impl Read, columns: &ColumnSpec) -> Result<Batch> {
    let (header, rows) = crate::csv::read(reader)?;
    Ok(Batch::sort(header, rows, columns.date())?)
}

/// Writes a complete document for `transactions` to `out`.
pub fn render(
    out: impl Write,
    format: Format,
    account: &Account,
    transactions: &[Transaction],
    observer: &dyn Observer,
) -> Result<()> {
    let mut writer = TransactionWriter::new(format, out);
    writer.begin(account)?;
    for (index, transaction) in transactions.iter().enumerate() {
        observer.record_written(index + 1, transactions.len(), transaction);
        writer.write_record(transaction)?;
    }
    writer.end()
}

fn write_backup(batch: &Batch, path: &Path) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    crate::csv::write(batch.header(), batch.rows(), file)?;
    Ok(())
}

/// Where the document goes.
///
/// Files are opened here and therefore owned: they are closed when done, or
/// removed when the conversion fails half way. Standard output belongs to the
/// process and is only ever flushed.
struct Sink {
    out: Box<dyn Write>,
    path: Option<PathBuf>,
    owns_resource: bool,
}

impl Sink {
    fn open(target: &OutputTarget, span: &DateSpan, account: &Account, format: Format) -> Result<Self> {
        match target {
            OutputTarget::Stdout => Ok(Self {
                out: Box::new(io::stdout().lock()),
                path: None,
                owns_resource: false,
            }),
            OutputTarget::Directory(dir) => {
                let path = dir.join(span.file_name(account, format.extension()));
                let file = File::create(&path)?;
                Ok(Self {
                    out: Box::new(BufWriter::new(file)),
                    path: Some(path),
                    owns_resource: true,
                })
            }
        }
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "<stdout>".to_string(),
        }
    }

    /// Releases the sink after a successful run; the writer has flushed it.
    fn close(self) -> Destination {
        match (self.owns_resource, self.path) {
            (true, Some(path)) => Destination::File(path),
            _ => Destination::Stdout,
        }
    }

    fn discard(self) {
        let Self {
            out,
            path,
            owns_resource,
        } = self;
        drop(out);
        if let (true, Some(path)) = (owns_resource, path) {
            let _ = fs::remove_file(path);
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
