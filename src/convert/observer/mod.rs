use std::path::Path;

use crate::{
    domain::{batch::DateSpan, transaction::Transaction},
    writer::format_amount,
};

/// Receives progress events from a conversion.
pub trait Observer {
    fn batch_read(&self, rows: usize, span: Option<DateSpan>);

    /// The statement had a header but no transactions.
    fn empty_batch(&self, input: &str);

    fn backup_written(&self, path: &Path);

    fn output_opened(&self, destination: &str);

    /// Called before each record is handed to the writer; `index` starts at 1.
    fn record_written(&self, index: usize, total: usize, transaction: &Transaction);
}

/// Sends events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn batch_read(&self, rows: usize, span: Option<DateSpan>) {
        match span {
            Some(span) => tracing::info!(rows, start = %span.start, end = %span.end, "read statement"),
            None => tracing::info!(rows, "read statement"),
        }
    }

    fn empty_batch(&self, input: &str) {
        tracing::warn!("no transactions in {input}, nothing to convert");
    }

    fn backup_written(&self, path: &Path) {
        tracing::info!("wrote sorted copy to {}", path.display());
    }

    fn output_opened(&self, destination: &str) {
        tracing::debug!("writing to {destination}");
    }

    fn record_written(&self, index: usize, total: usize, transaction: &Transaction) {
        tracing::debug!("converting txn {index} of {total}");
        tracing::info!(
            "writing record for [{}: {}]",
            transaction.date,
            transaction.name
        );
        tracing::debug!(
            "formatted amount [{}] as [{}]",
            transaction.amount,
            format_amount(transaction.amount)
        );
        tracing::debug!(?transaction);
    }
}
