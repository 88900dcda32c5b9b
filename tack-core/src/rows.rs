use crate::{Error, Latch, Record, Row, RowSet, RowStream, ScanTarget, TableMapping, Value};
use futures::StreamExt;
use std::sync::Arc;

/// Cursor over the rows of a query run through an [`Operation`](crate::Operation).
///
/// Once the operation is in error the cursor yields nothing and scanning does nothing.
pub struct Rows<'o> {
    labels: Arc<[String]>,
    stream: Option<RowStream>,
    current: Option<Row>,
    latch: &'o Latch,
}

impl<'o> Rows<'o> {
    pub(crate) fn new(result: Option<RowSet>, latch: &'o Latch) -> Self {
        let (labels, stream) = match result {
            Some(RowSet { labels, rows }) => (labels, Some(rows)),
            None => (Arc::from([]), None),
        };
        Self {
            labels,
            stream,
            current: None,
            latch,
        }
    }

    pub(crate) fn empty(latch: &'o Latch) -> Self {
        Self::new(None, latch)
    }

    pub fn error(&self) -> Option<&'o Error> {
        self.latch.error()
    }

    /// Advances to the next row, false when there are no more rows or the operation is in error.
    pub async fn next(&mut self) -> bool {
        if self.latch.is_set() {
            return false;
        }
        let Some(stream) = self.stream.as_mut() else {
            return false;
        };
        let next = stream.next().await;
        match next {
            Some(Ok(row)) => {
                self.current = Some(row);
                true
            }
            Some(Err(e)) => {
                self.latch.set(e);
                self.close();
                false
            }
            None => {
                self.close();
                false
            }
        }
    }

    /// Column labels of the result, available before the first row and also when there are no
    /// rows. Empty once in error.
    pub fn columns(&self) -> &[String] {
        if self.latch.is_set() {
            return &[];
        }
        &self.labels
    }

    /// Cells of the current row, empty before the first row or once in error.
    pub fn values(&self) -> &[Value] {
        match &self.current {
            Some(row) if !self.latch.is_set() => &row.values[..],
            _ => &[],
        }
    }

    pub fn row(&self) -> Option<&Row> {
        self.current.as_ref().filter(|_| !self.latch.is_set())
    }

    /// Scans the cells of the current row into `targets`, one target per column.
    pub fn scan(&mut self, targets: &mut [&mut dyn ScanTarget]) {
        if self.latch.is_set() {
            return;
        }
        let Some(row) = &self.current else {
            self.latch.set(Error::msg("scan called without a current row"));
            return;
        };
        if row.values.len() != targets.len() {
            self.latch.set(Error::msg(format!(
                "expected {} destination arguments in scan, not {}",
                row.values.len(),
                targets.len()
            )));
            return;
        }
        for (target, value) in targets.iter_mut().zip(&row.values) {
            target.scan(value);
        }
    }

    /// Scans the current row into `record`, the columns must follow the binding order of
    /// `mapping` (as in any statement rendered from it).
    pub fn scan_record<R: Record>(&mut self, mapping: &TableMapping<R>, record: &mut R) {
        if self.latch.is_set() {
            return;
        }
        let Some(row) = &self.current else {
            self.latch.set(Error::msg("scan called without a current row"));
            return;
        };
        self.latch.absorb(mapping.scan(record, &row.values));
    }

    pub fn close(&mut self) {
        self.stream = None;
        self.current = None;
    }
}
