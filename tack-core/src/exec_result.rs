use crate::{Error, Latch, RowsAffected};

/// Result of a statement run through an [`Operation`](crate::Operation).
///
/// Reports zero for everything once the operation is in error, including when the statement
/// itself never ran.
#[derive(Debug)]
pub struct ExecResult<'o> {
    result: Option<RowsAffected>,
    latch: &'o Latch,
}

impl<'o> ExecResult<'o> {
    pub(crate) fn new(result: Option<RowsAffected>, latch: &'o Latch) -> Self {
        Self { result, latch }
    }

    pub(crate) fn empty(latch: &'o Latch) -> Self {
        Self::new(None, latch)
    }

    pub fn error(&self) -> Option<&'o Error> {
        self.latch.error()
    }

    pub fn is_err(&self) -> bool {
        self.latch.is_set()
    }

    pub fn rows_affected(&self) -> u64 {
        if self.latch.is_set() {
            return 0;
        }
        self.result.map(|v| v.rows_affected).unwrap_or_default()
    }

    pub fn last_insert_id(&self) -> i64 {
        if self.latch.is_set() {
            return 0;
        }
        match self.result {
            Some(RowsAffected {
                last_insert_id: Some(id),
                ..
            }) => id,
            Some(..) => {
                self.latch
                    .set(Error::msg("the driver did not report a last insert id"));
                0
            }
            None => 0,
        }
    }
}
