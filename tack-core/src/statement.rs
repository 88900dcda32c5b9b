use crate::{
    Error, ExecResult, Latch, Prepared, Rows, Value,
    util::{printable_args, truncate_long},
};

/// A prepared statement owned by an [`Operation`](crate::Operation).
pub struct Stmt<'o, P: Prepared> {
    prepared: Option<P>,
    latch: &'o Latch,
}

impl<'o, P: Prepared> Stmt<'o, P> {
    pub(crate) fn new(prepared: Option<P>, latch: &'o Latch) -> Self {
        Self { prepared, latch }
    }

    pub fn error(&self) -> Option<&'o Error> {
        self.latch.error()
    }

    /// SQL of the statement, `None` when preparing it failed.
    pub fn sql(&self) -> Option<String> {
        self.prepared.as_ref().map(ToString::to_string)
    }

    pub async fn exec(&self, args: impl IntoIterator<Item = Value>) -> ExecResult<'o> {
        let Some(prepared) = self.prepared.as_ref().filter(|_| !self.latch.is_set()) else {
            return ExecResult::empty(self.latch);
        };
        let args: Vec<_> = args.into_iter().collect();
        log::debug!(
            "Executing prepared: {} {}",
            truncate_long(&prepared.to_string()),
            printable_args(&args)
        );
        let result = prepared.execute(args).await;
        ExecResult::new(self.latch.absorb(result), self.latch)
    }

    pub async fn query(&self, args: impl IntoIterator<Item = Value>) -> Rows<'o> {
        let Some(prepared) = self.prepared.as_ref().filter(|_| !self.latch.is_set()) else {
            return Rows::empty(self.latch);
        };
        let args: Vec<_> = args.into_iter().collect();
        log::debug!(
            "Querying prepared: {} {}",
            truncate_long(&prepared.to_string()),
            printable_args(&args)
        );
        let result = prepared.query(args).await;
        Rows::new(self.latch.absorb(result), self.latch)
    }

    /// Releases the statement. In error this is a no-op: the statement is just dropped.
    pub async fn close(self) {
        if self.latch.is_set() {
            return;
        }
        if let Some(prepared) = self.prepared {
            let result = prepared.close().await;
            self.latch.absorb(result);
        }
    }
}
