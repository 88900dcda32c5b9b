use crate::{Error, Result};
use std::sync::OnceLock;

/// The sticky first error of an operation.
///
/// Only the first error is kept, later ones are logged and dropped. Clearing it requires
/// exclusive access, so nothing that observed the error can outlive the reset.
#[derive(Default, Debug)]
pub struct Latch {
    error: OnceLock<Error>,
}

impl Latch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.get()
    }

    pub fn is_set(&self) -> bool {
        self.error.get().is_some()
    }

    pub fn set(&self, error: impl Into<Error>) {
        let error = error.into();
        if let Some(first) = self.error.get() {
            log::debug!("Dropping `{:#}`, the operation already halted on `{:#}`", error, first);
            return;
        }
        log::warn!("Operation halted: {:#}", error);
        let _ = self.error.set(error);
    }

    /// Latches the error of `result`, if any, and returns its value otherwise.
    pub fn absorb<T>(&self, result: Result<T>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.set(e);
                None
            }
        }
    }

    pub fn take(&mut self) -> Option<Error> {
        self.error.take()
    }
}
