//! Request generations: late results of superseded loads are discarded.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;

/// Identifies one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic counter of issued requests. Only the newest ticket is current.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    current: AtomicU64,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every earlier one.
    pub fn advance(&self) -> LoadTicket {
        LoadTicket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the newest request.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }
}

type LoadFuture<T> = Pin<Box<dyn Future<Output = Result<Arc<T>>> + Send>>;

/// A load that has been requested (its ticket issued) but not yet run.
pub struct PendingLoad<T> {
    ticket: LoadTicket,
    path: String,
    future: LoadFuture<T>,
}

impl<T> PendingLoad<T> {
    pub(crate) fn new(ticket: LoadTicket, path: String, future: LoadFuture<T>) -> Self {
        Self {
            ticket,
            path,
            future,
        }
    }

    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    /// Resource path being loaded.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run the load to completion.
    pub async fn resolve(self) -> CompletedLoad<T> {
        CompletedLoad {
            ticket: self.ticket,
            path: self.path,
            result: self.future.await,
        }
    }
}

impl<T> fmt::Debug for PendingLoad<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingLoad")
            .field("ticket", &self.ticket)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// A finished load, still carrying the ticket it was issued under.
#[derive(Debug)]
pub struct CompletedLoad<T> {
    pub ticket: LoadTicket,
    pub path: String,
    pub result: Result<Arc<T>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_only_newest_ticket_is_current() {
        let generation = RequestGeneration::new();
        let first = generation.advance();
        assert!(generation.is_current(first));

        let second = generation.advance();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert!(first < second);
    }

    #[test]
    fn test_resolve_keeps_ticket_and_path() {
        let generation = RequestGeneration::new();
        let ticket = generation.advance();
        let pending = PendingLoad::new(
            ticket,
            "glove/50d/glove_50d_vectors.json.gz".to_string(),
            Box::pin(async { Ok::<_, crate::error::DatasetError>(Arc::new(7)) }),
        );

        let completed = tokio_test::block_on(pending.resolve());
        assert_eq!(completed.ticket, ticket);
        assert_eq!(completed.path, "glove/50d/glove_50d_vectors.json.gz");
        assert_eq!(*completed.result.unwrap(), 7);
    }
}
