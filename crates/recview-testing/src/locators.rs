//! Source locators for exercising selection enrichment.

use futures::FutureExt;
use recview_runtime::{LocateError, LocateFuture, LocateResult, SourceLocator};
use recview_types::SourceCode;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::oneshot;

/// Answers immediately from a fixed table. Unknown types resolve to "no
/// source"; types registered with [`failing`](Self::failing) resolve to an
/// error.
#[derive(Default)]
pub struct StaticLocator {
    sources: HashMap<String, SourceCode>,
    failures: HashMap<String, String>,
}

impl StaticLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, type_name: &str, text: &str) -> Self {
        self.sources
            .insert(type_name.to_string(), SourceCode::new(type_name, text));
        self
    }

    pub fn failing(mut self, type_name: &str, message: &str) -> Self {
        self.failures
            .insert(type_name.to_string(), message.to_string());
        self
    }
}

impl SourceLocator for StaticLocator {
    fn locate(&self, type_name: &str) -> LocateFuture {
        let result = match self.failures.get(type_name) {
            Some(message) => Err(LocateError::Failed(message.clone())),
            None => Ok(self.sources.get(type_name).cloned()),
        };
        async move { result }.boxed()
    }
}

struct PendingLookup {
    type_name: String,
    release: Option<oneshot::Sender<LocateResult>>,
}

/// Holds every lookup until the test releases it, so completions can be
/// delivered in any order.
#[derive(Default)]
pub struct GatedLocator {
    pending: Mutex<Vec<PendingLookup>>,
}

impl GatedLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type names of all lookups issued so far, in issue order.
    pub fn requested(&self) -> Vec<String> {
        self.pending
            .lock()
            .expect("gated locator lock poisoned")
            .iter()
            .map(|lookup| lookup.type_name.clone())
            .collect()
    }

    /// Complete the `index`-th issued lookup. Returns false if it does not
    /// exist or was already released.
    pub fn release(&self, index: usize, result: LocateResult) -> bool {
        let mut pending = self.pending.lock().expect("gated locator lock poisoned");
        let Some(sender) = pending.get_mut(index).and_then(|lookup| lookup.release.take()) else {
            return false;
        };
        sender.send(result).is_ok()
    }

    /// Complete the `index`-th lookup with source text for its type.
    pub fn release_with_source(&self, index: usize, text: &str) -> bool {
        let type_name = match self.requested().get(index) {
            Some(type_name) => type_name.clone(),
            None => return false,
        };
        self.release(index, Ok(Some(SourceCode::new(type_name, text))))
    }
}

impl SourceLocator for GatedLocator {
    fn locate(&self, type_name: &str) -> LocateFuture {
        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .expect("gated locator lock poisoned")
            .push(PendingLookup {
                type_name: type_name.to_string(),
                release: Some(tx),
            });
        async move {
            rx.await
                .unwrap_or_else(|_| Err(LocateError::Failed("lookup was never released".to_string())))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_locator_answers_from_table() {
        let locator = StaticLocator::new()
            .with_source("com.example.Cart", "class Cart {}")
            .failing("com.example.Broken", "jar unreadable");

        let found = locator.locate("com.example.Cart").await.unwrap();
        assert_eq!(found.map(|s| s.text), Some("class Cart {}".to_string()));
        assert!(locator.locate("com.example.Missing").await.unwrap().is_none());
        assert!(locator.locate("com.example.Broken").await.is_err());
    }

    #[tokio::test]
    async fn test_gated_locator_releases_out_of_order() {
        let locator = GatedLocator::new();
        let first = locator.locate("A");
        let second = locator.locate("B");
        assert_eq!(locator.requested(), vec!["A", "B"]);

        assert!(locator.release_with_source(1, "class B {}"));
        assert!(!locator.release_with_source(1, "again"));
        let second = second.await.unwrap().unwrap();
        assert_eq!(second.type_name, "B");

        assert!(locator.release(0, Ok(None)));
        assert!(first.await.unwrap().is_none());
    }
}
