//! Builder for `GET /txs` transaction searches.
//!
//! The endpoint filters by ABCI event `key=value` pairs and paginates the
//! result; [`TxSearchRequest`] collects both and renders the query string.

use std::collections::BTreeMap;

/// Parameters for a `/txs` search: event filters plus pagination.
///
/// Filters are kept in a sorted map so the rendered query string is
/// deterministic. A filter key set twice keeps the later value.
#[derive(Debug, Clone, Default)]
pub struct TxSearchRequest {
    page: Option<u64>,
    limit: Option<u64>,
    events: BTreeMap<String, String>,
}

impl TxSearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a result page (the node counts from 1).
    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Cap the number of transactions per page.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Filter by an arbitrary event attribute, e.g.
    /// `("transfer.recipient", "terra1...")`.
    pub fn event(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.events.insert(key.into(), value.into());
        self
    }

    /// Filter by message action (`message.action`), e.g. `"send"`.
    pub fn action(self, action: impl Into<String>) -> Self {
        self.event("message.action", action)
    }

    /// Filter by message sender (`message.sender`).
    pub fn sender(self, sender: impl Into<String>) -> Self {
        self.event("message.sender", sender)
    }

    /// Filter by the block height the transaction landed in (`tx.height`).
    pub fn height(self, height: u64) -> Self {
        self.event("tx.height", height.to_string())
    }

    /// Render the query-string pairs: event filters in key order, then
    /// `page` and `limit` when set.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .events
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}
