//! Single-slot credential cache.

use std::future::Future;

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Result;
use crate::token::Token;

/// Holds the one live token of a given kind for a client instance.
///
/// The slot is guarded by a mutex that stays locked across the fetch, so
/// concurrent callers are serialized: only one fetch runs at a time and a
/// reader never observes a partially replaced token. A failed fetch leaves
/// the previously cached token in place.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: Mutex<Option<Token>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// A cache pre-populated with a previously obtained token.
    pub fn seeded(token: Token) -> Self {
        Self {
            slot: Mutex::new(Some(token)),
        }
    }

    /// Return the cached token when present and valid; otherwise run
    /// `fetch`, store the fresh token, and return it.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<Token>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Token>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(token) = slot.as_ref() {
            if token.is_valid() {
                return Ok(token.clone());
            }
        }
        let fresh = fetch().await?;
        debug!(kind = ?fresh.kind(), "credential cached");
        *slot = Some(fresh.clone());
        Ok(fresh)
    }

    /// Fetch a new token regardless of the cached one's validity and swap
    /// it in.
    ///
    /// When `observed` is given and the slot already holds a different
    /// token, a concurrent caller refreshed it first; the newer cached
    /// token is returned without another exchange.
    pub async fn force_refresh<F, Fut>(&self, observed: Option<&Token>, fetch: F) -> Result<Token>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Token>>,
    {
        let mut slot = self.slot.lock().await;
        if let (Some(current), Some(observed)) = (slot.as_ref(), observed) {
            if current.value() != observed.value() {
                return Ok(current.clone());
            }
        }
        let fresh = fetch().await?;
        debug!(kind = ?fresh.kind(), "credential replaced");
        *slot = Some(fresh.clone());
        Ok(fresh)
    }
}
