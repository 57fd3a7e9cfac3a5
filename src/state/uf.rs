//! Reference-data cache for the UF (federative unit) list.
//!
//! The list changes essentially never, so a successful fetch is reused for
//! 24 hours. The cached list is only replaced on a successful response; a
//! failed refresh keeps whatever was there before.

#[cfg(test)]
#[path = "uf_test.rs"]
mod uf_test;

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::net::http::{ApiError, Transport};
use crate::net::types::UfRecord;

const UFS_PATH: &str = "/ufs";

/// Cache validity window, in seconds.
pub const UF_CACHE_TTL_SECS: u64 = 86_400;

/// A select-ready option: the fetched `sigla` becomes `value`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UfOption {
    pub label: String,
    pub value: String,
}

/// Cache contents plus the epoch-seconds of the last successful fetch
/// (`0` when never populated).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UfState {
    pub list: Vec<UfOption>,
    pub last_fetched: u64,
}

/// Process-wide UF cache over the resource client.
pub struct UfStore<T> {
    state: RefCell<UfState>,
    api: T,
}

impl<T: Transport> UfStore<T> {
    pub fn new(api: T) -> Self {
        Self { state: RefCell::new(UfState::default()), api }
    }

    pub fn snapshot(&self) -> UfState {
        self.state.borrow().clone()
    }

    /// Return the UF list, hitting the network only when the TTL lapsed.
    ///
    /// # Errors
    ///
    /// Propagates the transport error unchanged; the cached state is left
    /// as it was before the attempt.
    pub async fn fetch(&self) -> Result<Vec<UfOption>, ApiError> {
        self.fetch_at(now_epoch_secs()).await
    }

    async fn fetch_at(&self, now: u64) -> Result<Vec<UfOption>, ApiError> {
        {
            let state = self.state.borrow();
            if now.saturating_sub(state.last_fetched) < UF_CACHE_TTL_SECS {
                return Ok(state.list.clone());
            }
        }

        let response = self.api.get(UFS_PATH).await?;
        let records: Vec<UfRecord> =
            serde_json::from_value(response.data).map_err(|_| ApiError {
                status: None,
                message: Some("resposta inesperada de /ufs".to_owned()),
            })?;

        let list: Vec<UfOption> = records
            .into_iter()
            .map(|r| UfOption { label: r.label, value: r.sigla })
            .collect();

        let mut state = self.state.borrow_mut();
        state.list = list.clone();
        state.last_fetched = now;
        Ok(list)
    }
}

fn now_epoch_secs() -> u64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let secs = (js_sys::Date::now() / 1000.0) as u64;
        secs
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}
