//! Durable shared-details store collaborator.
//!
//! Once any session normalizes a given master or release, the result
//! can be persisted (in the reference deployment, a Firestore
//! collection) and reused across sessions and users without touching
//! the gateway at all. The store is a collaborator, not part of the
//! gateway's own state — [`SharedDetailsStore`] is the seam, and
//! implementations are injected via
//! [`PlatterBuilder::shared_store`](crate::PlatterBuilder::shared_store).
//!
//! Records are keyed by a `details_ref` string: `m_<master_id>` for
//! master-level identity, `r_<release_id>` otherwise. Master identity
//! is preferred because it aggregates all pressings of a work.

use async_trait::async_trait;

use crate::types::{ReleaseDetails, ReleaseRef, ResultType};
use crate::Result;

/// Durable cache of normalized release details, keyed by
/// [`details_ref`].
#[async_trait]
pub trait SharedDetailsStore: Send + Sync {
    /// Fetch a previously stored record, `None` when absent.
    async fn get(&self, details_ref: &str) -> Result<Option<ReleaseDetails>>;

    /// Persist a record, overwriting any existing one.
    async fn put(&self, details_ref: &str, details: &ReleaseDetails) -> Result<()>;
}

/// Build the durable-store key for a lookup reference.
pub fn details_ref(query: &ReleaseRef) -> String {
    let release_id = query.id.or(query.master_id).unwrap_or(0);
    if let Some(master_id) = query.master_id {
        return format!("m_{master_id}");
    }
    if query.result_type == ResultType::Master && release_id > 0 {
        return format!("m_{release_id}");
    }
    format!("r_{release_id}")
}

/// Result of a shared-details lookup: the durable key plus the
/// details, whether they came from the store or a fresh fetch.
#[derive(Debug, Clone)]
pub struct SharedLookup {
    pub details_ref: String,
    pub details: ReleaseDetails,
}
