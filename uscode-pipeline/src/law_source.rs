//! External collaborator supplying the "enacted-law events" half of C8's
//! merge (spec.md §4.8: "Enacted-law events (from external store)"). Unlike
//! [`uscode_markup::ReleasePointDirectory`], this system does not specify
//! who publishes this list; a deployment backs it with whatever bill-tracking
//! feed it has.

use crate::timeline::EnactedLawEvent;
use async_trait::async_trait;
use uscode_markup::FetchError;

#[async_trait]
pub trait EnactedLawDirectory: Send + Sync {
    async fn list_enacted_laws(&self) -> Result<Vec<EnactedLawEvent>, FetchError>;
}

/// A fixed, in-memory directory, for tests and small deployments.
#[derive(Debug, Clone, Default)]
pub struct FixedLawDirectory {
    laws: Vec<EnactedLawEvent>,
}

impl FixedLawDirectory {
    pub fn new(laws: Vec<EnactedLawEvent>) -> Self {
        Self { laws }
    }
}

#[async_trait]
impl EnactedLawDirectory for FixedLawDirectory {
    async fn list_enacted_laws(&self) -> Result<Vec<EnactedLawEvent>, FetchError> {
        Ok(self.laws.clone())
    }
}
