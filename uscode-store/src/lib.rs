//! Revision graph (C5) and section-snapshot store (C4).
//!
//! These two components are deliberately separate types cooperating through
//! plain IDs rather than shared ownership: [`RevisionGraph`] owns the
//! parent-chain topology, [`SnapshotStore`] owns the content rows, and every
//! store query that needs to walk history takes a `&RevisionGraph`
//! explicitly.

pub mod error;
pub mod persistence;
pub mod revision_graph;
pub mod snapshot_store;

pub use error::{StoreError, StoreResult};
pub use persistence::{load_from_path, save_to_path};
pub use revision_graph::RevisionGraph;
pub use snapshot_store::SnapshotStore;
