//! C6: pure application of one amendment operation to a section's text
//! ([`text_apply`]) and structured provision tree ([`provision_apply`]).
//!
//! Both halves are pure functions with no I/O and no knowledge of the
//! revision graph or store — C7 is the only caller that threads parent
//! state in and decides what to do with a `Failed` or `Skipped` result.

pub mod matching;
pub mod provision_apply;
pub mod text_apply;

pub use provision_apply::patch_provisions;
pub use text_apply::{apply, ApplicationResult};
