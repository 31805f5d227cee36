//! Input side of synthesis: the decoded feature snapshot, the site
//! projector, and classification of records into construction inputs.

pub mod classify;
pub mod snapshot;


pub use classify::*;
pub use snapshot::*;
