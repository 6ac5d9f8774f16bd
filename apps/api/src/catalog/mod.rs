//! Job catalog: immutable domain-keyed snapshots, skill-gap matching, and the
//! out-of-band refresher that rebuilds snapshots from a job board.

pub mod matcher;
pub mod models;
pub mod refresh;
pub mod store;

pub use matcher::match_jobs;
pub use models::MatchedJob;
pub use refresh::CatalogRefresher;
pub use store::CatalogStore;
