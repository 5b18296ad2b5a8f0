//! impoll-store - Append-only value log for live classroom polls
//!
//! Participants submit single numbers; this crate keeps them in a SQLite
//! table (`entries`) and hands back ordered snapshots:
//!
//! - **Observation**: one stored value with its id and UTC timestamp
//! - **ValueStore**: insert / clear / read_all / read_recent / count
//! - **SqliteValueStore**: file-backed or in-memory implementation
//!
//! All operations on a store instance are serialized through one lock, so
//! concurrent sessions never interleave partial writes.

pub mod observation;
pub mod sqlite_store;
pub mod store;

pub use observation::*;
pub use sqlite_store::SqliteValueStore;
pub use store::*;
