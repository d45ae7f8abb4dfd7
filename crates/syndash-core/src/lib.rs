// syndash-core: concurrent status aggregation for the Syncthing dashboard.
//
// Fans out completion queries across (device, folder) pairs under a
// bounded concurrency budget and merges everything into one Snapshot.

pub mod error;
pub mod fanout;
pub mod limiter;
pub mod snapshot;

pub use error::CoreError;
pub use fanout::CompletionKey;
pub use limiter::Limiter;
pub use snapshot::Snapshot;
