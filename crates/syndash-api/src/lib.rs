// syndash-api: Async Rust client for the Syncthing REST API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::SyncthingClient;
pub use error::Error;
pub use transport::TransportConfig;
