//! Port used by the health check to confirm storage is reachable.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Reasons a storage probe can fail.
    pub enum StorageProbeError {
        Unreachable { message: String } => "storage unreachable: {message}",
    }
}

/// Lightweight round trip to the backing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageProbe: Send + Sync {
    async fn check(&self) -> Result<(), StorageProbeError>;
}
