//! Ports at the hexagonal boundary: driving use cases and driven storage.

mod macros;
pub(crate) use macros::define_port_error;

mod paste_command;
mod paste_query;
mod paste_repository;
mod storage_probe;

#[cfg(test)]
pub use paste_command::MockPasteCommand;
pub use paste_command::{CreatePasteRequest, CreatePasteResponse, PasteCommand};
#[cfg(test)]
pub use paste_query::MockPasteQuery;
pub use paste_query::{PasteQuery, PasteView, ViewPasteRequest, ViewPasteResponse};
#[cfg(test)]
pub use paste_repository::MockPasteRepository;
pub use paste_repository::{PasteRepository, PasteRepositoryError};
#[cfg(test)]
pub use storage_probe::MockStorageProbe;
pub use storage_probe::{StorageProbe, StorageProbeError};
