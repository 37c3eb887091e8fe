pub mod models;
pub mod store;
pub mod memory;
pub mod expiring;
pub mod error;
pub mod builder;

pub use models::Turn;
pub use store::TranscriptStore;
pub use memory::InMemoryTranscriptStore;
pub use expiring::ExpiringTranscriptStore;
pub use error::PersistError;
pub use builder::TranscriptStoreBuilder;
