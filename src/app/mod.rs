pub mod config;
pub mod container;

pub use config::{AppConfig, StorageBackend, StorageConfig, TariffConfig};
pub use container::AppContainer;
