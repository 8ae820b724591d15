pub mod data_processing;
pub mod error;
pub mod metrics;
pub mod numerical;
pub mod replay_config;
pub mod summary;
pub mod systems;

pub use error::{ReplayError, Result};
