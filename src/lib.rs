pub mod catalog;
pub mod config;
pub mod confirm;
pub mod error;
pub mod policy;
pub mod sweep;

pub use catalog::{CatalogClient, EntityPage, FlavorAsset, KalturaClient, MediaEntity};
pub use crate::config::AppConfig;
pub use confirm::{ConfirmState, ConsolePrompter, Prompter};
pub use error::Error;
pub use sweep::{SweepEngine, SweepOptions, SweepOutcome, SweepReport};
