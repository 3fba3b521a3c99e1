pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::adapters::trello::TrelloClient;
pub use crate::config::catalog::load_catalog;
pub use crate::config::trello::TrelloConfig;
pub use crate::core::{quote::QuoteForm, submit::QuoteSubmitter};
pub use crate::domain::model::{Catalog, ContactRequest};
pub use crate::utils::error::{DevisError, Result};
