pub mod quote;
pub mod render;
pub mod submit;

pub use crate::domain::model::{Catalog, CatalogItem, ContactRequest, Section};
pub use crate::domain::ports::{Card, CardTracker, CommentAction};
pub use crate::utils::error::Result;
