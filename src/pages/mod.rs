//! Page storage for the editor
//!
//! CRUD over rich-text pages plus public sharing by token. Pages are
//! independent of fact-check results, which are never persisted.

pub mod handlers;
pub mod models;
pub mod store;

pub use handlers::PagesState;
pub use models::{Page, PageCreate, PageUpdate, ListParams, ShareResponse};
pub use store::PageStore;
