//! 菜单目录 - 存储、视图模型和管理端会话
//!
//! - [`store`] - tenant-scoped persistence seam ([`CatalogStore`])
//! - [`tree`] - one-level category nesting
//! - [`normalize`] - case/diacritic folding for sort and search
//! - [`view`] - public/admin projections
//! - [`optimistic`] - apply / write / revert primitive
//! - [`session`] - admin panel local state

pub mod normalize;
pub mod optimistic;
pub mod session;
pub mod store;
pub mod tree;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use session::AdminSession;
pub use store::{CatalogStore, SortOrderOutcome, SqliteCatalogStore};
pub use tree::{CategoryNode, CategoryTree};
pub use view::{Audience, CatalogView, CategorySection, SortMode, ViewFilter, project};
