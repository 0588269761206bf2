//! Tenant resolution
//!
//! - [`TenantRegistry`] - fixed registry of restaurants served by this node
//! - [`TenantScope`] - axum extractor resolving the `{tenant}` path segment

mod extractor;
mod registry;

pub use extractor::TenantScope;
pub use registry::{ResolvedTenant, TenantRegistry};
