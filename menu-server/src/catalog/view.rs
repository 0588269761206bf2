//! Catalog View Model
//!
//! Pure projection of (categories, menu items, filter) into display
//! sections. Performs no I/O and holds no state, so it can be recomputed on
//! every keystroke of the search box.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use shared::models::{Category, MenuItem};

use super::normalize::{SearchTerm, cmp_names};
use super::tree::CategoryTree;

/// Who the projection is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Guests: visible, in-stock items of visible categories; no empty sections
    Public,
    /// Admin panel: stock ignored, hidden categories shown, pinned empty sections
    Admin,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// `order` ascending, name tie-break
    #[default]
    Manual,
    Alphabetic,
}

/// UI filter state, deserializable from a query string
/// (`?category=3&search=bife&sort=alphabetic&parent=1`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewFilter {
    /// Selected category; absent or `all` = every category
    #[serde(default, deserialize_with = "all_or_id")]
    pub category: Option<i64>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortMode,
    /// Restrict to one root and its children
    #[serde(default, deserialize_with = "all_or_id")]
    pub parent: Option<i64>,
    /// Admin only: also list items with `isVisible == false`
    #[serde(default)]
    pub include_hidden: bool,
}

fn all_or_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(v) => v.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// One category with its matching items
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySection {
    pub category: Category,
    /// Root this section is displayed under (None for roots)
    pub parent_category_id: Option<i64>,
    /// Pinned section without matching items ("no items" state)
    pub is_empty: bool,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub sections: Vec<CategorySection>,
    pub total_items: usize,
}

impl CatalogView {
    pub fn item_ids(&self) -> Vec<i64> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter().map(|i| i.id))
            .collect()
    }
}

/// Item order within one category for the given mode
pub fn cmp_items(mode: SortMode, a: &MenuItem, b: &MenuItem) -> Ordering {
    let by_name = || cmp_names(&a.name, &b.name);
    match mode {
        SortMode::Manual => a.sort_order.cmp(&b.sort_order).then_with(by_name),
        SortMode::Alphabetic => by_name(),
    }
    .then_with(|| a.id.cmp(&b.id))
}

pub fn project(
    categories: &[Category],
    items: &[MenuItem],
    filter: &ViewFilter,
    audience: Audience,
) -> CatalogView {
    let tree = CategoryTree::build(categories);
    let term = SearchTerm::new(filter.search.as_deref().unwrap_or_default());
    let in_parent_group = |category_id: i64| match filter.parent {
        Some(parent) => tree.effective_parent(category_id) == Some(parent),
        None => true,
    };

    let mut grouped: HashMap<i64, Vec<MenuItem>> = HashMap::new();
    for item in items {
        let keep = match audience {
            Audience::Public => {
                item.is_visible && item.in_stock && tree.is_effectively_visible(item.category_id)
            }
            Audience::Admin => item.is_visible || filter.include_hidden,
        };
        if !keep
            || filter.category.is_some_and(|c| c != item.category_id)
            || !in_parent_group(item.category_id)
            || !term.matches_any(
                [item.name.as_str(), item.description.as_str()]
                    .into_iter()
                    .chain(item.search_keywords.iter().map(String::as_str)),
            )
        {
            continue;
        }
        grouped.entry(item.category_id).or_default().push(item.clone());
    }

    let pinned = |category_id: i64| {
        audience == Audience::Admin
            && (filter.category == Some(category_id)
                || (filter.parent.is_some() && in_parent_group(category_id)))
    };

    let mut sections = Vec::new();
    for category in tree.display_order() {
        if audience == Audience::Public && !tree.is_effectively_visible(category.id) {
            continue;
        }
        let mut section_items = grouped.remove(&category.id).unwrap_or_default();
        if section_items.is_empty() && !pinned(category.id) {
            continue;
        }
        section_items.sort_by(|a, b| cmp_items(filter.sort, a, b));
        let parent_category_id = tree
            .effective_parent(category.id)
            .filter(|p| *p != category.id);
        sections.push(CategorySection {
            category: category.clone(),
            parent_category_id,
            is_empty: section_items.is_empty(),
            items: section_items,
        });
    }

    // Items left in `grouped` reference a missing category and stay unreachable
    let total_items = sections.iter().map(|s| s.items.len()).sum();
    CatalogView {
        sections,
        total_items,
    }
}
