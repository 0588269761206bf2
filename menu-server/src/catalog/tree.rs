//! Category nesting
//!
//! Categories nest at most one level. [`CategoryTree`] classifies every
//! category as [`CategoryNode::Root`] or [`CategoryNode::Child`] and fixes
//! the sibling display order. Stored data may still hold a dangling or
//! grandchild parent reference; such categories are read as roots.

use std::cmp::Ordering;
use std::collections::HashMap;

use shared::ErrorCode;
use shared::models::Category;

use super::normalize::fold;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryNode {
    /// Top-level category; `children` in display order
    Root { children: Vec<i64> },
    Child { parent: i64 },
}

/// Sibling order: `order`, then folded name, then id
pub fn cmp_siblings(a: &Category, b: &Category) -> Ordering {
    a.sort_order
        .cmp(&b.sort_order)
        .then_with(|| fold(&a.name).cmp(&fold(&b.name)))
        .then_with(|| a.id.cmp(&b.id))
}

#[derive(Debug, Clone)]
pub struct CategoryTree<'a> {
    by_id: HashMap<i64, &'a Category>,
    nodes: HashMap<i64, CategoryNode>,
    roots: Vec<i64>,
}

impl<'a> CategoryTree<'a> {
    pub fn build(categories: &'a [Category]) -> Self {
        let by_id: HashMap<i64, &Category> = categories.iter().map(|c| (c.id, c)).collect();

        let is_valid_parent = |child: &Category, parent_id: i64| {
            parent_id != child.id
                && by_id
                    .get(&parent_id)
                    .is_some_and(|p| p.parent_category_id.is_none())
        };

        let mut roots: Vec<&Category> = Vec::new();
        let mut children: HashMap<i64, Vec<&Category>> = HashMap::new();
        for category in categories {
            match category.parent_category_id {
                Some(parent) if is_valid_parent(category, parent) => {
                    children.entry(parent).or_default().push(category)
                }
                Some(parent) => {
                    tracing::debug!(
                        category_id = category.id,
                        parent_id = parent,
                        "Category parent does not resolve to a root, treating as root"
                    );
                    roots.push(category);
                }
                None => roots.push(category),
            }
        }

        roots.sort_by(|a, b| cmp_siblings(a, b));
        let mut nodes = HashMap::with_capacity(categories.len());
        for root in &roots {
            let mut kids = children.remove(&root.id).unwrap_or_default();
            kids.sort_by(|a, b| cmp_siblings(a, b));
            for kid in &kids {
                nodes.insert(kid.id, CategoryNode::Child { parent: root.id });
            }
            nodes.insert(
                root.id,
                CategoryNode::Root {
                    children: kids.iter().map(|c| c.id).collect(),
                },
            );
        }

        Self {
            by_id,
            nodes,
            roots: roots.iter().map(|c| c.id).collect(),
        }
    }

    pub fn get(&self, id: i64) -> Option<&'a Category> {
        self.by_id.get(&id).copied()
    }

    pub fn node(&self, id: i64) -> Option<&CategoryNode> {
        self.nodes.get(&id)
    }

    /// Root ids in display order
    pub fn roots(&self) -> &[i64] {
        &self.roots
    }

    /// Child ids of a root in display order (empty for children / unknown ids)
    pub fn children(&self, id: i64) -> &[i64] {
        match self.nodes.get(&id) {
            Some(CategoryNode::Root { children }) => children,
            _ => &[],
        }
    }

    /// Own id for roots, parent id for children
    pub fn effective_parent(&self, id: i64) -> Option<i64> {
        match self.nodes.get(&id)? {
            CategoryNode::Root { .. } => Some(id),
            CategoryNode::Child { parent } => Some(*parent),
        }
    }

    /// Ids sharing `id`'s container (roots, or children of the same root),
    /// in display order, `id` included
    pub fn siblings(&self, id: i64) -> Option<&[i64]> {
        match self.nodes.get(&id)? {
            CategoryNode::Root { .. } => Some(&self.roots),
            CategoryNode::Child { parent } => Some(self.children(*parent)),
        }
    }

    /// Every category: each root followed by its children
    pub fn display_order(&self) -> Vec<&'a Category> {
        self.roots
            .iter()
            .flat_map(|root| std::iter::once(root).chain(self.children(*root)))
            .filter_map(|id| self.get(*id))
            .collect()
    }

    /// False when the category or its root is hidden
    pub fn is_effectively_visible(&self, id: i64) -> bool {
        let Some(category) = self.get(id) else {
            return false;
        };
        if !category.is_visible {
            return false;
        }
        match self.nodes.get(&id) {
            Some(CategoryNode::Child { parent }) => {
                self.get(*parent).is_some_and(|p| p.is_visible)
            }
            _ => true,
        }
    }
}

/// Nesting rule for assigning `parent` to a category
///
/// `parent` is the looked-up parent (None when it does not resolve).
/// `category_id` is None for a category being created; `has_children` is
/// whether that category already has children of its own.
pub fn check_parent(
    category_id: Option<i64>,
    parent_id: i64,
    parent: Option<&Category>,
    has_children: bool,
) -> AppResult<()> {
    if category_id == Some(parent_id) {
        return Err(AppError::with_message(
            ErrorCode::CategoryNestingTooDeep,
            "A category cannot be its own parent",
        )
        .with_detail("parentCategoryId", parent_id));
    }
    let parent = parent.ok_or_else(|| AppError::category_not_found(parent_id))?;
    if parent.parent_category_id.is_some() {
        return Err(AppError::with_message(
            ErrorCode::CategoryNestingTooDeep,
            format!("Category {parent_id} is itself a child and cannot have children"),
        )
        .with_detail("parentCategoryId", parent_id));
    }
    if has_children {
        return Err(AppError::with_message(
            ErrorCode::CategoryNestingTooDeep,
            "A category with children cannot become a child",
        )
        .with_detail("parentCategoryId", parent_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: i64, name: &str, order: i32, parent: Option<i64>) -> Category {
        Category {
            id,
            name: name.to_string(),
            sort_order: order,
            is_visible: true,
            parent_category_id: parent,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_roots_then_children() {
        let cats = vec![
            cat(1, "Bebidas", 1, None),
            cat(2, "Carnes", 0, None),
            cat(3, "Cerdo", 1, Some(2)),
            cat(4, "Vacuno", 0, Some(2)),
            cat(5, "Vinos", 0, Some(1)),
        ];
        let tree = CategoryTree::build(&cats);
        assert_eq!(tree.roots(), &[2, 1]);
        assert_eq!(tree.children(2), &[4, 3]);
        let order: Vec<i64> = tree.display_order().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![2, 4, 3, 1, 5]);
        assert_eq!(tree.effective_parent(3), Some(2));
        assert_eq!(tree.effective_parent(1), Some(1));
        assert_eq!(tree.siblings(3), Some(&[4, 3][..]));
        assert_eq!(tree.siblings(1), Some(&[2, 1][..]));
    }

    #[test]
    fn test_dangling_parent_is_root() {
        // parent 99 was deleted
        let cats = vec![cat(1, "Postres", 0, None), cat(2, "Helados", 0, Some(99))];
        let tree = CategoryTree::build(&cats);
        assert_eq!(tree.node(2), Some(&CategoryNode::Root { children: vec![] }));
        assert_eq!(tree.display_order().len(), 2);
    }

    #[test]
    fn test_grandchild_is_read_as_root() {
        let cats = vec![
            cat(1, "A", 0, None),
            cat(2, "B", 0, Some(1)),
            cat(3, "C", 0, Some(2)),
        ];
        let tree = CategoryTree::build(&cats);
        assert_eq!(tree.node(2), Some(&CategoryNode::Child { parent: 1 }));
        assert!(matches!(tree.node(3), Some(CategoryNode::Root { .. })));
    }

    #[test]
    fn test_self_parent_is_root() {
        let cats = vec![cat(1, "Loop", 0, Some(1))];
        let tree = CategoryTree::build(&cats);
        assert_eq!(tree.roots(), &[1]);
    }

    #[test]
    fn test_sibling_order_is_total_and_idempotent() {
        let mut cats = vec![
            cat(4, "ensalada", 1, None),
            cat(3, "Éntradas", 1, None),
            cat(2, "Entradas", 1, None),
            cat(1, "Bebidas", 2, None),
        ];
        cats.sort_by(cmp_siblings);
        let once: Vec<i64> = cats.iter().map(|c| c.id).collect();
        cats.sort_by(cmp_siblings);
        let twice: Vec<i64> = cats.iter().map(|c| c.id).collect();
        assert_eq!(once, twice);
        // equal order and equal folded name fall back to id
        assert_eq!(once, vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_effective_visibility() {
        let mut hidden_root = cat(1, "Carnes", 0, None);
        hidden_root.is_visible = false;
        let cats = vec![hidden_root, cat(2, "Vacuno", 0, Some(1)), cat(3, "Vinos", 1, None)];
        let tree = CategoryTree::build(&cats);
        assert!(!tree.is_effectively_visible(1));
        assert!(!tree.is_effectively_visible(2));
        assert!(tree.is_effectively_visible(3));
        assert!(!tree.is_effectively_visible(42));
    }

    #[test]
    fn test_check_parent() {
        let root = cat(1, "Carnes", 0, None);
        let child = cat(2, "Vacuno", 0, Some(1));
        assert!(check_parent(None, 1, Some(&root), false).is_ok());
        assert_eq!(
            check_parent(None, 2, Some(&child), false).unwrap_err().code,
            ErrorCode::CategoryNestingTooDeep
        );
        assert_eq!(
            check_parent(Some(1), 1, Some(&root), false).unwrap_err().code,
            ErrorCode::CategoryNestingTooDeep
        );
        assert_eq!(
            check_parent(Some(3), 1, Some(&root), true).unwrap_err().code,
            ErrorCode::CategoryNestingTooDeep
        );
        assert_eq!(
            check_parent(None, 9, None, false).unwrap_err().code,
            ErrorCode::CategoryNotFound
        );
    }
}
