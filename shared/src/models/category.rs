//! Category Model

use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Category entity
///
/// `parent_category_id` nests a category one level under a root. The store
/// rejects grandchildren; read-side code still tolerates dangling parents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Display rank among siblings
    #[serde(rename = "order")]
    pub sort_order: i32,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub parent_category_id: Option<i64>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_category_id.is_none()
    }
}

fn default_true() -> bool {
    true
}

/// Create category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub name: String,
    #[serde(default)]
    pub parent_category_id: Option<i64>,
    pub is_visible: Option<bool>,
}

/// Update category payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
    pub is_visible: Option<bool>,
    /// Absent = unchanged, `null` = move to root, id = re-parent
    #[serde(
        default,
        deserialize_with = "serde_helpers::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_category_id: Option<Option<i64>>,
}

impl CategoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sort_order.is_none()
            && self.is_visible.is_none()
            && self.parent_category_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_shape() {
        let cat = Category {
            id: 1,
            name: "Parrilla".into(),
            sort_order: 3,
            is_visible: true,
            parent_category_id: None,
            created_at: 10,
            updated_at: 20,
        };
        let json = serde_json::to_value(&cat).unwrap();
        assert_eq!(json["order"], 3);
        assert_eq!(json["isVisible"], true);
        assert!(json["parentCategoryId"].is_null());
        assert_eq!(json["updatedAt"], 20);
    }

    #[test]
    fn test_update_parent_tri_state() {
        let u: CategoryUpdate = serde_json::from_str(r#"{"name":"Vinos"}"#).unwrap();
        assert_eq!(u.parent_category_id, None);

        let u: CategoryUpdate = serde_json::from_str(r#"{"parentCategoryId":null}"#).unwrap();
        assert_eq!(u.parent_category_id, Some(None));

        let u: CategoryUpdate = serde_json::from_str(r#"{"parentCategoryId":5}"#).unwrap();
        assert_eq!(u.parent_category_id, Some(Some(5)));
        assert!(!u.is_empty());
    }
}
