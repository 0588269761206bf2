//! Change notifications
//!
//! After every successful mutation the server broadcasts a [`SyncPayload`]
//! so open admin panels and public menus can refresh the affected resource
//! instead of polling.

use serde::{Deserialize, Serialize};

/// 变更类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
    /// Batch order change; `id` is empty and `data` carries the new orders
    Reordered,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Reordered => "reordered",
        }
    }
}

impl std::fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 同步信号载荷 (服务端 -> 所有订阅者)
///
/// # 示例
/// - `tenant`: "parrilla"
/// - `resource`: "menu_item"
/// - `version`: 42
/// - `action`: updated
/// - `id`: "7301928374"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    /// 租户 ID
    pub tenant: String,
    /// 资源类型 ("category", "menu_item", "settings")
    pub resource: String,
    /// 每个 (tenant, resource) 单调递增的版本号
    pub version: u64,
    pub action: ChangeAction,
    /// 资源 ID (批量操作时为空)
    pub id: String,
    /// 资源数据 (deleted 时为 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_payload_wire_shape() {
        let payload = SyncPayload {
            tenant: "parrilla".into(),
            resource: "category".into(),
            version: 3,
            action: ChangeAction::Deleted,
            id: "12".into(),
            data: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["action"], "deleted");
        assert_eq!(json["version"], 3);
        assert!(json.get("data").is_none());
    }
}
