//! Restaurant Settings Repository (singleton per tenant)

use super::RepoResult;
use shared::models::{RestaurantSettings, RestaurantSettingsUpdate};
use sqlx::SqlitePool;

pub async fn get(pool: &SqlitePool, tenant: &str) -> RepoResult<Option<RestaurantSettings>> {
    let row = sqlx::query_as::<_, RestaurantSettings>(
        "SELECT name, currency, logo_url, updated_at FROM restaurant_settings WHERE tenant_id = ?",
    )
    .bind(tenant)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Upsert; an empty `logo_url` clears the logo
pub async fn upsert(
    pool: &SqlitePool,
    tenant: &str,
    data: &RestaurantSettingsUpdate,
    now: i64,
) -> RepoResult<RestaurantSettings> {
    sqlx::query(
        "INSERT INTO restaurant_settings (tenant_id, name, currency, logo_url, updated_at)
         VALUES (?1, COALESCE(?2, ''), COALESCE(?3, 'EUR'), NULLIF(?4, ''), ?5)
         ON CONFLICT(tenant_id) DO UPDATE SET
           name = COALESCE(?2, name),
           currency = COALESCE(?3, currency),
           logo_url = CASE WHEN ?4 IS NULL THEN logo_url ELSE NULLIF(?4, '') END,
           updated_at = ?5",
    )
    .bind(tenant)
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.currency.as_deref())
    .bind(data.logo_url.as_deref())
    .bind(now)
    .execute(pool)
    .await?;

    Ok(get(pool, tenant).await?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn test_settings_are_tenant_scoped() {
        let db = DbService::in_memory().await.unwrap();
        assert!(get(&db.pool, "a").await.unwrap().is_none());

        let saved = upsert(
            &db.pool,
            "a",
            &RestaurantSettingsUpdate {
                name: Some("La Parrilla".into()),
                currency: Some("ARS".into()),
                logo_url: Some("https://cdn/logo.png".into()),
            },
            5,
        )
        .await
        .unwrap();
        assert_eq!(saved.currency, "ARS");
        assert_eq!(saved.updated_at, Some(5));
        assert!(get(&db.pool, "b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_partial_upsert_keeps_other_fields() {
        let db = DbService::in_memory().await.unwrap();
        upsert(
            &db.pool,
            "a",
            &RestaurantSettingsUpdate {
                name: Some("Bistro".into()),
                logo_url: Some("https://cdn/logo.png".into()),
                ..Default::default()
            },
            1,
        )
        .await
        .unwrap();
        let saved = upsert(
            &db.pool,
            "a",
            &RestaurantSettingsUpdate {
                logo_url: Some(String::new()),
                ..Default::default()
            },
            2,
        )
        .await
        .unwrap();
        assert_eq!(saved.name, "Bistro");
        assert_eq!(saved.currency, "EUR");
        assert_eq!(saved.logo_url, None);
    }
}
