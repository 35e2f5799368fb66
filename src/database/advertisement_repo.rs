use sqlx::SqlitePool;

use crate::models::AdvertisementsRow;

const SQL_LIST_ACTIVE_ADVERTISEMENTS: &str = r#"
SELECT
  id,
  title,
  image_url,
  target_url,
  placement,
  is_active,
  created_at,
  updated_at
FROM advertisements
WHERE is_active = 1
  AND (?1 IS NULL OR placement = ?1)
ORDER BY updated_at DESC, id DESC
LIMIT ?2
"#;

pub async fn list_active(
    pool: &SqlitePool,
    placement: Option<&str>,
    limit: i64,
) -> sqlx::Result<Vec<AdvertisementsRow>> {
    sqlx::query_as::<_, AdvertisementsRow>(SQL_LIST_ACTIVE_ADVERTISEMENTS)
        .bind(placement)
        .bind(limit)
        .fetch_all(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    #[tokio::test]
    async fn inactive_and_other_placements_are_skipped() {
        let pool = test_pool().await;
        sqlx::query(
            r#"INSERT INTO advertisements (title, placement, is_active) VALUES
               ('Vivero', 'sidebar', 1),
               ('Feria', 'banner', 1),
               ('Antiguo', 'sidebar', 0)"#,
        )
        .execute(&pool)
        .await
        .unwrap();

        let sidebar = list_active(&pool, Some("sidebar"), 10).await.unwrap();
        assert_eq!(sidebar.len(), 1);
        assert_eq!(sidebar[0].title, "Vivero");

        assert_eq!(list_active(&pool, None, 10).await.unwrap().len(), 2);
    }
}
