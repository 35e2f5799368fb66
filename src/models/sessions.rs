#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionUserRow {
    pub user_id: i64,
    pub username: String,
    pub role: String,
    pub expires_at: String,
}
