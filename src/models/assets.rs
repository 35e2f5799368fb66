use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AssetsRow {
    pub id: i64,
    pub park_id: i64,
    pub name: String,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}
