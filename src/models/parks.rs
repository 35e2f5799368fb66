use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ParksRow {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub municipality_id: Option<i64>,
    pub description: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}
