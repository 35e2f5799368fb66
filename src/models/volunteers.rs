#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VolunteersRow {
    pub id: i64,
    pub user_id: Option<i64>,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<String>,
    pub availability: Option<String>,
    pub interest_areas: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
