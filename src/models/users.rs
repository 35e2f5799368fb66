/// Never serialized: carries the password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UsersRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub municipality_id: Option<i64>,
    pub password_hash: String,
}
