use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdvertisementsRow {
    pub id: i64,
    pub title: String,
    pub image_url: Option<String>,
    pub target_url: Option<String>,
    pub placement: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}
