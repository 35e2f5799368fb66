pub mod activities;
pub mod advertisements;
pub mod amenities;
pub mod assets;
pub mod parks;
pub mod role;
pub mod sessions;
pub mod users;
pub mod volunteers;

pub use activities::ActivitiesRow;
pub use advertisements::AdvertisementsRow;
pub use amenities::AmenitiesRow;
pub use assets::AssetsRow;
pub use parks::ParksRow;
pub use role::Role;
pub use sessions::SessionUserRow;
pub use users::UsersRow;
pub use volunteers::VolunteersRow;
