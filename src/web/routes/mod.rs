pub mod activities;
pub mod advertisements;
pub mod amenities;
pub mod auth;
pub mod parks;
pub mod volunteers;
