pub mod activity_service;
pub mod advertisement_service;
pub mod amenity_service;
pub mod auth_service;
pub mod park_service;
pub mod volunteer_service;
