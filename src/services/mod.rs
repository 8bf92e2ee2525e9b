pub mod auth_services;
pub mod story_services;
pub mod upload_services;
