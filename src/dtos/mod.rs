pub mod auth_dtos;
pub mod post_dtos;
pub mod social_dtos;
