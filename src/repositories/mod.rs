pub mod db;
pub mod post_repository;
pub mod social_repository;
pub mod user_repository;
