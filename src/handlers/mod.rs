pub mod auth_handlers;
pub mod post_handlers;
pub mod profile_handlers;
pub mod social_handlers;

#[cfg(test)]
pub mod test_helpers;
#[cfg(test)]
mod api_tests;
