pub mod auth;
pub mod fallback;
pub mod routing;
pub mod upstream;
