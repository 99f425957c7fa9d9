/*
 * Responsibility
 * - Gateway HTTP surface (routes() re-export)
 */
pub mod handlers;
mod routes;

pub use routes::routes;
