/*
 * Responsibility
 * - Request pipeline stages (re-export)
 * - route matching → bearer auth → proxy, plus HTTP-level cross-cutting layers
 */
pub mod auth;
pub mod http;
pub mod route;
