/*
 * Responsibility
 * - Shared, read-only request context (AppState)
 *   - auth: exemption list + signing key, built once at startup
 *   - routes: route table
 *   - forwarder: upstream client
 * - Clone is cheap (everything behind Arc)
 */
use std::sync::Arc;

use crate::services::{auth::AuthService, routing::RouteTable, upstream::Forwarder};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub routes: Arc<RouteTable>,
    pub forwarder: Arc<dyn Forwarder>,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthService>,
        routes: Arc<RouteTable>,
        forwarder: Arc<dyn Forwarder>,
    ) -> Self {
        Self {
            auth,
            routes,
            forwarder,
        }
    }
}
