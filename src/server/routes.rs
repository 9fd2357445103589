//! Router construction and the route table.

use super::handlers;
use super::state::SharedState;
use axum::routing::{get, post};
use axum::Router;

/// One entry of the route table printed by the `routes` command
#[derive(Debug, Clone, Copy)]
pub struct RouteInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub body: &'static str,
    pub description: &'static str,
}

pub const ROUTES: &[RouteInfo] = &[
    RouteInfo { method: "GET", path: "/", body: "-", description: "Banner" },
    RouteInfo { method: "GET", path: "/health", body: "-", description: "Liveness probe" },
    RouteInfo { method: "POST", path: "/auth", body: "identifiant, password", description: "Open a session" },
    RouteInfo { method: "POST", path: "/logout", body: "session_token", description: "Close the session" },
    RouteInfo { method: "POST", path: "/myinfo", body: "session_token", description: "Client profile" },
    RouteInfo { method: "POST", path: "/updateinfo", body: "session_token, name?, email?, company?", description: "Update mutable profile fields" },
    RouteInfo { method: "POST", path: "/bandwidth", body: "session_token, from, to, aggregate?", description: "CDN and P2P bandwidth" },
    RouteInfo { method: "POST", path: "/audience", body: "session_token, from, to, aggregate?", description: "Concurrent viewers" },
    RouteInfo { method: "POST", path: "/streams", body: "session_token", description: "Client streams" },
    RouteInfo { method: "POST", path: "/notifications", body: "session_token", description: "Notifications" },
    RouteInfo { method: "POST", path: "/countries", body: "session_token, fields?", description: "Traffic by country" },
    RouteInfo { method: "POST", path: "/isps", body: "session_token, fields?", description: "Traffic by ISP" },
    RouteInfo { method: "POST", path: "/platforms", body: "session_token, fields?", description: "Traffic by platform" },
];

/// Build the API router over `state`
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/auth", post(handlers::auth))
        .route("/logout", post(handlers::logout))
        .route("/myinfo", post(handlers::my_info))
        .route("/updateinfo", post(handlers::update_info))
        .route("/bandwidth", post(handlers::bandwidth))
        .route("/audience", post(handlers::audience))
        .route("/streams", post(handlers::streams))
        .route("/notifications", post(handlers::notifications))
        .route("/countries", post(handlers::countries))
        .route("/isps", post(handlers::isps))
        .route("/platforms", post(handlers::platforms))
        .with_state(state)
}
