//! Route handlers.
//!
//! Each handler decodes its JSON body, resolves the session and calls into
//! the fixture store. Decoding failures become `MalformedRequest`.

use super::models::{AuthRequest, AuthResponse, RangeRequest, StatsRequest, TokenRequest};
use super::state::SharedState;
use crate::fixtures::{ClientRecord, ProfileUpdate, StatKind};
use crate::timeseries::ChannelData;
use crate::utils::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use log::info;
use serde_json::{json, Map, Value};

type JsonBody<T> = Result<Json<T>, JsonRejection>;

pub async fn index() -> &'static str {
    "Mock dashboard API. POST /auth with {identifiant, password} to get a session_token.\n"
}

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

pub async fn auth(
    State(state): State<SharedState>,
    payload: JsonBody<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(req) = payload?;
    let session_token = state.authenticate(&req.identifier, &req.password)?;

    info!("Client '{}' logged in", req.identifier);

    Ok(Json(AuthResponse { session_token }))
}

pub async fn logout(
    State(state): State<SharedState>,
    payload: JsonBody<TokenRequest>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = payload?;
    let client = state.resolve(&req.session_token)?;
    state.end_session(&req.session_token)?;

    info!("Client {} logged out", client);

    Ok(Json(json!({})))
}

pub async fn my_info(
    State(state): State<SharedState>,
    payload: JsonBody<TokenRequest>,
) -> Result<Json<ClientRecord>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(state.profile(&req.session_token)?))
}

/// Takes a raw object so that immutable and unknown fields can be reported
/// by name instead of being silently dropped.
pub async fn update_info(
    State(state): State<SharedState>,
    payload: JsonBody<Map<String, Value>>,
) -> Result<Json<ClientRecord>, ApiError> {
    let Json(mut fields) = payload?;

    let token = match fields.remove("session_token") {
        Some(Value::String(token)) => token,
        _ => {
            return Err(ApiError::MalformedRequest(
                "missing field `session_token`".to_string(),
            ))
        }
    };

    let client = state.resolve(&token)?;
    let update = ProfileUpdate::from_fields(fields)?;
    let updated = state.clients.write().update(client, update)?;

    info!("Client {} updated its profile", client);

    Ok(Json(updated))
}

pub async fn bandwidth(
    State(state): State<SharedState>,
    payload: JsonBody<RangeRequest>,
) -> Result<Json<ChannelData>, ApiError> {
    let Json(req) = payload?;
    let client = state.resolve(&req.session_token)?;

    let data = state.fixtures.slice_bandwidth(
        client,
        req.from,
        req.to,
        req.aggregate.as_deref(),
        state.empty_channel,
    )?;

    Ok(Json(data))
}

pub async fn audience(
    State(state): State<SharedState>,
    payload: JsonBody<RangeRequest>,
) -> Result<Json<ChannelData>, ApiError> {
    let Json(req) = payload?;
    let client = state.resolve(&req.session_token)?;

    let data = state
        .fixtures
        .slice_audience(client, req.from, req.to, req.aggregate.as_deref())?;

    Ok(Json(data))
}

pub async fn streams(
    State(state): State<SharedState>,
    payload: JsonBody<TokenRequest>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let Json(req) = payload?;
    let client = state.resolve(&req.session_token)?;
    Ok(Json(state.fixtures.streams(client)?.to_vec()))
}

pub async fn notifications(
    State(state): State<SharedState>,
    payload: JsonBody<TokenRequest>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let Json(req) = payload?;
    state.resolve(&req.session_token)?;
    Ok(Json(state.fixtures.notifications.clone()))
}

pub async fn countries(
    state: State<SharedState>,
    payload: JsonBody<StatsRequest>,
) -> Result<Json<Vec<Value>>, ApiError> {
    stats(state, payload, StatKind::Countries)
}

pub async fn isps(
    state: State<SharedState>,
    payload: JsonBody<StatsRequest>,
) -> Result<Json<Vec<Value>>, ApiError> {
    stats(state, payload, StatKind::Isps)
}

pub async fn platforms(
    state: State<SharedState>,
    payload: JsonBody<StatsRequest>,
) -> Result<Json<Vec<Value>>, ApiError> {
    stats(state, payload, StatKind::Platforms)
}

fn stats(
    State(state): State<SharedState>,
    payload: JsonBody<StatsRequest>,
    kind: StatKind,
) -> Result<Json<Vec<Value>>, ApiError> {
    let Json(req) = payload?;
    state.resolve(&req.session_token)?;
    Ok(Json(state.fixtures.stats(kind, &req.fields)))
}
