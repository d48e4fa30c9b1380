use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    error::AppError,
    html::{Button, FrameParams, render_frame},
    image::{BOARD_TITLE, render_bounty_image},
    state::AppState,
    utils::{char_slice, next_index, parse_index, select_index},
};

pub const IMAGE_CACHE_CONTROL: &str = "max-age=10";
const ACTION_DESCRIPTION_CHARS: usize = 200;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    #[serde(default)]
    untrusted_data: Option<UntrustedData>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UntrustedData {
    #[serde(default)]
    state: Option<Value>,
    #[serde(default)]
    button_index: Option<Value>,
}

impl ActionPayload {
    /// Anything that is not JSON, or lacks a usable state, reads as index 0.
    pub fn from_bytes(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn prior_index(&self) -> i64 {
        match self.untrusted_data.as_ref().and_then(|d| d.state.as_ref()) {
            Some(Value::String(state)) => parse_index(state),
            Some(Value::Number(state)) => parse_index(&state.to_string()),
            _ => 0,
        }
    }
}

pub async fn index_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let bounties = state.bounties.fetch_open().await?;
    let config = &state.config;

    let html = render_frame(&FrameParams {
        title: BOARD_TITLE.to_string(),
        description: format!("Browse {} open bounties", bounties.len()),
        image_url: config.image_url(0),
        buttons: vec![
            Button::post("▶️ Next", config.action_url()),
            Button::link("🔗 View All", config.bounty_site.clone()),
        ],
        post_url: Some(config.action_url()),
        state: Some("0".to_string()),
    })?;

    Ok(Html(html))
}

pub async fn image_root_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    render_image(&state, 0).await
}

pub async fn image_handler(
    State(state): State<Arc<AppState>>,
    rest: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let index = rest
        .map(|Path(rest)| parse_index(rest.split('/').next().unwrap_or_default()))
        .unwrap_or(0);

    render_image(&state, index).await
}

async fn render_image(state: &AppState, requested: i64) -> Result<Response, AppError> {
    let bounties = state.bounties.fetch_open().await?;

    let svg = match select_index(requested, bounties.len()) {
        Some(index) => render_bounty_image(Some(&bounties[index]), index, bounties.len()),
        None => render_bounty_image(None, 0, 0),
    };

    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL),
        ],
        svg,
    )
        .into_response())
}

/// Pages forward regardless of which post button was pressed.
pub async fn action_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Html<String>, AppError> {
    let payload = ActionPayload::from_bytes(&body);
    let prior = payload.prior_index();

    if let Some(data) = &payload.untrusted_data {
        debug!(prior, button = ?data.button_index, "frame action");
    }

    let bounties = state.bounties.fetch_open().await?;
    let config = &state.config;
    let next = next_index(prior, bounties.len());

    let (title, description) = match next.map(|i| &bounties[i]) {
        Some(bounty) => (
            bounty.title.clone(),
            char_slice(&bounty.description, 0, ACTION_DESCRIPTION_CHARS).to_string(),
        ),
        None => (BOARD_TITLE.to_string(), String::new()),
    };
    let index = next.unwrap_or(0);

    let html = render_frame(&FrameParams {
        title,
        description,
        image_url: config.image_url(index),
        buttons: vec![
            Button::post("◀️ Prev", config.action_url()),
            Button::post("▶️ Next", config.action_url()),
            Button::link("🔗 Claim", config.bounty_site.clone()),
        ],
        post_url: Some(config.action_url()),
        state: Some(index.to_string()),
    })?;

    Ok(Html(html))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
