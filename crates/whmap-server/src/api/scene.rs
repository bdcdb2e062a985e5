use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection, StringRejection},
        Query, State,
    },
    Extension, Json,
};
use serde::Deserialize;
use whmap_core::CoordinatePair;
use whmap_network::{parse_override_list, ColorOverride, NetworkRender, ResolvedStore};

use crate::middleware::RequestId;

use super::{map_network_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Default, Deserialize)]
pub(super) struct SceneQuery {
    /// Comma-separated hex colors in warehouse index order.
    pub colors: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResolvedSceneRequest {
    pub stores: Vec<ResolvedStore>,
    pub centers: Vec<CoordinatePair>,
    pub colors: Option<Vec<ColorOverride>>,
}

pub(super) async fn render_csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<SceneQuery>, QueryRejection>,
    body: Result<String, StringRejection>,
) -> Result<Json<ApiResponse<NetworkRender>>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        ApiError::from_rejection(req_id.0.clone(), rejection.status(), rejection.body_text())
    })?;
    let body = body.map_err(|rejection| {
        ApiError::from_rejection(req_id.0.clone(), rejection.status(), rejection.body_text())
    })?;
    let overrides = query.colors.as_deref().map(parse_override_list);

    let data = state
        .pipeline
        .render_csv(body.as_bytes(), overrides.as_deref())
        .map_err(|e| map_network_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn render_resolved(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    request: Result<Json<ResolvedSceneRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<NetworkRender>>, ApiError> {
    let Json(request) = request.map_err(|rejection| {
        ApiError::from_rejection(req_id.0.clone(), rejection.status(), rejection.body_text())
    })?;

    let data = state
        .pipeline
        .render_resolved(&request.stores, &request.centers, request.colors.as_deref())
        .map_err(|e| map_network_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
