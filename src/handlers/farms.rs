use crate::error::{ApiError, ApiResult};
use crate::handlers::crops::CropResponse;
use crate::helpers::{extract::{JsonBody, PathParam}, lenient, validation::present_text};
use crate::middleware::auth::AuthUser;
use crate::schemas::{AppState, ErrorResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use common::CreatedResponse;
use model::entities::{crop, farm};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a farm
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateFarmRequest {
    pub farm_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub area_acres: Option<Decimal>,
    pub location: Option<String>,
    pub soil_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FarmResponse {
    pub id: i32,
    pub user_id: i32,
    pub farm_name: String,
    pub area_acres: Option<Decimal>,
    pub location: Option<String>,
    pub soil_type: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<farm::Model> for FarmResponse {
    fn from(model: farm::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            farm_name: model.farm_name,
            area_acres: model.area_acres,
            location: model.location,
            soil_type: model.soil_type,
            created_at: model.created_at,
        }
    }
}

/// A farm together with the crops planted on it
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FarmDetailResponse {
    #[serde(flatten)]
    pub farm: FarmResponse,
    pub crops: Vec<CropResponse>,
}

/// List the caller's farms
#[utoipa::path(
    get,
    path = "/api/farms",
    tag = "farms",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Farms owned by the caller", body = Vec<FarmResponse>),
        (status = 401, description = "Missing token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_farms(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<Vec<FarmResponse>>> {
    trace!("Entering get_farms function");

    let farms = farm::Entity::find()
        .filter(farm::Column::UserId.eq(user.id))
        .order_by_asc(farm::Column::Id)
        .all(&state.db)
        .await?;

    info!("Retrieved {} farms for user {}", farms.len(), user.id);
    Ok(Json(farms.into_iter().map(FarmResponse::from).collect()))
}

/// Create a farm owned by the caller
#[utoipa::path(
    post,
    path = "/api/farms",
    tag = "farms",
    security(("bearer_auth" = [])),
    request_body = CreateFarmRequest,
    responses(
        (status = 201, description = "Farm created", body = CreatedResponse),
        (status = 400, description = "Farm name missing", body = ErrorResponse),
        (status = 401, description = "Missing token", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_farm(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(request): JsonBody<CreateFarmRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    trace!("Entering create_farm function");

    let Some(farm_name) = present_text(request.farm_name) else {
        warn!("Farm creation rejected: missing name");
        return Err(ApiError::validation("Farm name is required"));
    };
    debug!("Creating farm '{}' for user {}", farm_name, user.id);

    let new_farm = farm::ActiveModel {
        user_id: Set(user.id),
        farm_name: Set(farm_name),
        area_acres: Set(request.area_acres.filter(|a| !a.is_zero())),
        location: Set(present_text(request.location)),
        soil_type: Set(present_text(request.soil_type)),
        ..Default::default()
    };
    let farm_model = new_farm.insert(&state.db).await?;

    info!("Farm created with ID: {}", farm_model.id);
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Farm created successfully", farm_model.id)),
    ))
}

/// Get one of the caller's farms with its crops
#[utoipa::path(
    get,
    path = "/api/farms/{id}",
    tag = "farms",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Farm ID"),
    ),
    responses(
        (status = 200, description = "Farm with crops", body = FarmDetailResponse),
        (status = 404, description = "Farm not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_farm(
    PathParam(farm_id): PathParam<i32>,
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<FarmDetailResponse>> {
    trace!("Entering get_farm function for farm_id: {}", farm_id);

    let Some(farm_model) = farm::Entity::find_by_id(farm_id)
        .filter(farm::Column::UserId.eq(user.id))
        .one(&state.db)
        .await?
    else {
        warn!("Farm {} not found for user {}", farm_id, user.id);
        return Err(ApiError::NotFound("Farm not found".to_string()));
    };

    let crops = crop::Entity::find()
        .filter(crop::Column::FarmId.eq(farm_id))
        .order_by_asc(crop::Column::Id)
        .all(&state.db)
        .await?;

    info!("Retrieved farm {} with {} crops", farm_id, crops.len());
    Ok(Json(FarmDetailResponse {
        farm: FarmResponse::from(farm_model),
        crops: crops.into_iter().map(CropResponse::from).collect(),
    }))
}
