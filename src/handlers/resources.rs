use crate::error::{ApiError, ApiResult};
use crate::helpers::{
    extract::{JsonBody, PathParam},
    lenient,
    ownership::ensure_farm_owned,
    validation::{present_amount, present_id, present_text},
};
use crate::middleware::auth::AuthUser;
use crate::schemas::{AppState, ErrorResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, NaiveDateTime};
use common::{CreatedResponse, ResourceTotal};
use compute::summary::summarize_resources;
use model::entities::{
    farm,
    resource_usage::{self, ResourceType},
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for logging resource consumption
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateResourceUsageRequest {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub farm_id: Option<i32>,
    /// One of `water`, `fertilizer`, `pesticide`, `electricity`
    pub resource_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub usage_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResourceUsageResponse {
    pub id: i32,
    pub farm_id: i32,
    pub resource_type: String,
    pub quantity: Decimal,
    pub unit: String,
    pub usage_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<resource_usage::Model> for ResourceUsageResponse {
    fn from(model: resource_usage::Model) -> Self {
        Self {
            id: model.id,
            farm_id: model.farm_id,
            resource_type: model.resource_type.as_str().to_string(),
            quantity: model.quantity,
            unit: model.unit,
            usage_date: model.usage_date,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}

/// Resource usage of one of the caller's farms, newest first
#[utoipa::path(
    get,
    path = "/api/resources/farm/{farm_id}",
    tag = "resources",
    security(("bearer_auth" = [])),
    params(
        ("farm_id" = i32, Path, description = "Farm ID"),
    ),
    responses(
        (status = 200, description = "Usage ordered by date descending", body = Vec<ResourceUsageResponse>),
        (status = 401, description = "Missing token", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_farm_resources(
    PathParam(farm_id): PathParam<i32>,
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<ResourceUsageResponse>>> {
    trace!("Entering get_farm_resources function for farm_id: {}", farm_id);

    let usage = owned_usage(&state, farm_id, user.id).await?;

    info!("Retrieved {} resource usage rows for farm {}", usage.len(), farm_id);
    Ok(Json(usage.into_iter().map(ResourceUsageResponse::from).collect()))
}

/// Log resource consumption on one of the caller's farms
#[utoipa::path(
    post,
    path = "/api/resources",
    tag = "resources",
    security(("bearer_auth" = [])),
    request_body = CreateResourceUsageRequest,
    responses(
        (status = 201, description = "Usage recorded", body = CreatedResponse),
        (status = 400, description = "Missing fields or unknown resource type", body = ErrorResponse),
        (status = 403, description = "Farm not found or access denied", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_resource_usage(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(request): JsonBody<CreateResourceUsageRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    trace!("Entering create_resource_usage function");

    let (Some(farm_id), Some(resource_type), Some(quantity), Some(unit), Some(usage_date)) = (
        present_id(request.farm_id),
        present_text(request.resource_type),
        present_amount(request.quantity),
        present_text(request.unit),
        request.usage_date,
    ) else {
        warn!("Resource usage rejected: missing required fields");
        return Err(ApiError::validation("All fields are required"));
    };

    let resource_type = resource_type
        .parse::<ResourceType>()
        .map_err(ApiError::Validation)?;

    ensure_farm_owned(&state.db, farm_id, user.id).await?;
    debug!("Recording {} {} of {} on farm {}", quantity, unit, resource_type.as_str(), farm_id);

    let new_usage = resource_usage::ActiveModel {
        farm_id: Set(farm_id),
        resource_type: Set(resource_type),
        quantity: Set(quantity),
        unit: Set(unit),
        usage_date: Set(usage_date),
        notes: Set(present_text(request.notes)),
        ..Default::default()
    };
    let usage_model = new_usage.insert(&state.db).await?;

    info!("Resource usage created with ID: {}", usage_model.id);
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Resource usage recorded successfully", usage_model.id)),
    ))
}

/// Total quantity per resource type and unit for one of the caller's farms
#[utoipa::path(
    get,
    path = "/api/resources/summary/farm/{farm_id}",
    tag = "resources",
    security(("bearer_auth" = [])),
    params(
        ("farm_id" = i32, Path, description = "Farm ID"),
    ),
    responses(
        (status = 200, description = "Totals per resource type and unit", body = Vec<ResourceTotal>),
        (status = 401, description = "Missing token", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_resource_summary(
    PathParam(farm_id): PathParam<i32>,
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<ResourceTotal>>> {
    trace!("Entering get_resource_summary function for farm_id: {}", farm_id);

    let usage = owned_usage(&state, farm_id, user.id).await?;
    let summary = summarize_resources(
        usage
            .into_iter()
            .map(|u| (u.resource_type.as_str().to_string(), u.unit, u.quantity)),
    )?;

    info!("Summarized resource usage for farm {} into {} groups", farm_id, summary.len());
    Ok(Json(summary))
}

async fn owned_usage(
    state: &AppState,
    farm_id: i32,
    user_id: i32,
) -> ApiResult<Vec<resource_usage::Model>> {
    let usage = resource_usage::Entity::find()
        .inner_join(farm::Entity)
        .filter(resource_usage::Column::FarmId.eq(farm_id))
        .filter(farm::Column::UserId.eq(user_id))
        .order_by_desc(resource_usage::Column::UsageDate)
        .order_by_desc(resource_usage::Column::Id)
        .all(&state.db)
        .await?;
    Ok(usage)
}
