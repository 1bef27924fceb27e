use crate::error::{ApiError, ApiResult};
use crate::helpers::{
    extract::{JsonBody, PathParam},
    lenient,
    ownership::ensure_crop_owned,
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
use common::CreatedResponse;
use model::entities::{crop, farm, yield_record};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

const DEFAULT_UNIT: &str = "kg";

/// Request body for recording a harvest
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateYieldRecordRequest {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub crop_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub quantity: Option<Decimal>,
    /// Defaults to `kg`
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub harvest_date: Option<NaiveDate>,
    /// 1 (poor) to 5 (excellent)
    #[serde(default, deserialize_with = "lenient::deserialize")]
    #[validate(range(min = 1, max = 5, message = "Quality rating must be between 1 and 5"))]
    pub quality_rating: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct YieldRecordResponse {
    pub id: i32,
    pub crop_id: i32,
    pub quantity: Decimal,
    pub unit: String,
    pub harvest_date: NaiveDate,
    pub quality_rating: Option<i32>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<yield_record::Model> for YieldRecordResponse {
    fn from(model: yield_record::Model) -> Self {
        Self {
            id: model.id,
            crop_id: model.crop_id,
            quantity: model.quantity,
            unit: model.unit,
            harvest_date: model.harvest_date,
            quality_rating: model.quality_rating,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}

/// Harvests of one of the caller's crops, newest first
#[utoipa::path(
    get,
    path = "/api/yield/crop/{crop_id}",
    tag = "yield",
    security(("bearer_auth" = [])),
    params(
        ("crop_id" = i32, Path, description = "Crop ID"),
    ),
    responses(
        (status = 200, description = "Yield records ordered by harvest date descending", body = Vec<YieldRecordResponse>),
        (status = 401, description = "Missing token", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_crop_yields(
    PathParam(crop_id): PathParam<i32>,
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<YieldRecordResponse>>> {
    trace!("Entering get_crop_yields function for crop_id: {}", crop_id);

    let yields = yield_record::Entity::find()
        .inner_join(crop::Entity)
        .join(JoinType::InnerJoin, crop::Relation::Farm.def())
        .filter(yield_record::Column::CropId.eq(crop_id))
        .filter(farm::Column::UserId.eq(user.id))
        .order_by_desc(yield_record::Column::HarvestDate)
        .order_by_desc(yield_record::Column::Id)
        .all(&state.db)
        .await?;

    info!("Retrieved {} yield records for crop {}", yields.len(), crop_id);
    Ok(Json(yields.into_iter().map(YieldRecordResponse::from).collect()))
}

/// Record a harvest for one of the caller's crops
#[utoipa::path(
    post,
    path = "/api/yield",
    tag = "yield",
    security(("bearer_auth" = [])),
    request_body = CreateYieldRecordRequest,
    responses(
        (status = 201, description = "Yield record added", body = CreatedResponse),
        (status = 400, description = "Missing fields or rating out of range", body = ErrorResponse),
        (status = 403, description = "Crop not found or access denied", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_yield_record(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(request): JsonBody<CreateYieldRecordRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    trace!("Entering create_yield_record function");

    let (Some(crop_id), Some(quantity), Some(harvest_date)) = (
        present_id(request.crop_id),
        present_amount(request.quantity),
        request.harvest_date,
    ) else {
        warn!("Yield record rejected: missing required fields");
        return Err(ApiError::validation(
            "Crop ID, quantity, and harvest date are required",
        ));
    };
    request.validate()?;

    ensure_crop_owned(&state.db, crop_id, user.id).await?;

    let unit = present_text(request.unit).unwrap_or_else(|| DEFAULT_UNIT.to_string());
    debug!("Recording harvest of {} {} for crop {}", quantity, unit, crop_id);

    let new_record = yield_record::ActiveModel {
        crop_id: Set(crop_id),
        quantity: Set(quantity),
        unit: Set(unit),
        harvest_date: Set(harvest_date),
        quality_rating: Set(request.quality_rating),
        notes: Set(present_text(request.notes)),
        ..Default::default()
    };
    let record_model = new_record.insert(&state.db).await?;

    info!("Yield record created with ID: {}", record_model.id);
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Yield record added successfully", record_model.id)),
    ))
}
