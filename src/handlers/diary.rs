use crate::error::{ApiError, ApiResult};
use crate::helpers::{
    extract::{JsonBody, PathParam},
    lenient,
    ownership::ensure_farm_owned,
    validation::{present_id, present_text},
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
use model::entities::{diary_entry, farm};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for writing a diary entry
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateDiaryEntryRequest {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub farm_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub entry_date: Option<NaiveDate>,
    pub activity_type: Option<String>,
    pub description: Option<String>,
    pub weather_notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DiaryEntryResponse {
    pub id: i32,
    pub farm_id: i32,
    pub entry_date: NaiveDate,
    pub activity_type: Option<String>,
    pub description: String,
    pub weather_notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<diary_entry::Model> for DiaryEntryResponse {
    fn from(model: diary_entry::Model) -> Self {
        Self {
            id: model.id,
            farm_id: model.farm_id,
            entry_date: model.entry_date,
            activity_type: model.activity_type,
            description: model.description,
            weather_notes: model.weather_notes,
            created_at: model.created_at,
        }
    }
}

/// Diary of one of the caller's farms, newest entry first
#[utoipa::path(
    get,
    path = "/api/diary/farm/{farm_id}",
    tag = "diary",
    security(("bearer_auth" = [])),
    params(
        ("farm_id" = i32, Path, description = "Farm ID"),
    ),
    responses(
        (status = 200, description = "Diary entries ordered by date descending", body = Vec<DiaryEntryResponse>),
        (status = 401, description = "Missing token", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_farm_diary(
    PathParam(farm_id): PathParam<i32>,
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<DiaryEntryResponse>>> {
    trace!("Entering get_farm_diary function for farm_id: {}", farm_id);

    let entries = diary_entry::Entity::find()
        .inner_join(farm::Entity)
        .filter(diary_entry::Column::FarmId.eq(farm_id))
        .filter(farm::Column::UserId.eq(user.id))
        .order_by_desc(diary_entry::Column::EntryDate)
        .order_by_desc(diary_entry::Column::Id)
        .all(&state.db)
        .await?;

    info!("Retrieved {} diary entries for farm {}", entries.len(), farm_id);
    Ok(Json(entries.into_iter().map(DiaryEntryResponse::from).collect()))
}

/// Add a diary entry to one of the caller's farms
#[utoipa::path(
    post,
    path = "/api/diary",
    tag = "diary",
    security(("bearer_auth" = [])),
    request_body = CreateDiaryEntryRequest,
    responses(
        (status = 201, description = "Diary entry added", body = CreatedResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 403, description = "Farm not found or access denied", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_diary_entry(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(request): JsonBody<CreateDiaryEntryRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    trace!("Entering create_diary_entry function");

    let (Some(farm_id), Some(entry_date), Some(description)) = (
        present_id(request.farm_id),
        request.entry_date,
        present_text(request.description),
    ) else {
        warn!("Diary entry rejected: missing required fields");
        return Err(ApiError::validation(
            "Farm ID, entry date, and description are required",
        ));
    };

    ensure_farm_owned(&state.db, farm_id, user.id).await?;

    let new_entry = diary_entry::ActiveModel {
        farm_id: Set(farm_id),
        entry_date: Set(entry_date),
        activity_type: Set(present_text(request.activity_type)),
        description: Set(description),
        weather_notes: Set(present_text(request.weather_notes)),
        ..Default::default()
    };
    let entry_model = new_entry.insert(&state.db).await?;

    info!("Diary entry created with ID: {}", entry_model.id);
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Diary entry added successfully", entry_model.id)),
    ))
}
