use crate::error::{ApiError, ApiResult};
use crate::helpers::{
    extract::{JsonBody, PathParam},
    lenient,
    validation::{present_id, present_text},
};
use crate::middleware::auth::AuthUser;
use crate::schemas::{AppState, ErrorResponse};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use axum_valid::Valid;
use chrono::{NaiveDateTime, Utc};
use common::{CreatedResponse, MessageResponse};
use model::entities::{
    learning_resource,
    user_learning_progress::{self, ProgressStatus},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Exact-match filters for the resource catalogue
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct LearningQuery {
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(length(max = 100))]
    pub content_type: Option<String>,
    /// Language code such as `en`, `hi` or `or`
    #[validate(length(max = 10))]
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LearningResourceResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub content_type: String,
    pub category: String,
    pub language: String,
    pub tags: Option<String>,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<learning_resource::Model> for LearningResourceResponse {
    fn from(model: learning_resource::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            content_type: model.content_type,
            category: model.category,
            language: model.language,
            tags: model.tags,
            content: model.content,
            video_url: model.video_url,
            created_at: model.created_at,
        }
    }
}

/// Request body for recording progress on a resource
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpsertProgressRequest {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub resource_id: Option<i32>,
    /// One of `not_started`, `in_progress`, `completed`
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    #[validate(range(min = 0, max = 100, message = "Progress percentage must be between 0 and 100"))]
    pub progress_percentage: Option<i32>,
}

/// Progress row joined with the resource it tracks
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProgressResponse {
    pub id: i32,
    pub user_id: i32,
    pub resource_id: i32,
    pub status: String,
    pub progress_percentage: i32,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub title: Option<String>,
    pub category: Option<String>,
}

impl From<(user_learning_progress::Model, Option<learning_resource::Model>)> for ProgressResponse {
    fn from(
        (progress, resource): (user_learning_progress::Model, Option<learning_resource::Model>),
    ) -> Self {
        let (title, category) = match resource {
            Some(resource) => (Some(resource.title), Some(resource.category)),
            None => (None, None),
        };
        Self {
            id: progress.id,
            user_id: progress.user_id,
            resource_id: progress.resource_id,
            status: progress.status.as_str().to_string(),
            progress_percentage: progress.progress_percentage,
            completed_at: progress.completed_at,
            created_at: progress.created_at,
            title,
            category,
        }
    }
}

/// Browse learning resources, newest first
#[utoipa::path(
    get,
    path = "/api/learning",
    tag = "learning",
    params(LearningQuery),
    responses(
        (status = 200, description = "Matching resources", body = Vec<LearningResourceResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_resources(
    Valid(Query(query)): Valid<Query<LearningQuery>>,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<LearningResourceResponse>>> {
    trace!("Entering get_resources function");

    let mut query_builder = learning_resource::Entity::find();

    // Apply filters
    if let Some(category) = present_text(query.category) {
        query_builder = query_builder.filter(learning_resource::Column::Category.eq(category));
    }
    if let Some(content_type) = present_text(query.content_type) {
        query_builder = query_builder.filter(learning_resource::Column::ContentType.eq(content_type));
    }
    if let Some(language) = present_text(query.language) {
        query_builder = query_builder.filter(learning_resource::Column::Language.eq(language));
    }

    let resources = query_builder
        .order_by_desc(learning_resource::Column::CreatedAt)
        .order_by_desc(learning_resource::Column::Id)
        .all(&state.db)
        .await?;

    info!("Retrieved {} learning resources", resources.len());
    Ok(Json(resources.into_iter().map(LearningResourceResponse::from).collect()))
}

/// Get one learning resource
#[utoipa::path(
    get,
    path = "/api/learning/{id}",
    tag = "learning",
    params(
        ("id" = i32, Path, description = "Learning resource ID"),
    ),
    responses(
        (status = 200, description = "The resource", body = LearningResourceResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_resource(
    PathParam(resource_id): PathParam<i32>,
    State(state): State<AppState>,
) -> ApiResult<Json<LearningResourceResponse>> {
    trace!("Entering get_resource function for resource_id: {}", resource_id);

    match learning_resource::Entity::find_by_id(resource_id).one(&state.db).await? {
        Some(resource) => {
            info!("Retrieved learning resource {}", resource_id);
            Ok(Json(LearningResourceResponse::from(resource)))
        }
        None => {
            warn!("Learning resource {} not found", resource_id);
            Err(ApiError::NotFound("Resource not found".to_string()))
        }
    }
}

/// The caller's learning progress with resource titles
#[utoipa::path(
    get,
    path = "/api/learning/progress/my-progress",
    tag = "learning",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Progress rows, newest first", body = Vec<ProgressResponse>),
        (status = 401, description = "Missing token", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_my_progress(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<Vec<ProgressResponse>>> {
    trace!("Entering get_my_progress function");

    let progress = user_learning_progress::Entity::find()
        .find_also_related(learning_resource::Entity)
        .filter(user_learning_progress::Column::UserId.eq(user.id))
        .order_by_desc(user_learning_progress::Column::CreatedAt)
        .order_by_desc(user_learning_progress::Column::Id)
        .all(&state.db)
        .await?;

    info!("Retrieved {} progress rows for user {}", progress.len(), user.id);
    Ok(Json(progress.into_iter().map(ProgressResponse::from).collect()))
}

/// Record or update progress on a resource
///
/// The first call for a resource inserts a row; later calls only overwrite
/// the fields they carry.
#[utoipa::path(
    post,
    path = "/api/learning/progress",
    tag = "learning",
    security(("bearer_auth" = [])),
    request_body = UpsertProgressRequest,
    responses(
        (status = 201, description = "Progress recorded", body = CreatedResponse),
        (status = 200, description = "Progress updated", body = MessageResponse),
        (status = 400, description = "Missing resource or invalid values", body = ErrorResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn upsert_progress(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(request): JsonBody<UpsertProgressRequest>,
) -> ApiResult<Response> {
    trace!("Entering upsert_progress function");

    let Some(resource_id) = present_id(request.resource_id) else {
        warn!("Progress rejected: missing resource id");
        return Err(ApiError::validation("Resource ID is required"));
    };
    request.validate()?;

    let status = present_text(request.status)
        .map(|raw| raw.parse::<ProgressStatus>())
        .transpose()
        .map_err(ApiError::Validation)?;

    if learning_resource::Entity::find_by_id(resource_id)
        .one(&state.db)
        .await?
        .is_none()
    {
        warn!("Progress rejected: resource {} does not exist", resource_id);
        return Err(ApiError::NotFound("Resource not found".to_string()));
    }

    let completed_now = (status == Some(ProgressStatus::Completed)).then(|| Utc::now().naive_utc());

    let existing = user_learning_progress::Entity::find()
        .filter(user_learning_progress::Column::UserId.eq(user.id))
        .filter(user_learning_progress::Column::ResourceId.eq(resource_id))
        .one(&state.db)
        .await?;

    match existing {
        Some(progress) => {
            debug!("Updating progress {} for user {}", progress.id, user.id);
            let mut active: user_learning_progress::ActiveModel = progress.into();
            if let Some(status) = status {
                active.status = Set(status);
            }
            if let Some(percentage) = request.progress_percentage {
                active.progress_percentage = Set(percentage);
            }
            if completed_now.is_some() {
                active.completed_at = Set(completed_now);
            }
            if active.is_changed() {
                active.update(&state.db).await?;
            }

            info!("Progress updated for user {} on resource {}", user.id, resource_id);
            Ok(Json(MessageResponse {
                message: "Progress updated successfully".to_string(),
            })
            .into_response())
        }
        None => {
            debug!("Recording first progress for user {} on resource {}", user.id, resource_id);
            let new_progress = user_learning_progress::ActiveModel {
                user_id: Set(user.id),
                resource_id: Set(resource_id),
                status: Set(status.unwrap_or(ProgressStatus::NotStarted)),
                progress_percentage: Set(request.progress_percentage.unwrap_or(0)),
                completed_at: Set(completed_now),
                ..Default::default()
            };
            let progress_model = new_progress.insert(&state.db).await?;

            info!("Progress recorded with ID: {}", progress_model.id);
            Ok((
                StatusCode::CREATED,
                Json(CreatedResponse::new("Progress recorded successfully", progress_model.id)),
            )
                .into_response())
        }
    }
}
