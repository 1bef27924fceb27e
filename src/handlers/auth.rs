use crate::error::{ApiError, ApiResult};
use crate::helpers::{extract::JsonBody, validation::present_text};
use crate::middleware::auth::issue_token;
use crate::schemas::{AppState, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::NaiveDateTime;
use model::entities::user::{self, UserType};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for registering a new account
#[derive(Deserialize, Serialize, ToSchema, Validate)]
pub struct RegisterRequest {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    /// `farmer` (default) or `buyer`
    pub user_type: Option<String>,
}

/// Request body for logging in
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public view of a user account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub user_type: String,
    pub created_at: NaiveDateTime,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            location: model.location,
            user_type: model.user_type.as_str().to_string(),
            created_at: model.created_at,
        }
    }
}

/// Returned by register and login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

/// Register a new farmer or buyer
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Missing fields or user already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(mut request): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    trace!("Entering register function");

    let (Some(name), Some(email), Some(password)) = (
        present_text(request.name.clone()),
        present_text(request.email.clone()),
        present_text(request.password.clone()),
    ) else {
        warn!("Registration rejected: missing required fields");
        return Err(ApiError::validation("Name, email, and password are required"));
    };
    // Validate the address that will be stored
    let email = email.trim().to_string();
    request.email = Some(email.clone());
    request.validate()?;

    let user_type = match present_text(request.user_type) {
        Some(raw) => raw.parse::<UserType>().map_err(ApiError::Validation)?,
        None => UserType::Farmer,
    };
    debug!("Registering {} as {}", email, user_type.as_str());

    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        warn!("Registration rejected: {} already exists", email);
        return Err(ApiError::validation("User already exists"));
    }

    let password_hash = bcrypt::hash(&password, state.auth.bcrypt_cost)?;

    let new_user = user::ActiveModel {
        name: Set(name),
        email: Set(email),
        password_hash: Set(password_hash),
        phone: Set(present_text(request.phone)),
        location: Set(present_text(request.location)),
        user_type: Set(user_type),
        ..Default::default()
    };
    let user_model = new_user.insert(&state.db).await?;
    let token = issue_token(&user_model, &state.auth)?;

    info!("User registered with ID: {}", user_model.id);
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::from(user_model),
            token,
        }),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    trace!("Entering login function");

    let (Some(email), Some(password)) = (present_text(request.email), present_text(request.password)) else {
        warn!("Login rejected: missing credentials");
        return Err(ApiError::validation("Email and password are required"));
    };
    let email = email.trim().to_string();

    let Some(user_model) = user::Entity::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(&state.db)
        .await?
    else {
        warn!("Login failed: unknown email {}", email);
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    };

    if !bcrypt::verify(&password, &user_model.password_hash)? {
        warn!("Login failed: wrong password for user {}", user_model.id);
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = issue_token(&user_model, &state.auth)?;
    info!("User {} logged in", user_model.id);
    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user: UserResponse::from(user_model),
        token,
    }))
}
