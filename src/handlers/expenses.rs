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
use common::{CreatedResponse, ExpenseTotal};
use compute::summary::summarize_expenses;
use model::entities::{expense, farm};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for recording an expense
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateExpenseRequest {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub farm_id: Option<i32>,
    /// Free-form category such as `seeds` or `labour`
    pub expense_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub expense_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseResponse {
    pub id: i32,
    pub farm_id: i32,
    pub expense_type: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub expense_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl From<expense::Model> for ExpenseResponse {
    fn from(model: expense::Model) -> Self {
        Self {
            id: model.id,
            farm_id: model.farm_id,
            expense_type: model.expense_type,
            amount: model.amount,
            description: model.description,
            expense_date: model.expense_date,
            created_at: model.created_at,
        }
    }
}

/// Expenses of one of the caller's farms, newest first
#[utoipa::path(
    get,
    path = "/api/expenses/farm/{farm_id}",
    tag = "expenses",
    security(("bearer_auth" = [])),
    params(
        ("farm_id" = i32, Path, description = "Farm ID"),
    ),
    responses(
        (status = 200, description = "Expenses ordered by date descending", body = Vec<ExpenseResponse>),
        (status = 401, description = "Missing token", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_farm_expenses(
    PathParam(farm_id): PathParam<i32>,
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<ExpenseResponse>>> {
    trace!("Entering get_farm_expenses function for farm_id: {}", farm_id);

    let expenses = owned_expenses(&state, farm_id, user.id).await?;

    info!("Retrieved {} expenses for farm {}", expenses.len(), farm_id);
    Ok(Json(expenses.into_iter().map(ExpenseResponse::from).collect()))
}

/// Record an expense against one of the caller's farms
#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "expenses",
    security(("bearer_auth" = [])),
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense added", body = CreatedResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 403, description = "Farm not found or access denied", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_expense(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(request): JsonBody<CreateExpenseRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    trace!("Entering create_expense function");

    let (Some(farm_id), Some(expense_type), Some(amount), Some(expense_date)) = (
        present_id(request.farm_id),
        present_text(request.expense_type),
        present_amount(request.amount),
        request.expense_date,
    ) else {
        warn!("Expense rejected: missing required fields");
        return Err(ApiError::validation(
            "Farm ID, expense type, amount, and date are required",
        ));
    };

    ensure_farm_owned(&state.db, farm_id, user.id).await?;
    debug!("Recording {} expense of {} on farm {}", expense_type, amount, farm_id);

    let new_expense = expense::ActiveModel {
        farm_id: Set(farm_id),
        expense_type: Set(expense_type),
        amount: Set(amount),
        description: Set(present_text(request.description)),
        expense_date: Set(expense_date),
        ..Default::default()
    };
    let expense_model = new_expense.insert(&state.db).await?;

    info!("Expense created with ID: {}", expense_model.id);
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Expense added successfully", expense_model.id)),
    ))
}

/// Total spend per expense type for one of the caller's farms
#[utoipa::path(
    get,
    path = "/api/expenses/summary/farm/{farm_id}",
    tag = "expenses",
    security(("bearer_auth" = [])),
    params(
        ("farm_id" = i32, Path, description = "Farm ID"),
    ),
    responses(
        (status = 200, description = "Totals per expense type", body = Vec<ExpenseTotal>),
        (status = 401, description = "Missing token", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_expense_summary(
    PathParam(farm_id): PathParam<i32>,
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<ExpenseTotal>>> {
    trace!("Entering get_expense_summary function for farm_id: {}", farm_id);

    let expenses = owned_expenses(&state, farm_id, user.id).await?;
    let summary = summarize_expenses(expenses.into_iter().map(|e| (e.expense_type, e.amount)))?;

    info!("Summarized expenses for farm {} into {} groups", farm_id, summary.len());
    Ok(Json(summary))
}

async fn owned_expenses(state: &AppState, farm_id: i32, user_id: i32) -> ApiResult<Vec<expense::Model>> {
    let expenses = expense::Entity::find()
        .inner_join(farm::Entity)
        .filter(expense::Column::FarmId.eq(farm_id))
        .filter(farm::Column::UserId.eq(user_id))
        .order_by_desc(expense::Column::ExpenseDate)
        .order_by_desc(expense::Column::Id)
        .all(&state.db)
        .await?;
    Ok(expenses)
}
