use crate::error::{ApiError, ApiResult};
use crate::helpers::{
    extract::JsonBody,
    lenient,
    validation::{present_amount, present_text},
};
use crate::schemas::{AppState, ErrorResponse};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{NaiveDate, NaiveDateTime};
use common::{CreatedResponse, CropPriceGroup, MarketPriceRecord};
use compute::market_prices::{latest_price_groups, PriceFilter};
use model::entities::market_price;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

const PRICE_LIST_LIMIT: u64 = 100;

/// Filters shared by the flat and grouped price views
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct MarketPriceQuery {
    /// Substring of the crop name
    #[validate(length(max = 100))]
    pub crop_name: Option<String>,
    /// Substring of the mandi location
    #[validate(length(max = 100))]
    pub location: Option<String>,
}

/// Request body for publishing a mandi price
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateMarketPriceRequest {
    pub crop_name: Option<String>,
    pub mandi_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub price_per_kg: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub price_date: Option<NaiveDate>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarketPriceResponse {
    pub id: i32,
    pub crop_name: String,
    pub mandi_name: String,
    pub price_per_kg: Decimal,
    pub price_date: NaiveDate,
    pub location: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<market_price::Model> for MarketPriceResponse {
    fn from(model: market_price::Model) -> Self {
        Self {
            id: model.id,
            crop_name: model.crop_name,
            mandi_name: model.mandi_name,
            price_per_kg: model.price_per_kg,
            price_date: model.price_date,
            location: model.location,
            created_at: model.created_at,
        }
    }
}

fn to_record(model: market_price::Model) -> MarketPriceRecord {
    MarketPriceRecord {
        id: model.id,
        crop_name: model.crop_name,
        mandi_name: model.mandi_name,
        price_per_kg: model.price_per_kg,
        price_date: model.price_date,
        location: model.location,
    }
}

/// Recent mandi prices, newest first
#[utoipa::path(
    get,
    path = "/api/market-prices",
    tag = "market-prices",
    params(MarketPriceQuery),
    responses(
        (status = 200, description = "At most 100 prices ordered by date descending", body = Vec<MarketPriceResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_market_prices(
    Valid(Query(query)): Valid<Query<MarketPriceQuery>>,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<MarketPriceResponse>>> {
    trace!("Entering get_market_prices function");

    let mut query_builder = market_price::Entity::find();

    // Apply filters
    if let Some(crop_name) = present_text(query.crop_name) {
        debug!("Filtering prices by crop name '{}'", crop_name);
        query_builder = query_builder.filter(market_price::Column::CropName.contains(crop_name.trim()));
    }
    if let Some(location) = present_text(query.location) {
        debug!("Filtering prices by location '{}'", location);
        query_builder = query_builder.filter(market_price::Column::Location.contains(location.trim()));
    }

    let prices = query_builder
        .order_by_desc(market_price::Column::PriceDate)
        .order_by_desc(market_price::Column::Id)
        .limit(PRICE_LIST_LIMIT)
        .all(&state.db)
        .await?;

    info!("Retrieved {} market prices", prices.len());
    Ok(Json(prices.into_iter().map(MarketPriceResponse::from).collect()))
}

/// Latest price per mandi, grouped by crop with min and max
#[utoipa::path(
    get,
    path = "/api/market-prices/latest",
    tag = "market-prices",
    params(MarketPriceQuery),
    responses(
        (status = 200, description = "One group per crop", body = Vec<CropPriceGroup>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_latest_market_prices(
    Valid(Query(query)): Valid<Query<MarketPriceQuery>>,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CropPriceGroup>>> {
    trace!("Entering get_latest_market_prices function");

    // Insertion order breaks ties between records of the same date.
    let prices = market_price::Entity::find()
        .order_by_desc(market_price::Column::PriceDate)
        .order_by_asc(market_price::Column::Id)
        .all(&state.db)
        .await?;
    debug!("Loaded {} price records for grouping", prices.len());

    let filter = PriceFilter {
        crop_name: query.crop_name,
        location: query.location,
    };
    let groups = latest_price_groups(prices.into_iter().map(to_record).collect(), &filter);

    info!("Grouped latest prices into {} crops", groups.len());
    Ok(Json(groups))
}

/// Publish a mandi price observation
#[utoipa::path(
    post,
    path = "/api/market-prices",
    tag = "market-prices",
    request_body = CreateMarketPriceRequest,
    responses(
        (status = 201, description = "Market price added", body = CreatedResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_market_price(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateMarketPriceRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    trace!("Entering create_market_price function");

    let (Some(crop_name), Some(mandi_name), Some(price_per_kg), Some(price_date)) = (
        present_text(request.crop_name),
        present_text(request.mandi_name),
        present_amount(request.price_per_kg),
        request.price_date,
    ) else {
        warn!("Market price rejected: missing required fields");
        return Err(ApiError::validation("All fields are required"));
    };
    debug!("Recording {} at {} on {}: {}", crop_name, mandi_name, price_date, price_per_kg);

    let new_price = market_price::ActiveModel {
        crop_name: Set(crop_name),
        mandi_name: Set(mandi_name),
        price_per_kg: Set(price_per_kg),
        price_date: Set(price_date),
        location: Set(present_text(request.location)),
        ..Default::default()
    };
    let price_model = new_price.insert(&state.db).await?;

    info!("Market price created with ID: {}", price_model.id);
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Market price added successfully", price_model.id)),
    ))
}
