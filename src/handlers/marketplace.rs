use crate::error::{ApiError, ApiResult};
use crate::helpers::{
    extract::JsonBody,
    lenient,
    ownership::ensure_crop_owned,
    validation::{present_amount, present_id, present_text},
};
use crate::middleware::auth::AuthUser;
use crate::schemas::{AppState, ErrorResponse};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::NaiveDateTime;
use common::CreatedResponse;
use model::entities::{
    marketplace_listing::{self, ListingStatus},
    user,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

const DEFAULT_UNIT: &str = "kg";
const BUYER_LISTING_LIMIT: u64 = 200;

/// Request body for listing produce for sale
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateListingRequest {
    /// Optional link to one of the seller's own crops
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub crop_id: Option<i32>,
    pub crop_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub quantity: Option<Decimal>,
    /// Defaults to `kg`
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub price_per_kg: Option<Decimal>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Filters for the buyer view of the marketplace
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct BuyerListingQuery {
    /// Substring of the crop name
    #[validate(length(max = 100))]
    pub crop_name: Option<String>,
    /// Substring of the seller's location
    #[validate(length(max = 100))]
    pub location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListingResponse {
    pub id: i32,
    pub seller_id: i32,
    pub crop_id: Option<i32>,
    pub crop_name: String,
    pub quantity: Decimal,
    pub unit: String,
    pub price_per_kg: Decimal,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl From<marketplace_listing::Model> for ListingResponse {
    fn from(model: marketplace_listing::Model) -> Self {
        Self {
            id: model.id,
            seller_id: model.seller_id,
            crop_id: model.crop_id,
            crop_name: model.crop_name,
            quantity: model.quantity,
            unit: model.unit,
            price_per_kg: model.price_per_kg,
            location: model.location,
            description: model.description,
            status: model.status.as_str().to_string(),
            created_at: model.created_at,
        }
    }
}

/// A listing with the seller's contact details
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListingWithSellerResponse {
    #[serde(flatten)]
    pub listing: ListingResponse,
    pub seller_name: Option<String>,
    pub seller_email: Option<String>,
    pub seller_phone: Option<String>,
    pub seller_location: Option<String>,
}

impl From<(marketplace_listing::Model, Option<user::Model>)> for ListingWithSellerResponse {
    fn from((listing, seller): (marketplace_listing::Model, Option<user::Model>)) -> Self {
        let (seller_name, seller_email, seller_phone, seller_location) = match seller {
            Some(seller) => (Some(seller.name), Some(seller.email), seller.phone, seller.location),
            None => (None, None, None, None),
        };
        Self {
            listing: ListingResponse::from(listing),
            seller_name,
            seller_email,
            seller_phone,
            seller_location,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BuyerListingsResponse {
    pub listings: Vec<ListingWithSellerResponse>,
}

/// Available listings with seller contact, newest first
#[utoipa::path(
    get,
    path = "/api/marketplace",
    tag = "marketplace",
    responses(
        (status = 200, description = "Available listings", body = Vec<ListingWithSellerResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_listings(State(state): State<AppState>) -> ApiResult<Json<Vec<ListingWithSellerResponse>>> {
    trace!("Entering get_listings function");

    let listings = marketplace_listing::Entity::find()
        .find_also_related(user::Entity)
        .filter(marketplace_listing::Column::Status.eq(ListingStatus::Available))
        .order_by_desc(marketplace_listing::Column::CreatedAt)
        .order_by_desc(marketplace_listing::Column::Id)
        .all(&state.db)
        .await?;

    info!("Retrieved {} available listings", listings.len());
    Ok(Json(listings.into_iter().map(ListingWithSellerResponse::from).collect()))
}

/// The caller's own listings, newest first
#[utoipa::path(
    get,
    path = "/api/marketplace/my-listings",
    tag = "marketplace",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Listings created by the caller", body = Vec<ListingResponse>),
        (status = 401, description = "Missing token", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_my_listings(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<Vec<ListingResponse>>> {
    trace!("Entering get_my_listings function");

    let listings = marketplace_listing::Entity::find()
        .filter(marketplace_listing::Column::SellerId.eq(user.id))
        .order_by_desc(marketplace_listing::Column::CreatedAt)
        .order_by_desc(marketplace_listing::Column::Id)
        .all(&state.db)
        .await?;

    info!("Retrieved {} listings for seller {}", listings.len(), user.id);
    Ok(Json(listings.into_iter().map(ListingResponse::from).collect()))
}

/// Put produce up for sale
#[utoipa::path(
    post,
    path = "/api/marketplace",
    tag = "marketplace",
    security(("bearer_auth" = [])),
    request_body = CreateListingRequest,
    responses(
        (status = 201, description = "Listing created", body = CreatedResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 403, description = "Linked crop not found or access denied", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_listing(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(request): JsonBody<CreateListingRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    trace!("Entering create_listing function");

    let (Some(crop_name), Some(quantity), Some(price_per_kg)) = (
        present_text(request.crop_name),
        present_amount(request.quantity),
        present_amount(request.price_per_kg),
    ) else {
        warn!("Listing rejected: missing required fields");
        return Err(ApiError::validation("Crop name, quantity, and price are required"));
    };

    let crop_id = present_id(request.crop_id);
    if let Some(crop_id) = crop_id {
        ensure_crop_owned(&state.db, crop_id, user.id).await?;
    }

    let unit = present_text(request.unit).unwrap_or_else(|| DEFAULT_UNIT.to_string());
    debug!("Listing {} {} of '{}' at {} per kg", quantity, unit, crop_name, price_per_kg);

    let new_listing = marketplace_listing::ActiveModel {
        seller_id: Set(user.id),
        crop_id: Set(crop_id),
        crop_name: Set(crop_name),
        quantity: Set(quantity),
        unit: Set(unit),
        price_per_kg: Set(price_per_kg),
        location: Set(present_text(request.location)),
        description: Set(present_text(request.description)),
        status: Set(ListingStatus::Available),
        ..Default::default()
    };
    let listing_model = new_listing.insert(&state.db).await?;

    info!("Listing created with ID: {}", listing_model.id);
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Listing created successfully", listing_model.id)),
    ))
}

/// Buyer view: every listing with seller contact, filterable by crop and seller location
#[utoipa::path(
    get,
    path = "/api/buyer/marketplaces",
    tag = "marketplace",
    security(("bearer_auth" = [])),
    params(BuyerListingQuery),
    responses(
        (status = 200, description = "At most 200 listings, newest first", body = BuyerListingsResponse),
        (status = 401, description = "Missing token", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_buyer_listings(
    Valid(Query(query)): Valid<Query<BuyerListingQuery>>,
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<BuyerListingsResponse>> {
    trace!("Entering get_buyer_listings function for user {}", user.id);

    let mut query_builder = marketplace_listing::Entity::find().find_also_related(user::Entity);

    // Apply filters
    if let Some(crop_name) = present_text(query.crop_name) {
        debug!("Filtering listings by crop name '{}'", crop_name);
        query_builder = query_builder.filter(marketplace_listing::Column::CropName.contains(crop_name.trim()));
    }
    if let Some(location) = present_text(query.location) {
        debug!("Filtering listings by seller location '{}'", location);
        query_builder = query_builder.filter(user::Column::Location.contains(location.trim()));
    }

    let listings = query_builder
        .order_by_desc(marketplace_listing::Column::CreatedAt)
        .order_by_desc(marketplace_listing::Column::Id)
        .limit(BUYER_LISTING_LIMIT)
        .all(&state.db)
        .await?;

    info!("Retrieved {} listings for buyer view", listings.len());
    Ok(Json(BuyerListingsResponse {
        listings: listings.into_iter().map(ListingWithSellerResponse::from).collect(),
    }))
}
