use common::{
    ChatReply, CreatedResponse, CropPriceGroup, ExpenseTotal, Language, MarketPriceRecord,
    MessageResponse, ResourceTotal,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi, ToSchema,
};

use crate::config::AuthConfig;
use crate::handlers::{
    auth::{AuthResponse, LoginRequest, RegisterRequest, UserResponse},
    chatbot::ChatRequest,
    crops::{CreateCropRequest, CropResponse},
    diary::{CreateDiaryEntryRequest, DiaryEntryResponse},
    expenses::{CreateExpenseRequest, ExpenseResponse},
    farms::{CreateFarmRequest, FarmDetailResponse, FarmResponse},
    learning::{LearningQuery, LearningResourceResponse, ProgressResponse, UpsertProgressRequest},
    market_prices::{CreateMarketPriceRequest, MarketPriceQuery, MarketPriceResponse},
    marketplace::{
        BuyerListingQuery, BuyerListingsResponse, CreateListingRequest, ListingResponse,
        ListingWithSellerResponse,
    },
    resources::{CreateResourceUsageRequest, ResourceUsageResponse},
    yield_records::{CreateYieldRecordRequest, YieldRecordResponse},
};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Token signing and password hashing settings
    pub auth: AuthConfig,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `OK` while the process serves requests
    pub status: String,
    pub message: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Registers the bearer token scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::farms::get_farms,
        crate::handlers::farms::create_farm,
        crate::handlers::farms::get_farm,
        crate::handlers::crops::get_farm_crops,
        crate::handlers::crops::create_crop,
        crate::handlers::expenses::get_farm_expenses,
        crate::handlers::expenses::create_expense,
        crate::handlers::expenses::get_expense_summary,
        crate::handlers::diary::get_farm_diary,
        crate::handlers::diary::create_diary_entry,
        crate::handlers::yield_records::get_crop_yields,
        crate::handlers::yield_records::create_yield_record,
        crate::handlers::resources::get_farm_resources,
        crate::handlers::resources::create_resource_usage,
        crate::handlers::resources::get_resource_summary,
        crate::handlers::marketplace::get_listings,
        crate::handlers::marketplace::get_my_listings,
        crate::handlers::marketplace::create_listing,
        crate::handlers::marketplace::get_buyer_listings,
        crate::handlers::market_prices::get_market_prices,
        crate::handlers::market_prices::get_latest_market_prices,
        crate::handlers::market_prices::create_market_price,
        crate::handlers::learning::get_resources,
        crate::handlers::learning::get_resource,
        crate::handlers::learning::get_my_progress,
        crate::handlers::learning::upsert_progress,
        crate::handlers::chatbot::chat,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            CreatedResponse,
            MessageResponse,
            RegisterRequest,
            LoginRequest,
            UserResponse,
            AuthResponse,
            CreateFarmRequest,
            FarmResponse,
            FarmDetailResponse,
            CreateCropRequest,
            CropResponse,
            CreateExpenseRequest,
            ExpenseResponse,
            ExpenseTotal,
            CreateDiaryEntryRequest,
            DiaryEntryResponse,
            CreateYieldRecordRequest,
            YieldRecordResponse,
            CreateResourceUsageRequest,
            ResourceUsageResponse,
            ResourceTotal,
            CreateListingRequest,
            ListingResponse,
            ListingWithSellerResponse,
            BuyerListingQuery,
            BuyerListingsResponse,
            MarketPriceQuery,
            CreateMarketPriceRequest,
            MarketPriceResponse,
            MarketPriceRecord,
            CropPriceGroup,
            LearningQuery,
            LearningResourceResponse,
            UpsertProgressRequest,
            ProgressResponse,
            ChatRequest,
            ChatReply,
            Language,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and login"),
        (name = "farms", description = "Farms owned by the caller"),
        (name = "crops", description = "Crops planted on farms"),
        (name = "expenses", description = "Farm expenses and summaries"),
        (name = "diary", description = "Farm diary entries"),
        (name = "yield", description = "Harvest yield records"),
        (name = "resources", description = "Water, fertilizer, pesticide and electricity usage"),
        (name = "marketplace", description = "Produce listings for buyers"),
        (name = "market-prices", description = "Mandi price observations"),
        (name = "learning", description = "Learning resources and progress"),
        (name = "chatbot", description = "Rule-based farming assistant"),
    ),
    info(
        title = "FarmConnect API",
        description = "Farm management backend for farmers and buyers",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
