use crate::handlers::{
    auth::{login, register},
    chatbot::chat,
    crops::{create_crop, get_farm_crops},
    diary::{create_diary_entry, get_farm_diary},
    expenses::{create_expense, get_expense_summary, get_farm_expenses},
    farms::{create_farm, get_farm, get_farms},
    health::health_check,
    learning::{get_my_progress, get_resource, get_resources, upsert_progress},
    market_prices::{create_market_price, get_latest_market_prices, get_market_prices},
    marketplace::{create_listing, get_buyer_listings, get_listings, get_my_listings},
    resources::{create_resource_usage, get_farm_resources, get_resource_summary},
    yield_records::{create_yield_record, get_crop_yields},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(health_check))
        // Authentication
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        // Farms and crops
        .route("/api/farms", get(get_farms).post(create_farm))
        .route("/api/farms/:id", get(get_farm))
        .route("/api/crops", post(create_crop))
        .route("/api/crops/farm/:farm_id", get(get_farm_crops))
        // Farm records
        .route("/api/expenses", post(create_expense))
        .route("/api/expenses/farm/:farm_id", get(get_farm_expenses))
        .route("/api/expenses/summary/farm/:farm_id", get(get_expense_summary))
        .route("/api/diary", post(create_diary_entry))
        .route("/api/diary/farm/:farm_id", get(get_farm_diary))
        .route("/api/yield", post(create_yield_record))
        .route("/api/yield/crop/:crop_id", get(get_crop_yields))
        .route("/api/resources", post(create_resource_usage))
        .route("/api/resources/farm/:farm_id", get(get_farm_resources))
        .route("/api/resources/summary/farm/:farm_id", get(get_resource_summary))
        // Marketplace
        .route("/api/marketplace", get(get_listings).post(create_listing))
        .route("/api/marketplace/my-listings", get(get_my_listings))
        .route("/api/buyer/marketplaces", get(get_buyer_listings))
        // Market prices
        .route("/api/market-prices", get(get_market_prices).post(create_market_price))
        .route("/api/market-prices/latest", get(get_latest_market_prices))
        // Learning
        .route("/api/learning", get(get_resources))
        .route("/api/learning/:id", get(get_resource))
        .route("/api/learning/progress", post(upsert_progress))
        .route("/api/learning/progress/my-progress", get(get_my_progress))
        // Chatbot
        .route("/api/chatbot", post(chat))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
