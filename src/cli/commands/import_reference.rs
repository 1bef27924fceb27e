use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, trace, warn};

use model::entities::{learning_resource, market_price};

use crate::config::connect_database;

const DEFAULT_LANGUAGE: &str = "en";

/// Reference data file layout
#[derive(Debug, Default, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub market_prices: Vec<MarketPriceSeed>,
    #[serde(default)]
    pub learning_resources: Vec<LearningResourceSeed>,
}

#[derive(Debug, Deserialize)]
pub struct MarketPriceSeed {
    pub crop_name: String,
    pub mandi_name: String,
    pub price_per_kg: Decimal,
    pub price_date: NaiveDate,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LearningResourceSeed {
    pub title: String,
    pub description: Option<String>,
    pub content_type: String,
    pub category: String,
    pub language: Option<String>,
    pub tags: Option<String>,
    pub content: Option<String>,
    pub video_url: Option<String>,
}

/// Rows written by one import run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub market_prices: usize,
    pub learning_resources: usize,
    pub skipped: usize,
}

pub async fn import_reference(json_path: &str, database_url: &str) -> Result<()> {
    trace!("Entering import_reference function");
    info!("Starting reference data import");
    debug!("JSON path: {}", json_path);

    let db = connect_database(database_url)
        .await
        .context("Failed to connect to database")?;

    // Load JSON file
    let file = File::open(Path::new(json_path))
        .with_context(|| format!("Failed to open file: {}", json_path))?;
    info!("Parsing JSON data...");
    let data: ReferenceData = serde_json::from_reader(file).context("Failed to parse JSON")?;
    info!(
        "Loaded {} market prices and {} learning resources",
        data.market_prices.len(),
        data.learning_resources.len()
    );

    let summary = import_reference_data(&db, data).await?;

    info!("Reference data import completed successfully!");
    info!("Summary:");
    info!("  - Market prices: {}", summary.market_prices);
    info!("  - Learning resources: {}", summary.learning_resources);
    info!("  - Skipped: {}", summary.skipped);
    Ok(())
}

/// Insert every usable seed row; rows with blank names or a zero price are skipped.
pub async fn import_reference_data(db: &DatabaseConnection, data: ReferenceData) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    info!("Importing market prices...");
    for seed in data.market_prices {
        if seed.crop_name.trim().is_empty() || seed.mandi_name.trim().is_empty() || seed.price_per_kg.is_zero() {
            warn!("Skipping incomplete market price {:?}", seed);
            summary.skipped += 1;
            continue;
        }

        market_price::ActiveModel {
            crop_name: Set(seed.crop_name),
            mandi_name: Set(seed.mandi_name),
            price_per_kg: Set(seed.price_per_kg),
            price_date: Set(seed.price_date),
            location: Set(seed.location.filter(|l| !l.trim().is_empty())),
            ..Default::default()
        }
        .insert(db)
        .await
        .context("Failed to insert market price")?;
        summary.market_prices += 1;
    }
    info!("Imported {} market prices", summary.market_prices);

    info!("Importing learning resources...");
    for seed in data.learning_resources {
        if seed.title.trim().is_empty() || seed.category.trim().is_empty() {
            warn!("Skipping learning resource without title or category: {:?}", seed.title);
            summary.skipped += 1;
            continue;
        }

        let language = seed
            .language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        learning_resource::ActiveModel {
            title: Set(seed.title),
            description: Set(seed.description),
            content_type: Set(seed.content_type),
            category: Set(seed.category),
            language: Set(language),
            tags: Set(seed.tags),
            content: Set(seed.content),
            video_url: Set(seed.video_url),
            ..Default::default()
        }
        .insert(db)
        .await
        .context("Failed to insert learning resource")?;
        summary.learning_resources += 1;
    }
    info!("Imported {} learning resources", summary.learning_resources);

    Ok(summary)
}
