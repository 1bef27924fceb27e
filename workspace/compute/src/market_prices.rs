//! Latest-price views over mandi price observations.

use std::collections::HashMap;

use common::{CropPriceGroup, MarketPriceRecord};
use tracing::{debug, instrument};

/// Optional substring filters, both case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceFilter {
    pub crop_name: Option<String>,
    /// Matches the record location; records without one are dropped
    pub location: Option<String>,
}

impl PriceFilter {
    fn accepts(&self, record: &MarketPriceRecord) -> bool {
        let crop_ok = match self.crop_name.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => contains_ignore_case(&record.crop_name, needle),
            _ => true,
        };
        let location_ok = match self.location.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => record
                .location
                .as_deref()
                .is_some_and(|location| contains_ignore_case(location, needle)),
            _ => true,
        };
        crop_ok && location_ok
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Grouping key for crop and mandi names: trimmed, inner whitespace collapsed,
/// lower-cased.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Keeps the newest record for every (crop, mandi) pair, newest first.
///
/// When two records of a pair share the same date the one seen first stays.
pub fn latest_per_mandi(records: Vec<MarketPriceRecord>) -> Vec<MarketPriceRecord> {
    let mut positions: HashMap<(String, String), usize> = HashMap::new();
    let mut latest: Vec<MarketPriceRecord> = Vec::new();

    for record in records {
        let key = (
            normalize_name(&record.crop_name),
            normalize_name(&record.mandi_name),
        );
        match positions.get(&key) {
            Some(&index) => {
                if record.price_date > latest[index].price_date {
                    latest[index] = record;
                }
            }
            None => {
                positions.insert(key, latest.len());
                latest.push(record);
            }
        }
    }

    latest.sort_by(|a, b| b.price_date.cmp(&a.price_date));
    latest
}

/// Groups records by crop, in order of first appearance, with each crop's rows
/// sorted by price descending.
pub fn group_by_crop(records: Vec<MarketPriceRecord>) -> Vec<CropPriceGroup> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, Vec<MarketPriceRecord>)> = Vec::new();

    for record in records {
        let key = normalize_name(&record.crop_name);
        match positions.get(&key) {
            Some(&index) => buckets[index].1.push(record),
            None => {
                positions.insert(key, buckets.len());
                buckets.push((record.crop_name.clone(), vec![record]));
            }
        }
    }

    buckets
        .into_iter()
        .filter_map(|(crop_name, mut prices)| {
            prices.sort_by(|a, b| b.price_per_kg.cmp(&a.price_per_kg));
            // Sorted descending, so the ends are the extremes
            let max_price = prices.first()?.price_per_kg;
            let min_price = prices.last()?.price_per_kg;
            Some(CropPriceGroup {
                crop_name,
                prices,
                min_price,
                max_price,
            })
        })
        .collect()
}

/// Filter, deduplicate per mandi, then group per crop.
#[instrument(skip(records), fields(records = records.len()))]
pub fn latest_price_groups(
    records: Vec<MarketPriceRecord>,
    filter: &PriceFilter,
) -> Vec<CropPriceGroup> {
    let filtered: Vec<MarketPriceRecord> =
        records.into_iter().filter(|r| filter.accepts(r)).collect();
    debug!("{} price records left after filtering", filtered.len());

    let latest = latest_per_mandi(filtered);
    debug!("{} latest prices across mandis", latest.len());

    group_by_crop(latest)
}
