//! Per-group totals for farm expense and resource logs.

use std::collections::BTreeMap;

use common::{ExpenseTotal, ResourceTotal};
use rust_decimal::Decimal;

use crate::error::{ComputeError, Result};

fn add_to(
    totals: &mut BTreeMap<(String, String), Decimal>,
    key: (String, String),
    value: Decimal,
    what: &str,
) -> Result<()> {
    let entry = totals.entry(key).or_insert(Decimal::ZERO);
    *entry = entry
        .checked_add(value)
        .ok_or_else(|| ComputeError::Overflow(what.to_string()))?;
    Ok(())
}

/// Total amount per expense type, ordered by type.
pub fn summarize_expenses<I>(rows: I) -> Result<Vec<ExpenseTotal>>
where
    I: IntoIterator<Item = (String, Decimal)>,
{
    let mut totals = BTreeMap::new();
    for (expense_type, amount) in rows {
        add_to(&mut totals, (expense_type, String::new()), amount, "expenses")?;
    }

    Ok(totals
        .into_iter()
        .map(|((expense_type, _), total)| ExpenseTotal { expense_type, total })
        .collect())
}

/// Total quantity per resource type and unit, ordered by type then unit.
///
/// Quantities in different units are never added together.
pub fn summarize_resources<I>(rows: I) -> Result<Vec<ResourceTotal>>
where
    I: IntoIterator<Item = (String, String, Decimal)>,
{
    let mut totals = BTreeMap::new();
    for (resource_type, unit, quantity) in rows {
        add_to(&mut totals, (resource_type, unit), quantity, "resource usage")?;
    }

    Ok(totals
        .into_iter()
        .map(|((resource_type, unit), total)| ResourceTotal {
            resource_type,
            unit,
            total,
        })
        .collect())
}
