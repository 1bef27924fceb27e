use rust_decimal::Decimal;

/// A required text field: blank or whitespace-only counts as missing.
pub fn present_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A required numeric field: zero counts as missing.
pub fn present_amount(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

/// A required reference id: zero counts as missing.
pub fn present_id(value: Option<i32>) -> Option<i32> {
    value.filter(|v| *v != 0)
}
