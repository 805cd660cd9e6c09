//! Display rounding of quantities.
//!
//! Rounding only happens here, when text is rendered; stored and aggregated quantities keep
//! full precision.

/// Render a quantity with precision depending on its magnitude.
///
/// Whole numbers and values of 10 or more print without decimals, values below 10 with one
/// decimal and values below 1 with two. Trailing zeros are trimmed.
pub fn format_quantity(quantity: f64) -> String {
    let magnitude = quantity.abs();
    let decimals = if quantity.fract() == 0.0 || magnitude >= 10.0 {
        0
    } else if magnitude < 1.0 {
        2
    } else {
        1
    };

    let rendered = format!("{:.*}", decimals, quantity);
    if rendered.contains('.') {
        rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        rendered
    }
}

/// `format_quantity` followed by the singular or plural unit form.
///
/// Quantities up to 1 take the singular form.
pub fn format_with_unit(quantity: f64, singular: &str, plural: &str) -> String {
    let form = if quantity.abs() <= 1.0 { singular } else { plural };
    format!("{} {}", format_quantity(quantity), form)
}
