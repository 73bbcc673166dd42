//! Unit conversion utilities
//!
//! Cabinet parameters are entered in inches. The scene works in units of
//! one foot (12 in), and the cost model prices surfaces and volumes in
//! feet. Dimension input accepts decimal and fractional inches.

use crate::error::CabinetError;

/// Inches per scene unit (one scene unit is one foot)
pub const INCHES_PER_UNIT: f64 = 12.0;

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Convert inches to scene units
pub fn inches_to_units(inches: f64) -> f64 {
    inches / INCHES_PER_UNIT
}

/// Convert inches to feet
pub fn inches_to_feet(inches: f64) -> f64 {
    inches / INCHES_PER_FOOT
}

/// Round a currency amount to whole cents
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Format a currency amount for display, e.g. `$294.00`
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", round_currency(amount))
}

/// Format an inch value for display, e.g. `23.5"`
pub fn format_inches(inches: f64) -> String {
    let text = format!("{:.3}", inches);
    format!("{}\"", text.trim_end_matches('0').trim_end_matches('.'))
}

/// Check that a dimension is a positive finite number of inches
pub fn validate_dimension(dimension: &'static str, value: f64) -> Result<f64, CabinetError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CabinetError::InvalidDimension { dimension, value })
    }
}

/// Parse a dimension string in inches
///
/// Accepts decimal inches (`"23.5"`), whole plus fraction (`"23 1/2"`) and
/// bare fractions (`"3/4"`). Anything beyond one whole number and one
/// fraction is rejected. A trailing `"` or `in` is ignored. The result
/// must be a positive number.
///
/// * `dimension` - Name of the dimension, used in the error
/// * `input` - Text to parse
pub fn parse_dimension(dimension: &'static str, input: &str) -> Result<f64, CabinetError> {
    let unparsable = |reason: &str| CabinetError::UnparsableDimension {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_suffix('"')
        .or_else(|| trimmed.strip_suffix("in"))
        .unwrap_or(trimmed)
        .trim();

    if trimmed.is_empty() {
        return Err(unparsable("empty input"));
    }

    let parse_fraction = |part: &str| -> Result<f64, CabinetError> {
        let (num, den) = part
            .split_once('/')
            .filter(|(_, den)| !den.contains('/'))
            .ok_or_else(|| unparsable("invalid fraction format"))?;
        let num = num
            .parse::<f64>()
            .map_err(|_| unparsable("invalid numerator"))?;
        let den = den
            .parse::<f64>()
            .map_err(|_| unparsable("invalid denominator"))?;
        if den == 0.0 {
            return Err(unparsable("division by zero"));
        }
        Ok(num / den)
    };

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let inches = match parts.as_slice() {
        [fraction] if fraction.contains('/') => parse_fraction(*fraction)?,
        [whole, fraction] if !whole.contains('/') && fraction.contains('/') => {
            let whole = whole
                .parse::<f64>()
                .map_err(|_| unparsable("invalid number part"))?;
            whole + parse_fraction(*fraction)?
        }
        [number] => number
            .parse::<f64>()
            .map_err(|e| unparsable(&e.to_string()))?,
        _ => return Err(unparsable("expected a number, optionally followed by one fraction")),
    };

    validate_dimension(dimension, inches)
}
