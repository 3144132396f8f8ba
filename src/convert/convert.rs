//! Validated conversion requests over the rule table.

use thiserror::Error;
use tracing::debug;

use super::category::{Category, Unit};
use super::table;

/// A single conversion request. Units must belong to the category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    pub category: Category, // Active measurement category
    pub from: Unit,         // Source unit
    pub to: Unit,           // Target unit
    pub value: f64,         // Value to convert (must be positive)
}

/// The outcome of a successful conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    pub value: f64, // Converted value
    pub unit: Unit, // Unit the value is expressed in
}

/// Reasons a conversion request is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ConvertError {
    /// The unit does not belong to the requested category.
    #[error("{unit} is not a {category} unit")]
    InvalidUnit { unit: Unit, category: Category },

    /// Only strictly positive values produce a result.
    #[error("value must be positive, got {value}")]
    NonPositiveValue { value: f64 },
}

/// Convert a value between two units of the same category.
///
/// # Arguments
/// * `request` - Category, unit pair, and the value to convert
///
/// # Returns
/// The converted value expressed in the target unit.
///
/// # Errors
/// Returns an error if:
/// - Either unit is not a member of the category
/// - The value is zero, negative, or NaN
pub fn convert(request: &ConversionRequest) -> Result<ConversionResult, ConvertError> {
    for unit in [request.from, request.to] {
        if !request.category.units().contains(&unit) {
            return Err(ConvertError::InvalidUnit { unit, category: request.category });
        }
    }

    // The rule runs before the value check; a non-positive input is rejected
    // even when the arithmetic itself succeeds.
    let value = table::apply(request.from, request.to, request.value);

    if request.value <= 0.0 || request.value.is_nan() {
        debug!("Rejecting non-positive value {} for {} -> {}", request.value, request.from, request.to);
        return Err(ConvertError::NonPositiveValue { value: request.value });
    }

    Ok(ConversionResult { value, unit: request.to })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(category: Category, from: Unit, to: Unit, value: f64) -> ConversionRequest {
        ConversionRequest { category, from, to, value }
    }

    #[test]
    fn test_boiling_point_in_fahrenheit() {
        let result = convert(&request(Category::Temperature, Unit::Celsius, Unit::Fahrenheit, 100.0)).unwrap();
        assert_eq!(result.value, 212.0);
        assert_eq!(result.unit, Unit::Fahrenheit);
    }

    #[test]
    fn test_five_kilograms_in_pounds() {
        let result = convert(&request(Category::Weight, Unit::Kilograms, Unit::Pounds, 5.0)).unwrap();
        assert!((result.value - 11.0231).abs() < 1e-6);
        assert_eq!(result.unit, Unit::Pounds);
    }

    #[test]
    fn test_one_gallon_in_liters() {
        let result = convert(&request(Category::Volume, Unit::Gallons, Unit::Liters, 1.0)).unwrap();
        assert!((result.value - 3.785412).abs() < 1e-5);
    }

    #[test]
    fn test_same_unit_is_identity() {
        for category in &Category::ALL {
            for unit in category.units() {
                let result = convert(&request(*category, *unit, *unit, 12.5)).unwrap();
                assert_eq!(result.value, 12.5);
                assert_eq!(result.unit, *unit);
            }
        }
    }

    #[test]
    fn test_non_positive_values_are_rejected_for_every_pair() {
        for value in [0.0, -5.0, f64::NAN] {
            for category in &Category::ALL {
                let units = category.units();
                for from in units {
                    for to in units {
                        let err = convert(&request(*category, *from, *to, value)).unwrap_err();
                        assert!(
                            matches!(err, ConvertError::NonPositiveValue { .. }),
                            "{} -> {} accepted value {}",
                            from,
                            to,
                            value
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_units_from_another_category_are_invalid() {
        let err = convert(&request(Category::Weight, Unit::Meters, Unit::Kilograms, 1.0)).unwrap_err();
        assert_eq!(err, ConvertError::InvalidUnit { unit: Unit::Meters, category: Category::Weight });
        assert_eq!(err.to_string(), "Meters is not a Weight unit");

        let err = convert(&request(Category::Length, Unit::Meters, Unit::Gallons, 1.0)).unwrap_err();
        assert_eq!(err, ConvertError::InvalidUnit { unit: Unit::Gallons, category: Category::Length });
    }

    #[test]
    fn test_membership_is_checked_before_the_value() {
        // A bad unit wins over a bad value.
        let err = convert(&request(Category::Area, Unit::Liters, Unit::Acres, -1.0)).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidUnit { .. }));
    }
}
