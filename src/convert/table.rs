//! Fixed conversion rules between units of the same category.
//!
//! One explicit rule per supported pair. Each direction carries its own
//! constant and operation rather than being derived from the opposite one,
//! so every direction reproduces its published factor bit for bit.

use tracing::debug;

use super::category::Unit;

/// Apply the conversion rule for a unit pair.
///
/// Same-unit pairs, and any pair without an explicit rule, return the value
/// unchanged.
pub fn apply(from: Unit, to: Unit, value: f64) -> f64 {
    use Unit::*;

    match (from, to) {
        // Length
        (Meters, Kilometers) => value / 1000.0,
        (Meters, Feet) => value * 3.28084,
        (Meters, Miles) => value * 0.000621371,
        (Kilometers, Meters) => value * 1000.0,
        (Kilometers, Feet) => value * 3280.84,
        (Kilometers, Miles) => value * 0.621371,
        (Feet, Meters) => value / 3.28084,
        (Feet, Kilometers) => value / 3280.84,
        (Feet, Miles) => value * 0.000189394,
        (Miles, Meters) => value * 1609.34,
        (Miles, Kilometers) => value * 1.60934,
        (Miles, Feet) => value * 5280.0,

        // Weight
        (Kilograms, Grams) => value * 1000.0,
        (Kilograms, Pounds) => value * 2.20462,
        (Kilograms, Ounces) => value * 35.274,
        (Grams, Kilograms) => value / 1000.0,
        (Grams, Pounds) => value * 0.00220462,
        (Grams, Ounces) => value * 0.035274,
        (Pounds, Kilograms) => value * 0.453592,
        (Pounds, Grams) => value * 453.592,
        (Pounds, Ounces) => value * 16.0,
        (Ounces, Kilograms) => value * 0.0283495,
        (Ounces, Grams) => value * 28.3495,
        (Ounces, Pounds) => value * 0.0625,

        // Temperature
        (Celsius, Fahrenheit) => value * 9.0 / 5.0 + 32.0,
        (Celsius, Kelvin) => value + 273.15,
        (Fahrenheit, Celsius) => (value - 32.0) * 5.0 / 9.0,
        (Fahrenheit, Kelvin) => (value - 32.0) * 5.0 / 9.0 + 273.15,
        (Kelvin, Celsius) => value - 273.15,
        (Kelvin, Fahrenheit) => (value - 273.15) * 9.0 / 5.0 + 32.0,

        // Area
        (SquareMeters, Hectares) => value / 10000.0,
        (SquareMeters, Acres) => value * 0.000247105,
        (Hectares, SquareMeters) => value * 10000.0,
        (Hectares, Acres) => value * 2.47105,
        (Acres, SquareMeters) => value / 0.000247105,
        (Acres, Hectares) => value / 2.47105,

        // Volume
        (Liters, Milliliters) => value * 1000.0,
        (Liters, CubicMeters) => value / 1000.0,
        (Liters, Gallons) => value * 0.264172,
        (Milliliters, Liters) => value / 1000.0,
        (Milliliters, CubicMeters) => value / 1_000_000.0,
        (Milliliters, Gallons) => value * 0.000264172,
        (CubicMeters, Liters) => value * 1000.0,
        (CubicMeters, Milliliters) => value * 1_000_000.0,
        (CubicMeters, Gallons) => value * 264.172,
        (Gallons, Liters) => value / 0.264172,
        (Gallons, Milliliters) => value / 0.000264172,
        (Gallons, CubicMeters) => value / 264.172,

        _ => {
            if from != to {
                debug!("No rule for {} -> {}, returning value unchanged", from, to);
            }
            value
        }
    }
}
