//! Measurement categories and their canonical units.
//!
//! The converter supports a fixed set of five categories. Each category owns
//! an ordered list of canonical units; membership checks compare the display
//! names exactly as they appear in menus and spoken announcements.

use super::normalize;

/// A measurement category supported by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Length,
    Weight,
    Temperature,
    Area,
    Volume,
}

/// A canonical unit. Display names are the exact strings used in menus and
/// results; some contain a space ("Square Meters", "Cubic Meters").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    // Length
    Meters,
    Kilometers,
    Feet,
    Miles,
    // Weight
    Kilograms,
    Grams,
    Pounds,
    Ounces,
    // Temperature
    Celsius,
    Fahrenheit,
    Kelvin,
    // Area
    SquareMeters,
    Hectares,
    Acres,
    // Volume
    Liters,
    Milliliters,
    CubicMeters,
    Gallons,
}

impl Category {
    /// All categories in menu order.
    pub const ALL: [Category; 5] = [Category::Length, Category::Weight, Category::Temperature, Category::Area, Category::Volume];

    /// The category's display name.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Temperature => "Temperature",
            Category::Area => "Area",
            Category::Volume => "Volume",
        }
    }

    /// Look up a category by its display name (exact match).
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|category| category.name() == name)
    }

    /// The category's units in menu order.
    pub fn units(&self) -> &'static [Unit] {
        match self {
            Category::Length => &[Unit::Meters, Unit::Kilometers, Unit::Feet, Unit::Miles],
            Category::Weight => &[Unit::Kilograms, Unit::Grams, Unit::Pounds, Unit::Ounces],
            Category::Temperature => &[Unit::Celsius, Unit::Fahrenheit, Unit::Kelvin],
            Category::Area => &[Unit::SquareMeters, Unit::Hectares, Unit::Acres],
            Category::Volume => &[Unit::Liters, Unit::Milliliters, Unit::CubicMeters, Unit::Gallons],
        }
    }

    /// Find the category's unit with the given display name, if any.
    /// This is the membership check applied to normalized voice input.
    pub fn unit_named(&self, name: &str) -> Option<Unit> {
        self.units().iter().copied().find(|unit| unit.name() == name)
    }
}

impl Unit {
    /// The unit's display name.
    pub fn name(&self) -> &'static str {
        match self {
            Unit::Meters => "Meters",
            Unit::Kilometers => "Kilometers",
            Unit::Feet => "Feet",
            Unit::Miles => "Miles",
            Unit::Kilograms => "Kilograms",
            Unit::Grams => "Grams",
            Unit::Pounds => "Pounds",
            Unit::Ounces => "Ounces",
            Unit::Celsius => "Celsius",
            Unit::Fahrenheit => "Fahrenheit",
            Unit::Kelvin => "Kelvin",
            Unit::SquareMeters => "Square Meters",
            Unit::Hectares => "Hectares",
            Unit::Acres => "Acres",
            Unit::Liters => "Liters",
            Unit::Milliliters => "Milliliters",
            Unit::CubicMeters => "Cubic Meters",
            Unit::Gallons => "Gallons",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Print every category with its units, plus the spoken alias table.
pub fn print_catalog() {
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  SQ Converter - {} unit categories", Category::ALL.len());
    println!("═══════════════════════════════════════════════════════════════════");

    for category in &Category::ALL {
        println!("\n── {} ({} units) ──", category, category.units().len());
        for unit in category.units() {
            println!("  {}", unit);
        }
    }

    println!("\n{}", "─".repeat(67));
    println!("Spoken aliases (voice input also accepts these singular forms):");
    for (alias, canonical) in normalize::aliases() {
        println!("  {:<12} -> {}", alias, canonical);
    }
    println!();
    println!("Usage:");
    println!("  ./sq-converter             # spoken prompts and answers");
    println!("  ./sq-converter --manual    # terminal menus only");
    println!();
}
