//! Unit name normalization for loosely spoken or typed input.
//!
//! Voice transcripts tend to arrive as singular lowercase words ("kilometre",
//! "kg") while menus and the conversion rules use canonical display names
//! ("Kilometers"). Known synonyms map directly; anything else is title-cased
//! and left for the caller's membership check to accept or reject.

/// Spoken synonym to canonical display name (sorted by alias for binary search).
const ALIASES: &[(&str, &str)] = &[
    ("acre", "Acres"),
    ("celsius", "Celsius"),
    ("fahrenheit", "Fahrenheit"),
    ("foot", "Feet"),
    ("gallon", "Gallons"),
    ("gram", "Grams"),
    ("hectare", "Hectares"),
    ("kelvin", "Kelvin"),
    ("kg", "Kilograms"),
    ("kilometer", "Kilometers"),
    ("kilometre", "Kilometers"),
    ("liter", "Liters"),
    ("litre", "Liters"),
    ("meter", "Meters"),
    ("metre", "Meters"),
    ("mile", "Miles"),
    ("milliliter", "Milliliters"),
    ("ounce", "Ounces"),
    ("pound", "Pounds"),
];

/// Normalize a raw unit name to its canonical display form.
///
/// The lowercased input is looked up in the alias table; on a miss the raw
/// input is title-cased instead ("meters" -> "Meters", "XYZ" -> "Xyz").
/// Never fails: an unknown name title-cases to something the membership
/// check will reject.
pub fn normalize_unit(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    match ALIASES.binary_search_by_key(&lowered.as_str(), |(alias, _)| alias) {
        Ok(idx) => ALIASES[idx].1.to_string(),
        Err(_) => title_case(raw),
    }
}

/// Title-case a string: the first alphabetic character of each run is
/// uppercased, the rest lowercased. Any non-alphabetic character starts a
/// new run, so "square meters" becomes "Square Meters" and "XYZ" "Xyz".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}

/// The full alias table, for the catalog listing.
pub fn aliases() -> &'static [(&'static str, &'static str)] {
    ALIASES
}
