//! Unit conversion core.
//!
//! Categories, canonical units, spoken-name normalization, and the fixed
//! conversion rules. Everything here is pure and synchronous; the voice and
//! form layers feed it input and render its results.

mod category;
#[allow(clippy::module_inception)]
mod convert;
mod normalize;
mod table;

pub use category::{Category, Unit, print_catalog};
pub use convert::{ConversionRequest, ConversionResult, ConvertError, convert};
pub use normalize::{normalize_unit, title_case};
