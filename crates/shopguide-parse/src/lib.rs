//! Decoders for the semi-structured catalog columns, plus the small text and
//! link helpers the detail and search paths share.

pub mod attributes;
pub mod error;
pub mod links;
pub(crate) mod scan;
pub mod text;
pub mod variation;

pub use attributes::parse_global_attributes;
pub use error::ParseError;
pub use links::{LinkFormatter, NO_IMAGE};
pub use text::clean_description;
pub use variation::{parse_tier_variation, parse_tier_variation_partial, VariationMap};
