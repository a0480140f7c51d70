//! Row structs for the wardrobe tables.
//!
//! Each submodule holds `FromRow` structs matching the columns its
//! repository selects, plus conversions into `wardrobe_core` types.

pub mod item;
pub mod outfit;
