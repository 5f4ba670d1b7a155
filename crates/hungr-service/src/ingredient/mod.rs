//! Ingredient lines: "quantity unit name" parsing and unit conversion.

pub mod parse;
pub mod units;

pub use parse::{ParsedIngredient, parse_ingredient, parse_quantity};
pub use units::{Quantity, UnitCategory, convert, format_best, parse_unit};
