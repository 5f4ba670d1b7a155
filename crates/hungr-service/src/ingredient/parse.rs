//! Parsing of free-text ingredient lines.

use hungr_core::error::AppError;
use hungr_core::result::AppResult;

use super::units::{COUNT, UnitCategory, parse_unit};

/// Structured form of an ingredient line such as "2 cups flour".
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIngredient {
    /// Amount in `unit`.
    pub quantity: f64,
    /// Canonical unit key, `count` for counted items.
    pub unit: &'static str,
    /// Category of `unit`.
    pub category: UnitCategory,
    /// Everything after the unit.
    pub name: String,
}

/// Parse a leading quantity: `2`, `1.5` or `1/2`.
///
/// Like the ingredient parser this reads the numeric prefix of each part,
/// so `2-3` reads as 2.
pub fn parse_quantity(s: &str) -> AppResult<f64> {
    match s.split_once('/') {
        Some((num, denom)) => {
            if denom.contains('/') {
                return Err(AppError::validation("invalid fraction"));
            }
            let num = leading_number(num)?;
            let denom = leading_number(denom)?;
            if denom == 0.0 {
                return Err(AppError::validation("division by zero"));
            }
            Ok(num / denom)
        }
        None => leading_number(s),
    }
}

fn leading_number(s: &str) -> AppResult<f64> {
    let end = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map_or(s.len(), |(i, _)| i);
    s[..end]
        .parse::<f64>()
        .map_err(|_| AppError::validation(format!("expected a number, got {s:?}")))
}

/// Parse "quantity unit name".
///
/// A line whose first word has no digit is a bare name with an implicit
/// count of one ("salt to taste"). When no known unit follows the quantity
/// the item is counted ("3 eggs"). Two-word units win over one-word ones.
pub fn parse_ingredient(s: &str) -> AppResult<ParsedIngredient> {
    let s = s.trim();
    if s.is_empty() {
        return Err(AppError::validation("empty ingredient"));
    }

    let parts: Vec<&str> = s.split_whitespace().collect();
    let first = parts[0];
    if !first.chars().any(|c| c.is_ascii_digit()) {
        return Ok(ParsedIngredient {
            quantity: 1.0,
            unit: COUNT,
            category: UnitCategory::Count,
            name: s.to_string(),
        });
    }

    let quantity = parse_quantity(first)
        .map_err(|e| AppError::validation(format!("invalid quantity {first:?}: {}", e.message)))?;

    if parts.len() < 2 {
        return Err(AppError::validation(format!("missing ingredient name in {s:?}")));
    }

    let two_word = (parts.len() >= 3)
        .then(|| parse_unit(&format!("{} {}", parts[1], parts[2])).ok())
        .flatten()
        .map(|(unit, category)| (unit, category, 3));
    let (unit, category, name_start) = two_word
        .or_else(|| parse_unit(parts[1]).ok().map(|(u, c)| (u, c, 2)))
        .unwrap_or((COUNT, UnitCategory::Count, 1));

    let name = parts[name_start..].join(" ");
    if name.is_empty() {
        return Err(AppError::validation(format!("missing ingredient name in {s:?}")));
    }

    Ok(ParsedIngredient {
        quantity,
        unit,
        category,
        name,
    })
}
