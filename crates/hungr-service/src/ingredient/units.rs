//! Cooking unit tables and conversions.
//!
//! Volume units convert through millilitres, mass units through
//! milligrams. Counted items have no unit conversion.

use std::fmt;

use hungr_core::error::AppError;
use hungr_core::result::AppResult;

/// Relative tolerance used when looking for a whole-number display unit.
pub const INTEGER_TOLERANCE: f64 = 0.01;

/// Physical dimension of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitCategory {
    /// Base unit: millilitre.
    Volume,
    /// Base unit: milligram.
    Mass,
    /// Counted items.
    Count,
}

impl UnitCategory {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Mass => "mass",
            Self::Count => "count",
        }
    }

    fn table(&self) -> &'static [UnitDef] {
        match self {
            Self::Volume => VOLUME_UNITS,
            Self::Mass => MASS_UNITS,
            Self::Count => &[],
        }
    }

    fn base_key(&self) -> &'static str {
        match self {
            Self::Volume => "ml",
            Self::Mass => "mg",
            Self::Count => COUNT,
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key used for counted items.
pub const COUNT: &str = "count";

/// One entry of a unit table.
#[derive(Debug, Clone, Copy)]
pub struct UnitDef {
    /// Canonical key, e.g. `tbsp`.
    pub key: &'static str,
    /// Size in the category's base unit.
    pub to_base: f64,
    /// Short display form.
    pub abbrev: &'static str,
    /// Parsed but never picked for display.
    pub no_display: bool,
}

const fn unit(key: &'static str, to_base: f64, abbrev: &'static str) -> UnitDef {
    UnitDef {
        key,
        to_base,
        abbrev,
        no_display: false,
    }
}

const fn hidden(key: &'static str, to_base: f64, abbrev: &'static str) -> UnitDef {
    UnitDef {
        key,
        to_base,
        abbrev,
        no_display: true,
    }
}

/// Volume units, largest first.
pub static VOLUME_UNITS: &[UnitDef] = &[
    unit("imp_gal", 4546.09, "imp gal"),
    unit("gal", 3785.41, "gal"),
    unit("imp_qt", 1136.52, "imp qt"),
    unit("l", 1000.0, "l"),
    unit("qt", 946.353, "qt"),
    unit("imp_pt", 568.261, "imp pt"),
    hidden("pt", 473.176, "pt"),
    unit("imp_cup", 284.131, "imp cup"),
    unit("cup", 236.588, "cup"),
    unit("half_cup", 118.294, "½ cup"),
    hidden("gill", 118.294, "gill"),
    unit("dl", 100.0, "dl"),
    unit("third_cup", 78.8627, "⅓ cup"),
    unit("qtr_cup", 59.147, "¼ cup"),
    hidden("jigger", 44.3603, "jigger"),
    hidden("fl_oz", 29.5735, "fl oz"),
    unit("imp_fl_oz", 28.4131, "imp fl oz"),
    hidden("au_tbsp", 20.0, "au tbsp"),
    unit("imp_tbsp", 17.7582, "imp tbsp"),
    unit("tbsp", 14.7868, "tbsp"),
    unit("cl", 10.0, "cl"),
    unit("imp_tsp", 5.91939, "imp tsp"),
    unit("tsp", 4.92892, "tsp"),
    unit("half_tsp", 2.46446, "½ tsp"),
    unit("third_tsp", 1.64297, "⅓ tsp"),
    unit("qtr_tsp", 1.23223, "¼ tsp"),
    unit("ml", 1.0, "ml"),
    unit("eighth_tsp", 0.616115, "⅛ tsp"),
    unit("dash", 0.462086, "dash"),
    unit("pinch", 0.231043, "pinch"),
    hidden("smidgen", 0.115522, "smidgen"),
    hidden("drop", 0.05, "drop"),
];

/// Mass units, largest first.
pub static MASS_UNITS: &[UnitDef] = &[
    unit("stone", 6_350_293.0, "st"),
    unit("kg", 1_000_000.0, "kg"),
    unit("lb", 453_592.0, "lb"),
    unit("hg", 100_000.0, "hg"),
    unit("oz_t", 31_103.5, "oz t"),
    unit("oz", 28_349.5, "oz"),
    unit("dag", 10_000.0, "dag"),
    unit("dr", 1_771.845_2, "dr"),
    unit("dwt", 1_555.17, "dwt"),
    unit("g", 1_000.0, "g"),
    unit("dg", 100.0, "dg"),
    unit("gr", 64.798_91, "gr"),
    unit("cg", 10.0, "cg"),
    unit("mg", 1.0, "mg"),
    unit("mcg", 0.001, "mcg"),
];

static VOLUME_ALIASES: &[(&str, &str)] = &[
    ("milliliter", "ml"),
    ("milliliters", "ml"),
    ("millilitre", "ml"),
    ("millilitres", "ml"),
    ("centiliter", "cl"),
    ("centiliters", "cl"),
    ("centilitre", "cl"),
    ("centilitres", "cl"),
    ("deciliter", "dl"),
    ("deciliters", "dl"),
    ("decilitre", "dl"),
    ("decilitres", "dl"),
    ("liter", "l"),
    ("liters", "l"),
    ("litre", "l"),
    ("litres", "l"),
    ("teaspoon", "tsp"),
    ("teaspoons", "tsp"),
    ("tsps", "tsp"),
    ("half teaspoon", "half_tsp"),
    ("half teaspoons", "half_tsp"),
    ("½ tsp", "half_tsp"),
    ("½ teaspoon", "half_tsp"),
    ("third teaspoon", "third_tsp"),
    ("⅓ tsp", "third_tsp"),
    ("⅓ teaspoon", "third_tsp"),
    ("quarter teaspoon", "qtr_tsp"),
    ("quarter teaspoons", "qtr_tsp"),
    ("¼ tsp", "qtr_tsp"),
    ("¼ teaspoon", "qtr_tsp"),
    ("eighth teaspoon", "eighth_tsp"),
    ("eighth teaspoons", "eighth_tsp"),
    ("⅛ tsp", "eighth_tsp"),
    ("⅛ teaspoon", "eighth_tsp"),
    ("tablespoon", "tbsp"),
    ("tablespoons", "tbsp"),
    ("tbsps", "tbsp"),
    ("australian tablespoon", "au_tbsp"),
    ("fluid ounce", "fl_oz"),
    ("fluid ounces", "fl_oz"),
    ("fl oz", "fl_oz"),
    ("floz", "fl_oz"),
    ("cups", "cup"),
    ("half cup", "half_cup"),
    ("half cups", "half_cup"),
    ("½ cup", "half_cup"),
    ("½ cups", "half_cup"),
    ("third cup", "third_cup"),
    ("⅓ cup", "third_cup"),
    ("⅓ cups", "third_cup"),
    ("quarter cup", "qtr_cup"),
    ("quarter cups", "qtr_cup"),
    ("¼ cup", "qtr_cup"),
    ("¼ cups", "qtr_cup"),
    ("pint", "pt"),
    ("pints", "pt"),
    ("quart", "qt"),
    ("quarts", "qt"),
    ("gallon", "gal"),
    ("gallons", "gal"),
    ("drops", "drop"),
    ("dashes", "dash"),
    ("pinches", "pinch"),
    ("smidgens", "smidgen"),
    ("jiggers", "jigger"),
    ("shot", "jigger"),
    ("shots", "jigger"),
    ("gills", "gill"),
    ("imp fl oz", "imp_fl_oz"),
    ("imp tsp", "imp_tsp"),
    ("imp tbsp", "imp_tbsp"),
    ("imp cup", "imp_cup"),
    ("imp pt", "imp_pt"),
    ("imp qt", "imp_qt"),
    ("imp gal", "imp_gal"),
];

static MASS_ALIASES: &[(&str, &str)] = &[
    ("microgram", "mcg"),
    ("micrograms", "mcg"),
    ("µg", "mcg"),
    ("ug", "mcg"),
    ("milligram", "mg"),
    ("milligrams", "mg"),
    ("centigram", "cg"),
    ("centigrams", "cg"),
    ("decigram", "dg"),
    ("decigrams", "dg"),
    ("gram", "g"),
    ("grams", "g"),
    ("decagram", "dag"),
    ("decagrams", "dag"),
    ("hectogram", "hg"),
    ("hectograms", "hg"),
    ("kilogram", "kg"),
    ("kilograms", "kg"),
    ("kilo", "kg"),
    ("kilos", "kg"),
    ("grain", "gr"),
    ("grains", "gr"),
    ("dram", "dr"),
    ("drams", "dr"),
    ("ounce", "oz"),
    ("ounces", "oz"),
    ("pound", "lb"),
    ("pounds", "lb"),
    ("lbs", "lb"),
    ("stones", "stone"),
    ("st", "stone"),
    ("troy ounce", "oz_t"),
    ("troy ounces", "oz_t"),
    ("oz t", "oz_t"),
    ("pennyweight", "dwt"),
    ("pennyweights", "dwt"),
];

static COUNT_ALIASES: &[&str] = &[
    "count", "piece", "pieces", "item", "items", "each", "ea", "unit", "units",
];

fn lookup(category: UnitCategory, key: &str) -> Option<&'static UnitDef> {
    category.table().iter().find(|u| u.key == key)
}

fn category_of(key: &str) -> Option<UnitCategory> {
    if key == COUNT {
        return Some(UnitCategory::Count);
    }
    [UnitCategory::Volume, UnitCategory::Mass]
        .into_iter()
        .find(|c| lookup(*c, key).is_some())
}

/// Resolve a unit word (or two-word phrase) to its canonical key.
pub fn parse_unit(s: &str) -> AppResult<(&'static str, UnitCategory)> {
    let s = s.trim().to_lowercase();

    for category in [UnitCategory::Volume, UnitCategory::Mass] {
        if let Some(def) = lookup(category, &s) {
            return Ok((def.key, category));
        }
    }

    let aliased = VOLUME_ALIASES
        .iter()
        .map(|alias| (alias, UnitCategory::Volume))
        .chain(MASS_ALIASES.iter().map(|alias| (alias, UnitCategory::Mass)))
        .find(|((alias, _), _)| *alias == s);
    if let Some(((_, key), category)) = aliased {
        return Ok((*key, category));
    }

    if COUNT_ALIASES.contains(&s.as_str()) {
        return Ok((COUNT, UnitCategory::Count));
    }

    Err(AppError::validation(format!("unknown unit: {s}")))
}

/// Express `value` of `unit` in its category's base unit.
pub fn to_base(value: f64, unit: &str) -> AppResult<(f64, UnitCategory)> {
    let category =
        category_of(unit).ok_or_else(|| AppError::validation(format!("unknown unit: {unit}")))?;
    let factor = lookup(category, unit).map_or(1.0, |u| u.to_base);
    Ok((value * factor, category))
}

/// Convert between two units of the same category.
pub fn convert(value: f64, from: &str, to: &str) -> AppResult<f64> {
    let (base, from_category) = to_base(value, from)?;
    let to_category = match category_of(to) {
        Some(c) if c != UnitCategory::Count => c,
        _ => return Err(AppError::validation(format!("unknown target unit: {to}"))),
    };
    if from_category != to_category {
        return Err(AppError::validation(format!(
            "cannot convert between {from} ({from_category}) and {to} ({to_category})"
        )));
    }
    let factor = lookup(to_category, to).map_or(1.0, |u| u.to_base);
    Ok(base / factor)
}

/// A value with its unit key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    /// Amount in `unit`.
    pub value: f64,
    /// Canonical unit key.
    pub unit: &'static str,
    /// Category of `unit`.
    pub category: UnitCategory,
}

fn is_near_integer(value: f64, tolerance: f64) -> bool {
    let rounded = value.round();
    if rounded == 0.0 {
        return false;
    }
    ((value - rounded).abs() / rounded) <= tolerance
}

/// Pick the largest displayable unit in which `base_value` is a whole
/// number, falling back to the base unit.
pub fn best_integer_unit(base_value: f64, category: UnitCategory) -> Quantity {
    let found = category
        .table()
        .iter()
        .filter(|u| !u.no_display)
        .map(|u| (u, base_value / u.to_base))
        .find(|(_, converted)| *converted >= 1.0 && is_near_integer(*converted, INTEGER_TOLERANCE));

    match found {
        Some((u, converted)) => Quantity {
            value: converted.round(),
            unit: u.key,
            category,
        },
        None => Quantity {
            value: base_value,
            unit: category.base_key(),
            category,
        },
    }
}

/// Human-readable rendering of a quantity.
pub fn format_quantity(q: &Quantity) -> String {
    if q.category == UnitCategory::Count {
        return format!("{:.0}", q.value);
    }

    let Some(def) = lookup(q.category, q.unit) else {
        return format!("{:.2} {}", q.value, q.unit);
    };

    let whole = q.value.fract() == 0.0;
    // Fractional units already read as an amount: "½ cup", "2 ½ cup".
    if whole && q.value == 1.0 && def.abbrev.starts_with(['½', '⅓', '¼', '⅛']) {
        return def.abbrev.to_string();
    }

    let number = if whole {
        format!("{}", q.value as i64)
    } else if q.value < 0.1 {
        format!("{:.3}", q.value)
    } else if q.value < 10.0 {
        format!("{:.2}", q.value)
    } else {
        format!("{:.1}", q.value)
    };
    format!("{number} {}", def.abbrev)
}

/// Render a base-unit amount in its most readable unit.
pub fn format_best(base_value: f64, category: UnitCategory) -> String {
    format_quantity(&best_integer_unit(base_value, category))
}
