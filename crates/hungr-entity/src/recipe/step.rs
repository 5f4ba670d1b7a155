//! Recipe steps.

use serde::{Deserialize, Serialize};

/// One instruction and the ingredients it uses.
///
/// Step lists are stored and replaced as a whole. By convention the step
/// at index 0 may carry only ingredients with an empty instruction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecipeStep {
    /// Instruction text.
    #[serde(default)]
    pub instruction: String,
    /// Ingredient lines, verbatim.
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl RecipeStep {
    /// Build a step.
    pub fn new(instruction: impl Into<String>, ingredients: Vec<String>) -> Self {
        Self {
            instruction: instruction.into(),
            ingredients,
        }
    }

    /// Whether this is an ingredients-only holder step.
    pub fn is_ingredients_only(&self) -> bool {
        self.instruction.trim().is_empty() && !self.ingredients.is_empty()
    }
}
