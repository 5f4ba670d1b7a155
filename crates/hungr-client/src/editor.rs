//! Step-editor helpers.

use hungr_entity::RecipeStep;

/// Split the editor's ingredient field on `;`, trimming and dropping blanks.
pub fn split_ingredients(input: &str) -> Vec<String> {
    input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join ingredients back into the editor's field format.
pub fn join_ingredients(ingredients: &[String]) -> String {
    ingredients.join("; ")
}

/// Steps as they should be saved from the editor.
///
/// `ingredient_inputs[i]` is the raw ingredient field of step `i` and
/// replaces that step's ingredients. Steps with a blank instruction are
/// dropped, except the first step when it carries ingredients.
pub fn canonical_steps(steps: &[RecipeStep], ingredient_inputs: &[String]) -> Vec<RecipeStep> {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| RecipeStep {
            instruction: step.instruction.clone(),
            ingredients: ingredient_inputs
                .get(index)
                .map(|input| split_ingredients(input))
                .unwrap_or_else(|| step.ingredients.clone()),
        })
        .enumerate()
        .filter(|(index, step)| {
            !step.instruction.trim().is_empty() || (*index == 0 && !step.ingredients.is_empty())
        })
        .map(|(_, step)| step)
        .collect()
}
