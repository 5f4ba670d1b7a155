//! Prompt texts and the response schema sent to the model.

use serde_json::{Value, json};

/// Rules every extraction prompt ends with.
pub const EXTRACTION_RULES: &str = r#"Rules:
1. ALWAYS start with a step that has an empty instruction "" containing ALL ingredients from the recipe. This must be the first element in the steps array.
2. Then add additional steps for the actual cooking instructions (these steps should have empty ingredients arrays since all ingredients are in the first step).
3. Format ingredients as "quantity unit ingredient" (e.g., "2 cups flour", "1 tsp salt", "3 eggs")
4. Use standard cooking units: tsp, tbsp, cup, oz, lb, g, kg, ml, l
5. For countable items without units, just use the number and name (e.g., "2 eggs", "1 onion")
6. Do NOT include temperatures (e.g., "350°F", "180°C") in the ingredients list - temperatures belong in the instruction steps only
7. IMPORTANT: Preserve ALL numbers in instructions including oven temperatures (e.g., "Preheat oven to 350°F"), cooking times (e.g., "bake for 25 minutes"), and quantities. Never omit or round these values.
8. IMPORTANT: Watch for mixed fractions! "3 1/2 cups" means 3.5 cups (three and a half), NOT "3" followed by "1/2 cup". Similarly "2 1/4 tsp" means 2.25 tsp. Convert mixed fractions to decimals."#;

const WEB_PAGE_INTRO: &str = "You are a recipe extraction assistant. Given the text content of a recipe webpage, extract the recipe steps and ingredients into a structured JSON format.";

const IMAGE_INTRO: &str = "You are a recipe extraction assistant. Given an image of a recipe (such as a photo from a cookbook, a handwritten recipe card, or a screenshot), extract the recipe steps and ingredients into a structured JSON format.";

const IMAGE_EXTRA: &str = "9. If the image is unclear or partially visible, extract what you can see";

const TEXT_INTRO: &str = "You are a recipe extraction assistant. Given raw text that has been copied and pasted from a recipe website (which may be poorly formatted, contain ads, navigation text, or other noise), extract the recipe steps and ingredients into a structured JSON format.";

const TEXT_EXTRA: &str = "9. Ignore any non-recipe content like ads, navigation, comments, ratings, or author bios\n10. If the text contains multiple recipes, extract only the main/first recipe";

/// System prompt for page text.
pub fn web_page_system_prompt() -> String {
    format!("{WEB_PAGE_INTRO}\n\n{EXTRACTION_RULES}")
}

/// System prompt for photos.
pub fn image_system_prompt() -> String {
    format!("{IMAGE_INTRO}\n\n{EXTRACTION_RULES}\n{IMAGE_EXTRA}")
}

/// System prompt for pasted text.
pub fn text_system_prompt() -> String {
    format!("{TEXT_INTRO}\n\n{EXTRACTION_RULES}\n{TEXT_EXTRA}")
}

/// User message accompanying the images.
pub fn image_user_prompt(count: usize) -> &'static str {
    if count == 1 {
        "Extract the recipe from this image. Include all ingredients and cooking steps you can see."
    } else {
        "Extract the recipe from these images. Include all ingredients and cooking steps you can see."
    }
}

/// Strict JSON schema for `{steps: [{instruction, ingredients}]}`.
pub fn recipe_steps_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "steps": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "instruction": {
                            "type": "string",
                            "description": "The step instruction. Empty string if this is just an ingredients list."
                        },
                        "ingredients": {
                            "type": "array",
                            "items": {
                                "type": "string",
                                "description": "Ingredient in format 'quantity unit name' (e.g., '2 cups flour', '1 tsp salt', '3 eggs')"
                            },
                            "description": "Ingredients used in this step"
                        }
                    },
                    "required": ["instruction", "ingredients"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["steps"],
        "additionalProperties": false
    })
}
