//! Step service.

use tracing::info;
use uuid::Uuid;

use hungr_core::error::AppError;
use hungr_core::result::AppResult;
use hungr_database::Stores;
use hungr_entity::RecipeStep;

use crate::ingredient::parse_ingredient;

/// Check a step list before it replaces the stored one.
///
/// Step 0 may hold only ingredients; every later step needs an
/// instruction. Each ingredient must parse, though it is stored as typed.
pub fn validate_steps(steps: &[RecipeStep]) -> AppResult<()> {
    for (index, step) in steps.iter().enumerate() {
        if index > 0 && step.instruction.trim().is_empty() {
            return Err(AppError::validation(format!(
                "step {} instruction is required",
                index + 1
            )));
        }
        for ingredient in &step.ingredients {
            parse_ingredient(ingredient).map_err(|e| {
                AppError::validation(format!("invalid ingredient {ingredient:?}: {}", e.message))
            })?;
        }
    }
    Ok(())
}

/// Reads and replaces step lists.
#[derive(Clone)]
pub struct StepService {
    stores: Stores,
}

impl StepService {
    /// Creates a new step service.
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    async fn ensure_recipe(&self, recipe_uuid: Uuid) -> AppResult<()> {
        match self.stores.recipes.find_by_uuid(recipe_uuid).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("recipe not found")),
        }
    }

    /// Steps of a recipe in order.
    pub async fn list(&self, recipe_uuid: Uuid) -> AppResult<Vec<RecipeStep>> {
        self.ensure_recipe(recipe_uuid).await?;
        self.stores.steps.list(recipe_uuid).await
    }

    /// Replace the whole list.
    pub async fn replace(&self, recipe_uuid: Uuid, steps: Vec<RecipeStep>) -> AppResult<()> {
        self.ensure_recipe(recipe_uuid).await?;
        validate_steps(&steps)?;
        self.stores.steps.replace(recipe_uuid, &steps).await?;
        info!(recipe_uuid = %recipe_uuid, step_count = steps.len(), "Recipe steps updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hungr_core::ErrorKind;
    use hungr_database::MemoryStore;
    use hungr_entity::NewRecipe;

    async fn fixture() -> (StepService, Uuid) {
        let stores = Stores::memory(MemoryStore::new());
        stores
            .users
            .upsert_by_email("cook@example.com", "Cook")
            .await
            .unwrap();
        let created = stores
            .recipes
            .create(&NewRecipe {
                uuid: Uuid::new_v4(),
                name: "Bread".to_string(),
                owner_email: "cook@example.com".to_string(),
                tag_string: String::new(),
                source: None,
                files: vec![],
                tags: vec![],
            })
            .await
            .unwrap();
        (StepService::new(stores), created.recipe.uuid)
    }

    fn step(instruction: &str, ingredients: &[&str]) -> RecipeStep {
        RecipeStep::new(
            instruction,
            ingredients.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[tokio::test]
    async fn test_ingredients_only_first_step_survives() {
        let (steps, recipe) = fixture().await;
        let list = vec![
            step("", &["2 cups flour", "1 tsp salt"]),
            step("Mix", &[]),
        ];
        steps.replace(recipe, list.clone()).await.unwrap();
        assert_eq!(steps.list(recipe).await.unwrap(), list);
    }

    #[tokio::test]
    async fn test_replace_is_whole_list() {
        let (steps, recipe) = fixture().await;
        let first = vec![step("A", &[]), step("B", &[]), step("C", &[])];
        steps.replace(recipe, first.clone()).await.unwrap();
        assert_eq!(steps.list(recipe).await.unwrap(), first);

        steps.replace(recipe, vec![step("Only", &[])]).await.unwrap();
        assert_eq!(steps.list(recipe).await.unwrap().len(), 1);

        steps.replace(recipe, vec![]).await.unwrap();
        assert!(steps.list(recipe).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_blank_later_instruction() {
        let (steps, recipe) = fixture().await;
        let err = steps
            .replace(recipe, vec![step("Mix", &[]), step("  ", &["1 egg"])])
            .await
            .unwrap_err();
        assert_eq!(err.message, "step 2 instruction is required");
    }

    #[tokio::test]
    async fn test_rejects_unparseable_ingredient() {
        let (steps, recipe) = fixture().await;
        let err = steps
            .replace(recipe, vec![step("", &["2"])])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.starts_with("invalid ingredient \"2\": "));
    }

    #[tokio::test]
    async fn test_unknown_recipe() {
        let (steps, _) = fixture().await;
        let err = steps.list(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
