//! Tag filtering and browse-page query parameters.

use hungr_entity::Recipe;

/// A recipe matches when every selected tag appears, case-insensitively,
/// somewhere in its tag string. No selection matches everything.
pub fn matches_tags(recipe: &Recipe, selected: &[String]) -> bool {
    let haystack = recipe.tag_string.to_lowercase();
    selected
        .iter()
        .all(|tag| haystack.contains(&tag.to_lowercase()))
}

/// State of the browse page kept in its query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseParams {
    /// Selected tag names.
    pub tags: Vec<String>,
    /// UUID of the open recipe, or empty.
    pub recipe: String,
}

impl BrowseParams {
    /// Parse `tags=a,b&recipe=<uuid>`. Unknown keys are ignored.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::default();
        let pairs = reqwest::Url::parse(&format!("http://localhost/?{query}"))
            .map(|url| {
                url.query_pairs()
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        for (key, value) in pairs {
            match key.as_str() {
                "tags" if !value.is_empty() => {
                    params.tags = value.split(',').map(str::to_string).collect();
                }
                "recipe" => params.recipe = value,
                _ => {}
            }
        }
        params
    }

    /// Query string without the leading `?`; empty when nothing is set.
    pub fn to_query(&self) -> String {
        let Ok(mut url) = reqwest::Url::parse("http://localhost/") else {
            return String::new();
        };
        {
            let mut pairs = url.query_pairs_mut();
            if !self.tags.is_empty() {
                pairs.append_pair("tags", &self.tags.join(","));
            }
            if !self.recipe.is_empty() {
                pairs.append_pair("recipe", &self.recipe);
            }
        }
        url.query().unwrap_or_default().to_string()
    }

    /// Browse page path with its query.
    pub fn to_path(&self) -> String {
        match self.to_query() {
            query if query.is_empty() => "/browse".to_string(),
            query => format!("/browse?{query}"),
        }
    }
}

/// Recipes matching the selected tags, in their original order.
pub fn filter_recipes<'a>(recipes: &'a [Recipe], selected: &[String]) -> Vec<&'a Recipe> {
    recipes.iter().filter(|r| matches_tags(r, selected)).collect()
}
