//! Runtime shape checks for API responses.
//!
//! Every body is checked here before it is decoded into a typed value, so a
//! server that drifts from the contract fails loudly instead of being
//! silently coerced.

use serde_json::Value;

fn is_string(value: &Value) -> bool {
    value.is_string()
}

fn is_bool(value: &Value) -> bool {
    value.is_boolean()
}

fn is_number(value: &Value) -> bool {
    value.as_f64().is_some_and(f64::is_finite)
}

fn is_array_of(value: &Value, guard: fn(&Value) -> bool) -> bool {
    value.as_array().is_some_and(|items| items.iter().all(guard))
}

fn is_string_array(value: &Value) -> bool {
    is_array_of(value, is_string)
}

fn is_optional_string(value: &Value) -> bool {
    value.is_null() || value.is_string()
}

/// A recipe row.
pub fn is_recipe(value: &Value) -> bool {
    value.is_object()
        && is_string(&value["uuid"])
        && is_string(&value["name"])
        && is_string(&value["user_uuid"])
        && is_string(&value["owner_email"])
        && is_string(&value["tag_string"])
        && is_optional_string(&value["source"])
        && is_bool(&value["is_public"])
        && is_string(&value["created_at"])
}

/// A file row.
pub fn is_file(value: &Value) -> bool {
    value.is_object()
        && is_string(&value["uuid"])
        && is_string(&value["recipe_uuid"])
        && is_string(&value["url"])
        && is_number(&value["page_number"])
        && is_bool(&value["image"])
}

/// A catalog tag.
pub fn is_tag(value: &Value) -> bool {
    value.is_object() && is_string(&value["uuid"]) && is_string(&value["name"])
}

/// A user.
pub fn is_user(value: &Value) -> bool {
    value.is_object()
        && is_string(&value["uuid"])
        && is_string(&value["email"])
        && is_string(&value["name"])
        && is_string(&value["created_at"])
}

/// One recipe step.
pub fn is_recipe_step(value: &Value) -> bool {
    value.is_object()
        && is_string(&value["instruction"])
        && is_string_array(&value["ingredients"])
}

/// `{recipeData, fileData}`
pub fn is_recipes_response(value: &Value) -> bool {
    value.is_object()
        && is_array_of(&value["recipeData"], is_recipe)
        && is_array_of(&value["fileData"], is_file)
}

/// `{success, recipe, tags, files?}`
pub fn is_upload_response(value: &Value) -> bool {
    value.is_object()
        && is_bool(&value["success"])
        && is_recipe(&value["recipe"])
        && is_array_of(&value["tags"], is_tag)
        && (value["files"].is_null() || is_array_of(&value["files"], is_file))
}

/// `{success, files}`
pub fn is_file_upload_response(value: &Value) -> bool {
    value.is_object() && is_bool(&value["success"]) && is_array_of(&value["files"], is_file)
}

/// `{steps}`
pub fn is_recipe_steps_response(value: &Value) -> bool {
    value.is_object() && is_array_of(&value["steps"], is_recipe_step)
}

/// `{steps, tags?}` from the extraction endpoints.
pub fn is_extracted_recipe(value: &Value) -> bool {
    is_recipe_steps_response(value) && (value["tags"].is_null() || is_string_array(&value["tags"]))
}

/// `{tags}`
pub fn is_tags_response(value: &Value) -> bool {
    value.is_object() && is_array_of(&value["tags"], is_tag)
}

/// `{success, user}`
pub fn is_user_response(value: &Value) -> bool {
    value.is_object() && is_bool(&value["success"]) && is_user(&value["user"])
}

/// `{success, connections}`
pub fn is_connections_response(value: &Value) -> bool {
    value.is_object()
        && is_bool(&value["success"])
        && is_array_of(&value["connections"], is_user)
}

/// `{recipe, files, steps, tags}` from the public recipe endpoint.
pub fn is_public_recipe_response(value: &Value) -> bool {
    value.is_object()
        && is_recipe(&value["recipe"])
        && is_array_of(&value["files"], is_file)
        && is_array_of(&value["steps"], is_recipe_step)
        && is_string_array(&value["tags"])
}

/// The `error` string of an error body, if any.
pub fn error_message(value: &Value) -> Option<&str> {
    value.get("error").and_then(Value::as_str)
}
