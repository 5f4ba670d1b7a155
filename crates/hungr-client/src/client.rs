//! HTTP client for the Hungr API.

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;
use uuid::Uuid;

use hungr_entity::{ConnectionDirection, File, RecipeStep, Tag, User};

use crate::error::{ClientError, ClientResult};
use crate::guards;
use crate::types::{
    ExtractedRecipe, FileUpload, PublicRecipe, RecipePatch, RecipesResponse, UploadResponse,
};
use crate::validate::Email;

/// Base URL used when none is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

#[derive(serde::Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(serde::Deserialize)]
struct FilesEnvelope {
    files: Vec<File>,
}

#[derive(serde::Deserialize)]
struct StepsEnvelope {
    steps: Vec<RecipeStep>,
}

#[derive(serde::Deserialize)]
struct TagsEnvelope {
    tags: Vec<Tag>,
}

#[derive(serde::Deserialize)]
struct ConnectionsEnvelope {
    connections: Vec<User>,
}

/// Typed access to every API operation.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HungrClient {
    http: reqwest::Client,
    base: String,
}

impl HungrClient {
    /// Client for the API at `base_url`, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base)
            .map_err(|e| ClientError::Validation(format!("Invalid API base URL {base_url}: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    /// Absolute URL of a server-relative path such as a file's `url`.
    pub fn file_url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> ClientResult<Url> {
        let mut url = Url::parse(&self.file_url(path))
            .map_err(|e| ClientError::Validation(format!("Invalid URL for {path}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn request(&self, method: Method, path: &str, query: &[(&str, &str)]) -> ClientResult<RequestBuilder> {
        Ok(self.http.request(method, self.url(path, query)?))
    }

    /// Send and turn non-2xx answers into [`ClientError::Http`].
    async fn send(&self, operation: &'static str, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await.map_err(ClientError::Transport)?;
        let status = response.status();
        debug!(operation, status = status.as_u16(), "API response");
        if status.is_success() {
            return Ok(response);
        }

        let body: Option<Value> = response.json().await.ok();
        let message = body
            .as_ref()
            .and_then(guards::error_message)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Failed to {operation}: {}", status.as_u16()));
        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }

    /// Send, check the body with `guard`, then decode it.
    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        guard: fn(&Value) -> bool,
    ) -> ClientResult<T> {
        let response = self.send(operation, request).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| ClientError::contract(operation, format!("invalid JSON: {e}")))?;
        if !guard(&body) {
            return Err(ClientError::contract(operation, "shape mismatch"));
        }
        serde_json::from_value(body).map_err(|e| ClientError::contract(operation, e.to_string()))
    }

    async fn execute(&self, operation: &'static str, request: RequestBuilder) -> ClientResult<()> {
        self.send(operation, request).await.map(|_| ())
    }

    /// Log in, creating the user on first use.
    pub async fn login(&self, email: &Email) -> ClientResult<User> {
        let request = self
            .request(Method::POST, "/api/auth/login", &[])?
            .json(&json!({ "email": email.as_str() }));
        let envelope: UserEnvelope = self
            .fetch("login", request, guards::is_user_response)
            .await?;
        Ok(envelope.user)
    }

    /// Recipes visible to `email` and their files.
    pub async fn get_recipes(&self, email: &Email) -> ClientResult<RecipesResponse> {
        let request = self.request(Method::GET, "/api/recipes", &[("email", email.as_str())])?;
        self.fetch("fetch recipes", request, guards::is_recipes_response)
            .await
    }

    /// Create a recipe with its pages.
    pub async fn create_recipe(
        &self,
        email: &Email,
        name: &str,
        tag_string: &str,
        source: Option<&str>,
        files: Vec<FileUpload>,
    ) -> ClientResult<UploadResponse> {
        let mut query = vec![
            ("email", email.as_str()),
            ("name", name),
            ("tagString", tag_string),
        ];
        if let Some(source) = source {
            query.push(("source", source));
        }
        let request = with_files(self.request(Method::POST, "/api/recipes", &query)?, "file", files)?;
        self.fetch("create recipe", request, guards::is_upload_response)
            .await
    }

    /// Append pages to a recipe.
    pub async fn add_recipe_files(
        &self,
        recipe: Uuid,
        files: Vec<FileUpload>,
    ) -> ClientResult<Vec<File>> {
        let request = with_files(
            self.request(Method::POST, &format!("/api/recipes/{recipe}/files"), &[])?,
            "file",
            files,
        )?;
        let envelope: FilesEnvelope = self
            .fetch("add recipe files", request, guards::is_file_upload_response)
            .await?;
        Ok(envelope.files)
    }

    /// Delete a recipe.
    pub async fn delete_recipe(&self, recipe: Uuid) -> ClientResult<()> {
        let uuid = recipe.to_string();
        let request = self.request(Method::DELETE, "/api/recipes", &[("uuid", uuid.as_str())])?;
        self.execute("delete recipe", request).await
    }

    /// Apply a partial update.
    pub async fn patch_recipe(&self, recipe: Uuid, patch: &RecipePatch) -> ClientResult<()> {
        let request = self
            .request(Method::PATCH, &format!("/api/recipes/{recipe}"), &[])?
            .json(patch);
        self.execute("update recipe", request).await
    }

    /// Steps of a recipe.
    pub async fn get_recipe_steps(&self, recipe: Uuid) -> ClientResult<Vec<RecipeStep>> {
        let request = self.request(Method::GET, &format!("/api/recipes/{recipe}/steps"), &[])?;
        let envelope: StepsEnvelope = self
            .fetch("fetch recipe steps", request, guards::is_recipe_steps_response)
            .await?;
        Ok(envelope.steps)
    }

    /// Replace the steps of a recipe.
    pub async fn update_recipe_steps(&self, recipe: Uuid, steps: &[RecipeStep]) -> ClientResult<()> {
        let request = self
            .request(Method::PUT, &format!("/api/recipes/{recipe}/steps"), &[])?
            .json(&json!({ "steps": steps }));
        self.execute("update recipe steps", request).await
    }

    /// Ask the extraction service to read a recipe page.
    pub async fn extract_recipe_from_url(&self, url: &str) -> ClientResult<ExtractedRecipe> {
        let request = self
            .request(Method::POST, "/api/extract-recipe", &[])?
            .json(&json!({ "url": url }));
        self.fetch("extract recipe", request, guards::is_extracted_recipe)
            .await
    }

    /// Ask the extraction service to read recipe photos.
    pub async fn extract_recipe_from_images(
        &self,
        images: Vec<FileUpload>,
    ) -> ClientResult<ExtractedRecipe> {
        let request = with_files(
            self.request(Method::POST, "/api/extract-recipe-image", &[])?,
            "images",
            images,
        )?;
        self.fetch("extract recipe from image", request, guards::is_extracted_recipe)
            .await
    }

    /// Ask the extraction service to read pasted text.
    pub async fn extract_recipe_from_text(&self, text: &str) -> ClientResult<ExtractedRecipe> {
        let request = self
            .request(Method::POST, "/api/extract-recipe-text", &[])?
            .json(&json!({ "text": text }));
        self.fetch("extract recipe from text", request, guards::is_extracted_recipe)
            .await
    }

    /// The global tag catalog.
    pub async fn get_tags(&self) -> ClientResult<Vec<Tag>> {
        let request = self.request(Method::GET, "/api/tags", &[])?;
        let envelope: TagsEnvelope = self
            .fetch("fetch tags", request, guards::is_tags_response)
            .await?;
        Ok(envelope.tags)
    }

    /// Look a user up by email.
    pub async fn get_user_by_email(&self, email: &Email) -> ClientResult<User> {
        let request = self.request(Method::GET, "/api/users", &[("email", email.as_str())])?;
        let envelope: UserEnvelope = self
            .fetch("fetch user", request, guards::is_user_response)
            .await?;
        Ok(envelope.user)
    }

    /// Register a user with a display name.
    pub async fn create_user(&self, email: &Email, name: &str) -> ClientResult<User> {
        let request = self
            .request(Method::POST, "/api/users", &[])?
            .json(&json!({ "email": email.as_str(), "name": name }));
        let envelope: UserEnvelope = self
            .fetch("create user", request, guards::is_user_response)
            .await?;
        Ok(envelope.user)
    }

    /// Users on one side of `user`'s connections.
    pub async fn get_connections(
        &self,
        user: Uuid,
        direction: ConnectionDirection,
    ) -> ClientResult<Vec<User>> {
        let user = user.to_string();
        let request = self.request(
            Method::GET,
            "/api/connections",
            &[("user_uuid", user.as_str()), ("direction", direction.as_str())],
        )?;
        let envelope: ConnectionsEnvelope = self
            .fetch("fetch connections", request, guards::is_connections_response)
            .await?;
        Ok(envelope.connections)
    }

    /// Share `email`'s recipes with `target`.
    pub async fn create_connection(&self, email: &Email, target: Uuid) -> ClientResult<()> {
        let request = self
            .request(Method::POST, "/api/connections", &[("email", email.as_str())])?
            .json(&json!({ "target_user_uuid": target }));
        self.execute("create connection", request).await
    }

    /// Stop sharing with `target`; with `bidirectional` also drop the
    /// reverse edge.
    pub async fn delete_connection(
        &self,
        email: &Email,
        target: Uuid,
        bidirectional: bool,
    ) -> ClientResult<()> {
        let target = target.to_string();
        let mut query = vec![("email", email.as_str()), ("target_user_uuid", target.as_str())];
        if bidirectional {
            query.push(("bidirectional", "true"));
        }
        let request = self.request(Method::DELETE, "/api/connections", &query)?;
        self.execute("delete connection", request).await
    }

    /// A recipe shared publicly.
    pub async fn get_public_recipe(&self, recipe: Uuid) -> ClientResult<PublicRecipe> {
        let request = self.request(Method::GET, &format!("/api/recipes/{recipe}/public"), &[])?;
        self.fetch("fetch recipe", request, guards::is_public_recipe_response)
            .await
    }
}

/// Attach `files` as multipart parts named `field`. Without files the
/// request is sent bodiless, which the API reads as "no uploads".
fn with_files(
    request: RequestBuilder,
    field: &'static str,
    files: Vec<FileUpload>,
) -> ClientResult<RequestBuilder> {
    if files.is_empty() {
        return Ok(request);
    }
    let mut form = Form::new();
    for file in files {
        let part = Part::bytes(file.data)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| {
                ClientError::Validation(format!("Invalid content type {}: {e}", file.content_type))
            })?;
        form = form.part(field, part);
    }
    Ok(request.multipart(form))
}
