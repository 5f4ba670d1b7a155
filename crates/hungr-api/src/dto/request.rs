//! Request DTOs: JSON bodies and query strings.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use hungr_entity::RecipeStep;

/// Maps a present field (even `null`) to `Some`, leaving absence to
/// `#[serde(default)]`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// `POST /api/auth/login` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email to log in with.
    #[serde(default)]
    pub email: String,
}

/// `POST /api/users` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Email.
    #[serde(default)]
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// `PUT /api/users` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// New display name.
    #[serde(default)]
    pub name: String,
}

/// `PATCH /api/recipes/{uuid}` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchRecipeRequest {
    /// Replacement tag string; absent leaves tags untouched.
    #[serde(rename = "tagString", default)]
    pub tag_string: Option<String>,
    /// Absent leaves the source, `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub source: Option<Option<String>>,
    /// New visibility.
    #[serde(default)]
    pub is_public: Option<bool>,
}

/// `PUT /api/recipes/{uuid}/steps` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStepsRequest {
    /// Full replacement list.
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
}

/// `POST /api/extract-recipe` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractUrlRequest {
    /// Page to read.
    #[serde(default)]
    pub url: String,
}

/// `POST /api/extract-recipe-text` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractTextRequest {
    /// Pasted recipe text.
    #[serde(default)]
    pub text: String,
}

/// `POST /api/connections` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateConnectionRequest {
    /// User to connect to.
    #[serde(default)]
    pub target_user_uuid: Option<Uuid>,
}

/// `?email=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// `?uuid=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UuidQuery {
    pub uuid: Option<String>,
}

/// `GET /api/users?uuid=|email=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserLookupQuery {
    pub uuid: Option<String>,
    pub email: Option<String>,
}

/// `POST /api/recipes?email=&name=&tagString=&source=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRecipeQuery {
    pub email: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "tagString")]
    pub tag_string: Option<String>,
    pub source: Option<String>,
}

/// `GET /api/connections?user_uuid=&direction=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListConnectionsQuery {
    pub user_uuid: Option<String>,
    pub direction: Option<String>,
}

/// `DELETE /api/connections?email=&target_user_uuid=&bidirectional=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteConnectionQuery {
    pub email: Option<String>,
    pub target_user_uuid: Option<String>,
    pub bidirectional: Option<String>,
}
