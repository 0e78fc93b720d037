use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Custom deserializer: query ids are integers on API 3.x and strings on 4.0
fn deserialize_query_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) if !s.is_empty() => Ok(s),
        other => Err(serde::de::Error::custom(format!(
            "expected a query id, got {}",
            other
        ))),
    }
}

// Authentication models
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
}

// Dev workspace / git models
#[derive(Debug, Serialize)]
pub struct SessionUpdate {
    pub workspace_id: String,
}

impl SessionUpdate {
    pub fn dev() -> Self {
        Self {
            workspace_id: "dev".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GitBranchUpdate {
    pub name: String,
}

// LookML metadata models
#[derive(Debug, Deserialize, Clone)]
pub struct LookmlModel {
    pub name: String,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub explores: Vec<LookmlModelNavExplore>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LookmlModelNavExplore {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LookmlModelExplore {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: ExploreFields,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ExploreFields {
    #[serde(default)]
    pub dimensions: Vec<ExploreField>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExploreField {
    pub name: String,
}

// Query models
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct WriteQuery {
    pub model: String,
    pub view: String,
    pub fields: Vec<String>,
    pub limit: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Query {
    #[serde(deserialize_with = "deserialize_query_id")]
    pub id: String,
}
