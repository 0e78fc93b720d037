use crate::api::models::{LookmlModel, LookmlModelExplore, Query, SessionUpdate, WriteQuery};
use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;

/// The slice of the Looker REST API that validation needs.
///
/// `LookerClient` is the HTTP implementation; services only see this trait.
#[async_trait]
pub trait LookerApi: Send + Sync {
    /// Exchange API3 credentials for an access token and keep it for later calls
    async fn login(&mut self, client_id: &str, client_secret: &str) -> Result<(), ApiError>;

    async fn update_session(&self, update: &SessionUpdate) -> Result<(), ApiError>;

    async fn update_git_branch(&self, project: &str, branch: &str) -> Result<(), ApiError>;

    async fn all_lookml_models(&self) -> Result<Vec<LookmlModel>, ApiError>;

    async fn lookml_model_explore(
        &self,
        model: &str,
        explore: &str,
    ) -> Result<LookmlModelExplore, ApiError>;

    async fn create_query(&self, query: &WriteQuery) -> Result<Query, ApiError>;

    /// Run a saved query and return the raw `json` result
    async fn run_query(&self, query_id: &str) -> Result<Value, ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::api::models::{ExploreField, ExploreFields, LookmlModelNavExplore};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory Looker used by service tests
    #[derive(Default)]
    pub struct MockLooker {
        pub models: Vec<LookmlModel>,
        pub dimensions: HashMap<(String, String), Vec<String>>,
        pub results: HashMap<String, Value>,
        pub token: Option<String>,
        pub fail_login: bool,
        pub calls: Mutex<Vec<String>>,
        pub queries: Mutex<Vec<WriteQuery>>,
    }

    impl MockLooker {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_model(mut self, project: &str, model: &str, explores: &[&str]) -> Self {
            self.models.push(LookmlModel {
                name: model.to_string(),
                project_name: Some(project.to_string()),
                explores: explores
                    .iter()
                    .map(|name| LookmlModelNavExplore {
                        name: name.to_string(),
                    })
                    .collect(),
            });
            self
        }

        pub fn with_dimensions(mut self, model: &str, explore: &str, dims: &[&str]) -> Self {
            self.dimensions.insert(
                (model.to_string(), explore.to_string()),
                dims.iter().map(|d| d.to_string()).collect(),
            );
            self
        }

        /// Result returned when the query for `explore` runs
        pub fn with_result(mut self, explore: &str, result: Value) -> Self {
            self.results.insert(explore.to_string(), result);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn created_queries(&self) -> Vec<WriteQuery> {
            self.queries.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl LookerApi for MockLooker {
        async fn login(&mut self, client_id: &str, _client_secret: &str) -> Result<(), ApiError> {
            self.record(format!("login {}", client_id));
            if self.fail_login {
                return Err(ApiError::Unauthorized {
                    status: 401,
                    endpoint: "login".to_string(),
                    server_message: "Invalid client credentials".to_string(),
                });
            }
            self.token = Some("mock-token".to_string());
            Ok(())
        }

        async fn update_session(&self, update: &SessionUpdate) -> Result<(), ApiError> {
            self.record(format!("session {}", update.workspace_id));
            Ok(())
        }

        async fn update_git_branch(&self, project: &str, branch: &str) -> Result<(), ApiError> {
            self.record(format!("git_branch {} {}", project, branch));
            Ok(())
        }

        async fn all_lookml_models(&self) -> Result<Vec<LookmlModel>, ApiError> {
            self.record("lookml_models".to_string());
            Ok(self.models.clone())
        }

        async fn lookml_model_explore(
            &self,
            model: &str,
            explore: &str,
        ) -> Result<LookmlModelExplore, ApiError> {
            self.record(format!("explore {}/{}", model, explore));
            let dims = self
                .dimensions
                .get(&(model.to_string(), explore.to_string()))
                .cloned()
                .unwrap_or_default();
            Ok(LookmlModelExplore {
                name: Some(explore.to_string()),
                fields: ExploreFields {
                    dimensions: dims.into_iter().map(|name| ExploreField { name }).collect(),
                },
            })
        }

        async fn create_query(&self, query: &WriteQuery) -> Result<Query, ApiError> {
            let mut queries = self.queries.lock().unwrap();
            queries.push(query.clone());
            let id = queries.len().to_string();
            drop(queries);
            self.record(format!("create_query {}", query.view));
            Ok(Query { id })
        }

        async fn run_query(&self, query_id: &str) -> Result<Value, ApiError> {
            self.record(format!("run_query {}", query_id));
            let index: usize = query_id.parse().unwrap();
            let view = self.queries.lock().unwrap()[index - 1].view.clone();
            Ok(self
                .results
                .get(&view)
                .cloned()
                .unwrap_or_else(|| serde_json::json!([{}])))
        }
    }
}
