use super::traits::LookerApi;
use super::types::Explore;
use crate::api::models::WriteQuery;
use crate::error::ApiError;
use serde_json::Value;

/// Row limit for validation queries; one row is enough to surface SQL errors
pub const VALIDATION_ROW_LIMIT: u32 = 1;

/// Creates and runs the all-dimensions query for an explore
pub struct QueryService<'a, A: LookerApi> {
    api: &'a A,
}

impl<'a, A: LookerApi> QueryService<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    pub fn build_query(explore: &Explore) -> WriteQuery {
        WriteQuery {
            model: explore.model.clone(),
            view: explore.name.clone(),
            fields: explore.dimensions.clone(),
            limit: VALIDATION_ROW_LIMIT,
        }
    }

    /// Returns the new query's id
    pub async fn create_query(&self, explore: &Explore) -> Result<String, ApiError> {
        log::info!("Creating query for {}", explore.name);
        let query = self.api.create_query(&Self::build_query(explore)).await?;
        Ok(query.id)
    }

    pub async fn run_query(&self, query_id: &str) -> Result<Value, ApiError> {
        log::info!("Running query {}", query_id);
        self.api.run_query(query_id).await
    }
}
