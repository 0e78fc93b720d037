use super::query_service::QueryService;
use super::traits::LookerApi;
use super::types::{Explore, ExploreOutcome, ValidationReport};
use crate::error::{ApiError, SqlError};
use serde_json::Value;

/// Key Looker embeds in a query result row when the generated SQL fails
pub const LOOKER_ERROR_KEY: &str = "looker_error";

/// Extract the `looker_error` message from a `json` query result.
///
/// Looker reports SQL failures in the first row. A bare object carrying the
/// key counts too; an empty result is clean.
pub fn find_looker_error(result: &Value) -> Option<String> {
    let row = match result {
        Value::Array(rows) => rows.first()?,
        Value::Object(_) => result,
        _ => return None,
    };

    row.get(LOOKER_ERROR_KEY).map(|value| match value {
        Value::String(message) => message.clone(),
        other => other.to_string(),
    })
}

/// Runs one all-dimensions query per explore and collects SQL errors
pub struct ValidationService<'a, A: LookerApi> {
    api: &'a A,
}

impl<'a, A: LookerApi> ValidationService<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Query every explore; an explore error never stops the loop
    pub async fn validate_explores(
        &self,
        explores: Vec<Explore>,
    ) -> Result<ValidationReport, ApiError> {
        let mut report = ValidationReport::default();

        for explore in explores {
            let outcome = self.validate_explore(&explore).await?;
            report.push(explore, outcome);
        }

        Ok(report)
    }

    pub async fn validate_explore(&self, explore: &Explore) -> Result<ExploreOutcome, ApiError> {
        if explore.dimensions.is_empty() {
            log::warn!(
                "Skipping explore {}: it has no dimensions to query",
                explore.name
            );
            return Ok(ExploreOutcome::Skipped);
        }

        let query_service = QueryService::new(self.api);
        let query_id = query_service.create_query(explore).await?;
        let result = query_service.run_query(&query_id).await?;

        match find_looker_error(&result) {
            Some(message) => {
                log::info!("Error in explore {}: {}", explore.name, message);
                Ok(ExploreOutcome::Failed(SqlError {
                    model: explore.model.clone(),
                    explore: explore.name.clone(),
                    query_id,
                    message,
                }))
            }
            None => Ok(ExploreOutcome::Passed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::explore_service::ExploreService;
    use crate::core::services::traits::mock::MockLooker;
    use serde_json::json;

    async fn project_explores(api: &MockLooker) -> Vec<Explore> {
        let explore_service = ExploreService::new(api);
        let mut explores = explore_service.get_explores("analytics").await.unwrap();
        explore_service.get_dimensions(&mut explores).await.unwrap();
        explores
    }

    #[test]
    fn test_find_looker_error_in_first_row() {
        let result = json!([{"looker_error": "SQL Error: column users.foo does not exist"}]);
        assert_eq!(
            find_looker_error(&result),
            Some("SQL Error: column users.foo does not exist".to_string())
        );
    }

    #[test]
    fn test_find_looker_error_clean_and_empty() {
        assert_eq!(find_looker_error(&json!([{"orders.id": 1}])), None);
        assert_eq!(find_looker_error(&json!([])), None);
        assert_eq!(find_looker_error(&json!(null)), None);
    }

    #[test]
    fn test_find_looker_error_only_first_row_counts() {
        let result = json!([{"orders.id": 1}, {"looker_error": "later"}]);
        assert_eq!(find_looker_error(&result), None);
    }

    #[test]
    fn test_find_looker_error_object_and_non_string() {
        assert_eq!(
            find_looker_error(&json!({"looker_error": "timeout"})),
            Some("timeout".to_string())
        );
        assert_eq!(
            find_looker_error(&json!([{"looker_error": {"code": 42}}])),
            Some(r#"{"code":42}"#.to_string())
        );
    }

    fn fixture() -> MockLooker {
        MockLooker::new()
            .with_model("analytics", "ecommerce", &["orders", "users", "empty"])
            .with_model("other", "misc", &["ignored"])
            .with_dimensions("ecommerce", "orders", &["orders.id"])
            .with_dimensions("ecommerce", "users", &["users.id", "users.foo"])
            .with_result("orders", json!([{"orders.id": 1}]))
            .with_result(
                "users",
                json!([{"looker_error": "column users.foo does not exist"}]),
            )
    }

    #[tokio::test]
    async fn test_validate_explores_collects_all_outcomes() {
        let api = fixture();
        let service = ValidationService::new(&api);

        let report = service
            .validate_explores(project_explores(&api).await)
            .await
            .unwrap();

        assert_eq!(report.total(), 3);
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert!(report.has_errors());
        assert_eq!(
            report.errors(),
            vec![&SqlError {
                model: "ecommerce".to_string(),
                explore: "users".to_string(),
                query_id: "2".to_string(),
                message: "column users.foo does not exist".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_validate_explores_keeps_going_after_error() {
        let api = MockLooker::new()
            .with_model("analytics", "ecommerce", &["bad", "good"])
            .with_dimensions("ecommerce", "bad", &["bad.id"])
            .with_dimensions("ecommerce", "good", &["good.id"])
            .with_result("bad", json!([{"looker_error": "boom"}]));
        let service = ValidationService::new(&api);

        let report = service
            .validate_explores(project_explores(&api).await)
            .await
            .unwrap();

        assert_eq!(report.results[0].outcome, ExploreOutcome::Failed(SqlError {
            model: "ecommerce".to_string(),
            explore: "bad".to_string(),
            query_id: "1".to_string(),
            message: "boom".to_string(),
        }));
        assert_eq!(report.results[1].outcome, ExploreOutcome::Passed);
        assert!(api.calls().contains(&"run_query 2".to_string()));
    }

    #[tokio::test]
    async fn test_skipped_explore_creates_no_query() {
        let api = fixture();
        let service = ValidationService::new(&api);

        let outcome = service
            .validate_explore(&Explore::new("ecommerce", "empty"))
            .await
            .unwrap();

        assert_eq!(outcome, ExploreOutcome::Skipped);
        assert!(api.created_queries().is_empty());
    }

    #[tokio::test]
    async fn test_no_explores_passes() {
        let api = MockLooker::new();
        let service = ValidationService::new(&api);

        let report = service
            .validate_explores(project_explores(&api).await)
            .await
            .unwrap();
        assert_eq!(report.total(), 0);
        assert!(report.ensure_passed().is_ok());
    }
}
