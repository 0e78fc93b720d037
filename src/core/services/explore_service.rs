use super::traits::LookerApi;
use super::types::Explore;
use crate::error::ApiError;

/// Lists a project's explores and fills in their dimensions
pub struct ExploreService<'a, A: LookerApi> {
    api: &'a A,
}

impl<'a, A: LookerApi> ExploreService<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Every (model, explore) pair whose model belongs to `project`
    pub async fn get_explores(&self, project: &str) -> Result<Vec<Explore>, ApiError> {
        log::info!("Getting all explores in Looker instance.");
        let models = self.api.all_lookml_models().await?;

        log::info!("Filtering explores for project: {}", project);
        let explores = models
            .into_iter()
            .filter(|model| model.project_name.as_deref() == Some(project))
            .flat_map(|model| {
                let model_name = model.name;
                model
                    .explores
                    .into_iter()
                    .map(move |explore| Explore::new(model_name.clone(), explore.name))
            })
            .collect::<Vec<_>>();

        log::debug!("Found {} explores in project {}", explores.len(), project);
        Ok(explores)
    }

    pub async fn get_explore_dimensions(&self, explore: &Explore) -> Result<Vec<String>, ApiError> {
        log::info!("Getting dimensions for {}", explore.name);
        let lookml_explore = self
            .api
            .lookml_model_explore(&explore.model, &explore.name)
            .await?;

        Ok(lookml_explore
            .fields
            .dimensions
            .into_iter()
            .map(|dimension| dimension.name)
            .collect())
    }

    /// Fetch dimensions for each explore in order
    pub async fn get_dimensions(&self, explores: &mut [Explore]) -> Result<(), ApiError> {
        for explore in explores.iter_mut() {
            explore.dimensions = self.get_explore_dimensions(explore).await?;
        }
        Ok(())
    }
}
