use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::Result;
use crate::projects::projects_model::Project;

/// Trait for project lookup operations
#[async_trait]
pub trait ProjectRepositoryTrait: Send + Sync {
    /// Fetch projects by id set. Ids that do not resolve are simply absent
    /// from the returned map; callers treat a missing project as degraded
    /// data, not an error.
    async fn get_projects_by_ids(&self, ids: &[String]) -> Result<HashMap<String, Project>>;
}
