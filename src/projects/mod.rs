pub mod projects_model;
pub mod projects_traits;

pub use projects_model::{Project, ProjectType, SignalScores};
pub use projects_traits::ProjectRepositoryTrait;
