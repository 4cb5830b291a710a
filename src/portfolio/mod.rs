pub mod portfolio_model;
pub mod portfolio_traits;

pub use portfolio_model::{
    AssetType, FundMetricsSnapshot, Holding, HoldingStatus, Portfolio, SfdrClassification,
};
pub use portfolio_traits::{
    FundMetricsRepositoryTrait, HoldingsRepositoryTrait, PortfolioRepositoryTrait,
};
