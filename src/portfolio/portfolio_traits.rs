use async_trait::async_trait;

use crate::errors::Result;
use crate::portfolio::portfolio_model::{FundMetricsSnapshot, Holding, Portfolio};

/// Trait for portfolio lookup operations. Implementations enforce tenant
/// scoping: a portfolio that exists but belongs to another org is NotFound.
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    async fn get_portfolio(&self, portfolio_id: &str, org_id: &str) -> Result<Portfolio>;
}

/// Trait for holding fetch operations
#[async_trait]
pub trait HoldingsRepositoryTrait: Send + Sync {
    /// Holdings of one portfolio, filtered to `status = Active`.
    async fn get_active_holdings(&self, portfolio_id: &str) -> Result<Vec<Holding>>;
}

/// Trait for fund metrics snapshot lookup
#[async_trait]
pub trait FundMetricsRepositoryTrait: Send + Sync {
    async fn get_latest_metrics(&self, portfolio_id: &str)
        -> Result<Option<FundMetricsSnapshot>>;
}
