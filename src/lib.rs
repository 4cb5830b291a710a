pub mod compliance;
pub mod concentration;
pub mod constants;
pub mod errors;
pub mod esg;
pub mod portfolio;
pub mod projects;
pub mod risk;
pub mod rules;
pub mod scenario;
pub mod utils;

pub use concentration::*;
pub use risk::*;
