pub mod compliance_model;
pub mod compliance_service;
pub mod taxonomy;

pub use compliance_model::{
    ComplianceOverallStatus, ComplianceStatusResponse, DnshCheck, DnshStatus, PaiIndicator,
    PaiStatus, TaxonomyResult,
};
pub use compliance_service::ComplianceService;
pub use taxonomy::TaxonomyChecker;
