use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal precision for valuation calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Functional currency of the platform; exposure to anything else is tracked
pub const FUNCTIONAL_CURRENCY: &str = "USD";

/// Share of invested capital above which a bucket counts as concentrated (strict >)
pub const CONCENTRATION_THRESHOLD: Decimal = dec!(0.25);

/// Non-functional-currency share that triggers a currency risk finding
pub const CURRENCY_EXPOSURE_THRESHOLD: Decimal = dec!(0.10);

/// Illiquid share of holdings that triggers a liquidity finding
pub const ILLIQUID_RATIO_THRESHOLD: f64 = 0.8;

/// Climate-exposed share of invested capital that triggers a climate finding
pub const CLIMATE_EXPOSURE_THRESHOLD: Decimal = dec!(0.30);

/// Cap on the modified-duration haircut in interest rate scenarios
pub const MAX_RATE_HAIRCUT: Decimal = dec!(0.5);

/// Per-holding deltas below this absolute value are left out of the waterfall
pub const WATERFALL_MIN_DELTA: Decimal = dec!(0.01);

/// Number of ranked risks surfaced on the dashboard
pub const TOP_RISKS_LIMIT: usize = 5;

// Severity weights used for domain scoring and risk ranking
pub const SEVERITY_WEIGHT_LOW: f64 = 15.0;
pub const SEVERITY_WEIGHT_MEDIUM: f64 = 35.0;
pub const SEVERITY_WEIGHT_HIGH: f64 = 60.0;
pub const SEVERITY_WEIGHT_CRITICAL: f64 = 85.0;

// Five-domain score bucket thresholds (inclusive lower bounds)
pub const DOMAIN_LEVEL_CRITICAL: f64 = 75.0;
pub const DOMAIN_LEVEL_HIGH: f64 = 50.0;
pub const DOMAIN_LEVEL_MEDIUM: f64 = 25.0;

/// Minimum sustainable investment percentage for an Article 8 fund
pub const ARTICLE_8_SUSTAINABLE_THRESHOLD: Decimal = dec!(50);

/// Minimum sustainable investment percentage for an Article 9 fund
pub const ARTICLE_9_SUSTAINABLE_THRESHOLD: Decimal = dec!(80);

/// Clean-technology value share above which GHG scope PAIs report as met
pub const PAI_CLEAN_TECH_THRESHOLD: Decimal = dec!(0.8);

// ESG dimension weights (overall = E*0.4 + S*0.3 + G*0.3)
pub const ESG_ENVIRONMENT_WEIGHT: f64 = 0.4;
pub const ESG_SOCIAL_WEIGHT: f64 = 0.3;
pub const ESG_GOVERNANCE_WEIGHT: f64 = 0.3;

// Neutral baselines applied when extracted ESG data is absent
pub const DEFAULT_ENERGY_EFFICIENCY_SCORE: f64 = 70.0;
pub const DEFAULT_JOBS_IMPACT_SCORE: f64 = 50.0;
pub const DEFAULT_WASTE_MANAGEMENT_SCORE: f64 = 70.0;
pub const DEFAULT_WATER_USAGE_SCORE: f64 = 70.0;
pub const DEFAULT_COMMUNITY_IMPACT_SCORE: f64 = 70.0;
pub const DEFAULT_LABOR_PRACTICES_SCORE: f64 = 75.0;
pub const DEFAULT_HEALTH_SAFETY_SCORE: f64 = 60.0;
pub const DEFAULT_BOARD_INDEPENDENCE_SCORE: f64 = 70.0;
pub const DEFAULT_TRANSPARENCY_SCORE: f64 = 65.0;
pub const DEFAULT_BUSINESS_ETHICS_SCORE: f64 = 80.0;
pub const DEFAULT_REGULATORY_COMPLIANCE_SCORE: f64 = 75.0;

/// Carbon-footprint baseline for project types absent from the lookup table
pub const DEFAULT_CARBON_FOOTPRINT_SCORE: f64 = 50.0;
