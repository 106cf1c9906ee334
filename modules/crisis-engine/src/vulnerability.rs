//! Vulnerability scoring.
//!
//! Contributions accumulate from four rule tables (response time, coverage,
//! city hazard, severity). Rules are not exclusive: an uncovered category both
//! trips the slow-response band through the sentinel average and adds its
//! coverage penalty.

use tracing::debug;

use crisis_common::{
    DisasterType, EmergencyResponse, FactorKind, RiskLevel, RiskProfile, ServiceCategory,
    Vulnerability, VulnerabilityFactor, MAX_SCORE,
};

/// Average response assumed for a category with nothing in range.
pub const NO_COVERAGE_RESPONSE_MIN: f64 = 999.0;
pub const SEVERITY_WEIGHT: f64 = 10.0;

/// One response-time band: fires when the average exceeds `above_min`.
#[derive(Debug, Clone, Copy)]
pub struct ResponseBand {
    pub above_min: f64,
    pub weight: f64,
    pub factor: FactorKind,
    pub impact: RiskLevel,
}

/// Bands are checked in order; only the first match contributes.
#[derive(Debug, Clone, Copy)]
pub struct ResponseTimeRule {
    pub category: ServiceCategory,
    pub bands: [ResponseBand; 2],
}

pub const RESPONSE_TIME_RULES: [ResponseTimeRule; 2] = [
    ResponseTimeRule {
        category: ServiceCategory::Police,
        bands: [
            ResponseBand {
                above_min: 30.0,
                weight: 30.0,
                factor: FactorKind::SlowPoliceResponse,
                impact: RiskLevel::High,
            },
            ResponseBand {
                above_min: 15.0,
                weight: 15.0,
                factor: FactorKind::ModeratePoliceResponse,
                impact: RiskLevel::Medium,
            },
        ],
    },
    ResponseTimeRule {
        category: ServiceCategory::Fire,
        bands: [
            ResponseBand {
                above_min: 30.0,
                weight: 30.0,
                factor: FactorKind::SlowFireResponse,
                impact: RiskLevel::High,
            },
            ResponseBand {
                above_min: 15.0,
                weight: 15.0,
                factor: FactorKind::ModerateFireResponse,
                impact: RiskLevel::Medium,
            },
        ],
    },
];

#[derive(Debug, Clone, Copy)]
pub struct CoverageRule {
    pub category: ServiceCategory,
    pub weight: f64,
    pub factor: FactorKind,
}

pub const COVERAGE_RULES: [CoverageRule; 2] = [
    CoverageRule {
        category: ServiceCategory::Police,
        weight: 25.0,
        factor: FactorKind::NoPoliceCoverage,
    },
    CoverageRule {
        category: ServiceCategory::Fire,
        weight: 25.0,
        factor: FactorKind::NoFireCoverage,
    },
];

/// City hazard bonus: `exposure * weight` when the disaster matches and the
/// city has a non-zero exposure for it.
#[derive(Clone, Copy)]
pub struct HazardRule {
    pub disaster: DisasterType,
    pub exposure: fn(&RiskProfile) -> Option<f64>,
    pub weight: f64,
    pub factor: FactorKind,
}

// Only flood is scored. The other hazard fields on RiskProfile are display-only.
pub const HAZARD_RULES: [HazardRule; 1] = [HazardRule {
    disaster: DisasterType::Flood,
    exposure: flood_exposure,
    weight: 20.0,
    factor: FactorKind::HighFloodRisk,
}];

fn flood_exposure(profile: &RiskProfile) -> Option<f64> {
    profile.flood_risk
}

/// Score how poorly the located resources cover this disaster.
pub fn score_vulnerability(
    response: &EmergencyResponse,
    profile: &RiskProfile,
    disaster: DisasterType,
    severity: u8,
) -> Vulnerability {
    let mut raw = 0.0;
    let mut factors = Vec::new();

    for rule in &RESPONSE_TIME_RULES {
        let avg = response
            .average_response_min(rule.category)
            .unwrap_or(NO_COVERAGE_RESPONSE_MIN);
        if let Some(band) = rule.bands.iter().find(|b| avg > b.above_min) {
            raw += band.weight;
            factors.push(VulnerabilityFactor {
                kind: band.factor,
                value: Some(avg),
                impact: band.impact,
            });
        }
    }

    for rule in &COVERAGE_RULES {
        if response.count(rule.category) == 0 {
            raw += rule.weight;
            factors.push(VulnerabilityFactor {
                kind: rule.factor,
                value: None,
                impact: RiskLevel::Critical,
            });
        }
    }

    for rule in HAZARD_RULES.iter().filter(|r| r.disaster == disaster) {
        if let Some(exposure) = (rule.exposure)(profile).filter(|e| *e > 0.0) {
            raw += exposure * rule.weight;
            factors.push(VulnerabilityFactor {
                kind: rule.factor,
                value: Some(exposure),
                impact: RiskLevel::High,
            });
        }
    }

    raw += severity as f64 * SEVERITY_WEIGHT;

    let score = clamp_score(raw);
    let level = RiskLevel::from_score(score as f64);
    debug!(raw, score, %level, factors = factors.len(), "Scored vulnerability");

    Vulnerability {
        score,
        level,
        factors,
    }
}

/// Round and clamp a raw weighted sum into 0..=100.
pub fn clamp_score(raw: f64) -> u32 {
    raw.round().clamp(0.0, MAX_SCORE as f64) as u32
}
