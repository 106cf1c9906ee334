use crisis_common::{RiskAssessment, RiskLevel, SimulationResult};

use super::rules::{assessment_text, COVERAGE_RULES, RESPONSE_TIME_RULES, SEVERITY_RISK_WEIGHT};
use crate::vulnerability::clamp_score;

/// Independent risk score. Weighted differently from the vulnerability score
/// and never reconciled with it.
pub fn assess_risk(result: &SimulationResult) -> RiskAssessment {
    let response = &result.emergency_response;
    let mut raw = 0u32;
    let mut factors = Vec::new();

    for rule in &RESPONSE_TIME_RULES {
        let slow = response
            .average_response_min(rule.category)
            .is_some_and(|avg| avg > rule.above_min);
        if slow {
            raw += rule.risk_weight;
            factors.push(rule.risk_factor.to_string());
        }
    }

    for rule in &COVERAGE_RULES {
        if response.count(rule.category) == 0 {
            raw += rule.risk_weight;
            factors.push(rule.risk_factor.to_string());
        }
    }

    raw += result.severity as u32 * SEVERITY_RISK_WEIGHT;

    let score = clamp_score(raw as f64);
    let level = RiskLevel::from_score(score as f64);

    RiskAssessment {
        score,
        level,
        factors,
        assessment: assessment_text(level).to_string(),
    }
}
