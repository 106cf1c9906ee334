use tracing::debug;

use crisis_common::{City, DisasterType, ScenarioProjection, SimulationResult};

use super::rules::PROJECTIONS;

/// Three fixed "what-if" projections off a base simulation's vulnerability score.
pub fn predict_scenarios(
    city: &City,
    disaster: DisasterType,
    base: &SimulationResult,
) -> [ScenarioProjection; 3] {
    let score = base.vulnerability.score as i64;
    debug!(city = city.key.as_str(), %disaster, base_score = score, "Projecting scenarios");

    PROJECTIONS.map(|rule| ScenarioProjection {
        name: rule.name.to_string(),
        description: rule.description.to_string(),
        predicted_vulnerability: (score + rule.score_delta as i64).clamp(0, 100) as u32,
        predicted_impact: rule.impact.to_string(),
    })
}
