use crisis_common::{
    OptimalScenario, RiskLevel, ScenarioComparison, ScenarioSnapshot, Vulnerability,
};

use super::rules::{IMPROVEMENT_NOTES, IMPROVEMENT_NOTE_MIN_GAP, OPTIMAL_SCORE_OFFSET};

/// Compare the simulated vulnerability with a heuristic optimal-positioning score.
pub fn compare_scenarios(vulnerability: &Vulnerability) -> ScenarioComparison {
    let current = vulnerability.score;
    let optimal = current.saturating_sub(OPTIMAL_SCORE_OFFSET);
    let gap = current - optimal;

    let improvements = if gap > IMPROVEMENT_NOTE_MIN_GAP {
        IMPROVEMENT_NOTES.iter().map(|n| n.to_string()).collect()
    } else {
        Vec::new()
    };

    ScenarioComparison {
        current: ScenarioSnapshot {
            vulnerability: current,
            level: vulnerability.level,
        },
        optimal: OptimalScenario {
            vulnerability: optimal,
            level: RiskLevel::from_score(optimal as f64),
            improvements,
        },
        gap,
        improvement_potential: improvement_potential(current, optimal),
    }
}

/// Percentage reduction from `current` to `optimal`, e.g. "38% reduction possible".
/// A zero current score has nothing to reduce.
pub fn improvement_potential(current: u32, optimal: u32) -> String {
    if current == 0 {
        return "0% reduction possible".to_string();
    }
    let pct = (current.saturating_sub(optimal)) as f64 / current as f64 * 100.0;
    format!("{}% reduction possible", pct.round() as u32)
}
