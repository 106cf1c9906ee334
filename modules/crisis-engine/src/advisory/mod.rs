//! Rule-based advisory over a finished simulation.
//!
//! Nothing here is learned or fetched: every insight, recommendation and
//! suggestion comes from a table in [`rules`], evaluated against the
//! simulation result (and, for placement suggestions, the city rosters).

mod comparison;
mod insights;
mod optimization;
mod predict;
mod recommendations;
mod risk;
pub mod rules;

use chrono::{DateTime, Utc};
use tracing::info;

use crisis_common::{AdvisoryReport, City, SimulationResult};

pub use comparison::{compare_scenarios, improvement_potential};
pub use insights::derive_insights;
pub use optimization::optimize_resources;
pub use predict::predict_scenarios;
pub use recommendations::recommend;
pub use risk::assess_risk;

/// What the advisor reports itself as and which analyses it advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvisoryPolicy {
    pub agent_type: &'static str,
    pub capabilities: &'static [&'static str],
}

impl AdvisoryPolicy {
    pub const COORDINATOR: AdvisoryPolicy = AdvisoryPolicy {
        agent_type: "Emergency Response Coordinator",
        capabilities: &[
            "vulnerability_analysis",
            "resource_optimization",
            "scenario_prediction",
            "strategic_planning",
            "risk_assessment",
        ],
    };

    pub fn supports(&self, capability: &str) -> bool {
        self.capabilities.contains(&capability)
    }
}

impl Default for AdvisoryPolicy {
    fn default() -> Self {
        Self::COORDINATOR
    }
}

/// Analyze a simulation result for `city`, stamped with the current time.
pub fn analyze(policy: &AdvisoryPolicy, result: &SimulationResult, city: &City) -> AdvisoryReport {
    analyze_at(policy, result, city, Utc::now())
}

/// Same as [`analyze`] with an explicit timestamp.
pub fn analyze_at(
    policy: &AdvisoryPolicy,
    result: &SimulationResult,
    city: &City,
    timestamp: DateTime<Utc>,
) -> AdvisoryReport {
    let report = AdvisoryReport {
        timestamp,
        agent_type: policy.agent_type.to_string(),
        insights: derive_insights(result),
        recommendations: recommend(result),
        risk_assessment: assess_risk(result),
        resource_optimization: optimize_resources(result, city),
        scenario_comparison: compare_scenarios(&result.vulnerability),
    };

    info!(
        city = city.key.as_str(),
        disaster = %result.disaster_type,
        insights = report.insights.len(),
        recommendations = report.recommendations.len(),
        risk = %report.risk_assessment.level,
        "Advisory analysis complete"
    );
    report
}
