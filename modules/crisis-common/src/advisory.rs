//! Advisory output types. Derived values with no back-reference to the simulation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Feasibility / cost grade on optimization suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rating {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Critical,
    Warning,
    Performance,
    Coverage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationCategory {
    #[serde(rename = "Immediate Action")]
    ImmediateAction,
    #[serde(rename = "Resource Deployment")]
    ResourceDeployment,
    #[serde(rename = "Disaster-Specific")]
    DisasterSpecific,
    Communication,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub action: String,
    pub rationale: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// 0..=100, weighted independently of the vulnerability score.
    pub score: u32,
    pub level: RiskLevel,
    pub factors: Vec<String>,
    pub assessment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizationKind {
    #[serde(rename = "Resource Placement")]
    ResourcePlacement,
    #[serde(rename = "Traffic Management")]
    TrafficManagement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSuggestion {
    #[serde(rename = "type")]
    pub kind: OptimizationKind,
    pub suggestion: String,
    pub impact: String,
    pub feasibility: Rating,
    pub cost: Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSnapshot {
    pub vulnerability: u32,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalScenario {
    pub vulnerability: u32,
    pub level: RiskLevel,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    pub current: ScenarioSnapshot,
    pub optimal: OptimalScenario,
    pub gap: u32,
    /// e.g. "38% reduction possible"
    pub improvement_potential: String,
}

/// A "what-if" projection derived from a base simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProjection {
    pub name: String,
    pub description: String,
    pub predicted_vulnerability: u32,
    pub predicted_impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryReport {
    pub timestamp: DateTime<Utc>,
    pub agent_type: String,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<Recommendation>,
    pub risk_assessment: RiskAssessment,
    pub resource_optimization: Vec<OptimizationSuggestion>,
    pub scenario_comparison: ScenarioComparison,
}
