//! Declarative advisory rule tables.
//!
//! Every rule the advisory engine evaluates lives here as data: an id, the
//! condition's threshold, its weight, and the text it emits. The evaluators in
//! the sibling modules only walk these tables.

use crisis_common::{
    DisasterType, InsightKind, OptimizationKind, Priority, Rating, Recommendation,
    RecommendationCategory, RiskLevel, ServiceCategory,
};

// --- Vulnerability-level insights ---

/// Fires when the vulnerability score is at least `min_score`. First match wins.
#[derive(Debug, Clone, Copy)]
pub struct ScoreRule {
    pub id: &'static str,
    pub min_score: u32,
    pub kind: InsightKind,
    pub priority: Priority,
    pub message: &'static str,
    pub impact: &'static str,
}

pub const SCORE_RULES: [ScoreRule; 2] = [
    ScoreRule {
        id: "critical_vulnerability",
        min_score: 70,
        kind: InsightKind::Critical,
        priority: Priority::High,
        message: "AI Analysis: Critical vulnerability detected. Immediate intervention required.",
        impact: "Area has insufficient emergency coverage for this disaster scenario.",
    },
    ScoreRule {
        id: "elevated_vulnerability",
        min_score: 50,
        kind: InsightKind::Warning,
        priority: Priority::Medium,
        message: "AI Analysis: Elevated risk level. Enhanced monitoring recommended.",
        impact: "Response times may be suboptimal during peak emergency conditions.",
    },
];

// --- Response-time rules (insights + risk assessment) ---

/// Fires when a covered category's average response exceeds `above_min`.
#[derive(Debug, Clone, Copy)]
pub struct ResponseTimeRule {
    pub id: &'static str,
    pub category: ServiceCategory,
    pub above_min: f64,
    pub label: &'static str,
    pub consequence: &'static str,
    pub insight_priority: Priority,
    pub suggestion: &'static str,
    pub risk_weight: u32,
    pub risk_factor: &'static str,
}

impl ResponseTimeRule {
    /// Minutes are shown to one decimal, halves rounded away from zero.
    pub fn message(&self, avg_min: f64) -> String {
        let shown = (avg_min * 10.0).round() / 10.0;
        format!(
            "AI Analysis: {} response time ({shown:.1} min) {}",
            self.label, self.consequence
        )
    }
}

pub const RESPONSE_TIME_RULES: [ResponseTimeRule; 3] = [
    ResponseTimeRule {
        id: "slow_police",
        category: ServiceCategory::Police,
        above_min: 20.0,
        label: "Police",
        consequence: "exceeds optimal threshold.",
        insight_priority: Priority::Medium,
        suggestion: "Consider pre-positioning units or establishing temporary stations in high-risk areas.",
        risk_weight: 25,
        risk_factor: "Slow police response time",
    },
    ResponseTimeRule {
        id: "slow_fire",
        category: ServiceCategory::Fire,
        above_min: 15.0,
        label: "Fire",
        consequence: "may impact containment effectiveness.",
        insight_priority: Priority::High,
        suggestion: "Fire response is critical - recommend additional fire stations or mobile units.",
        risk_weight: 30,
        risk_factor: "Slow fire response time",
    },
    ResponseTimeRule {
        id: "slow_medical",
        category: ServiceCategory::Medical,
        above_min: 25.0,
        label: "Medical",
        consequence: "could affect patient outcomes.",
        insight_priority: Priority::High,
        suggestion: "Consider establishing temporary medical facilities or ambulance staging areas.",
        risk_weight: 25,
        risk_factor: "Slow medical response time",
    },
];

// --- Coverage rules (insights + risk assessment) ---

#[derive(Debug, Clone, Copy)]
pub struct CoverageInsight {
    pub message: &'static str,
    pub suggestion: &'static str,
}

/// Fires when nothing in the category is in range.
#[derive(Debug, Clone, Copy)]
pub struct CoverageRule {
    pub id: &'static str,
    pub category: ServiceCategory,
    pub insight: Option<CoverageInsight>,
    pub risk_weight: u32,
    pub risk_factor: &'static str,
}

pub const COVERAGE_RULES: [CoverageRule; 3] = [
    CoverageRule {
        id: "no_police",
        category: ServiceCategory::Police,
        insight: Some(CoverageInsight {
            message: "AI Analysis: No police coverage in affected area - critical gap identified.",
            suggestion: "Immediate deployment of mobile units or coordination with neighboring jurisdictions required.",
        }),
        risk_weight: 20,
        risk_factor: "No police coverage",
    },
    CoverageRule {
        id: "no_fire",
        category: ServiceCategory::Fire,
        insight: Some(CoverageInsight {
            message: "AI Analysis: No fire coverage in affected area - extreme risk.",
            suggestion: "Emergency fire response must be established before disaster occurs.",
        }),
        risk_weight: 20,
        risk_factor: "No fire coverage",
    },
    CoverageRule {
        id: "no_medical",
        category: ServiceCategory::Medical,
        insight: None,
        risk_weight: 15,
        risk_factor: "No medical coverage",
    },
];

/// Risk points per unit of severity.
pub const SEVERITY_RISK_WEIGHT: u32 = 2;

pub fn assessment_text(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Critical => "Immediate action required. Area is critically vulnerable and requires emergency resource deployment.",
        RiskLevel::High => "Significant risk present. Enhanced monitoring and resource pre-positioning recommended.",
        RiskLevel::Medium => "Moderate risk level. Standard emergency protocols should be sufficient with monitoring.",
        RiskLevel::Low => "Low risk level. Area appears well-prepared for this disaster scenario.",
    }
}

// --- Recommendations ---

#[derive(Debug, Clone, Copy)]
pub struct RecommendationTemplate {
    pub category: RecommendationCategory,
    pub action: &'static str,
    pub rationale: &'static str,
    pub priority: Priority,
}

impl RecommendationTemplate {
    pub fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            category: self.category,
            action: self.action.to_string(),
            rationale: self.rationale.to_string(),
            priority: self.priority,
        }
    }
}

/// Severity at or above which the operations center is activated.
pub const ESCALATION_MIN_SEVERITY: u8 = 8;

pub const ESCALATION: RecommendationTemplate = RecommendationTemplate {
    category: RecommendationCategory::ImmediateAction,
    action: "Activate emergency operations center immediately",
    rationale: "High severity disaster requires full-scale emergency response coordination",
    priority: Priority::Critical,
};

/// Fires when fewer than `min_count` resources of the category are in range.
#[derive(Debug, Clone, Copy)]
pub struct DeploymentRule {
    pub id: &'static str,
    pub category: ServiceCategory,
    pub min_count: usize,
    pub template: RecommendationTemplate,
}

pub const DEPLOYMENT_RULES: [DeploymentRule; 2] = [
    DeploymentRule {
        id: "police_mutual_aid",
        category: ServiceCategory::Police,
        min_count: 2,
        template: RecommendationTemplate {
            category: RecommendationCategory::ResourceDeployment,
            action: "Deploy additional police units from neighboring precincts",
            rationale: "Insufficient police coverage for effective disaster response",
            priority: Priority::High,
        },
    },
    DeploymentRule {
        id: "fire_mutual_aid",
        category: ServiceCategory::Fire,
        min_count: 2,
        template: RecommendationTemplate {
            category: RecommendationCategory::ResourceDeployment,
            action: "Request mutual aid from adjacent fire departments",
            rationale: "Fire response capability is below minimum threshold",
            priority: Priority::Critical,
        },
    },
];

pub static DISASTER_TEMPLATES: [(DisasterType, RecommendationTemplate); 3] = [
    (
        DisasterType::Flood,
        RecommendationTemplate {
            category: RecommendationCategory::DisasterSpecific,
            action: "Pre-position water rescue equipment and establish evacuation routes",
            rationale: "Flood scenarios require specialized equipment and clear evacuation planning",
            priority: Priority::High,
        },
    ),
    (
        DisasterType::Hurricane,
        RecommendationTemplate {
            category: RecommendationCategory::DisasterSpecific,
            action: "Establish emergency shelters and secure critical infrastructure",
            rationale: "Hurricanes require long-term planning and shelter coordination",
            priority: Priority::High,
        },
    ),
    (
        DisasterType::Earthquake,
        RecommendationTemplate {
            category: RecommendationCategory::DisasterSpecific,
            action: "Deploy search and rescue teams and assess structural damage",
            rationale: "Earthquakes require specialized search and rescue capabilities",
            priority: Priority::Critical,
        },
    ),
];

pub fn disaster_template(disaster: DisasterType) -> Option<&'static RecommendationTemplate> {
    DISASTER_TEMPLATES
        .iter()
        .find(|(d, _)| *d == disaster)
        .map(|(_, template)| template)
}

pub const COMMUNICATION: RecommendationTemplate = RecommendationTemplate {
    category: RecommendationCategory::Communication,
    action: "Establish unified command structure and communication protocols",
    rationale: "Effective coordination requires clear communication channels",
    priority: Priority::Medium,
};

// --- Resource optimization ---

/// Buffer around the affected radius used when re-counting a city's stations.
pub const OPTIMIZATION_BUFFER_KM: f64 = 5.0;

#[derive(Debug, Clone, Copy)]
pub struct SuggestionTemplate {
    pub kind: OptimizationKind,
    pub suggestion: &'static str,
    pub impact: &'static str,
    pub feasibility: Rating,
    pub cost: Rating,
}

#[derive(Debug, Clone, Copy)]
pub struct PlacementRule {
    pub id: &'static str,
    pub category: ServiceCategory,
    pub min_nearby: usize,
    pub template: SuggestionTemplate,
}

pub const PLACEMENT_RULES: [PlacementRule; 2] = [
    PlacementRule {
        id: "police_command_post",
        category: ServiceCategory::Police,
        min_nearby: 2,
        template: SuggestionTemplate {
            kind: OptimizationKind::ResourcePlacement,
            suggestion: "Consider establishing a temporary police command post within the affected area",
            impact: "Would reduce response time by 40-60%",
            feasibility: Rating::High,
            cost: Rating::Low,
        },
    },
    PlacementRule {
        id: "mobile_fire_units",
        category: ServiceCategory::Fire,
        min_nearby: 2,
        template: SuggestionTemplate {
            kind: OptimizationKind::ResourcePlacement,
            suggestion: "Deploy mobile fire units to strategic locations around the affected area",
            impact: "Would improve fire response time by 50-70%",
            feasibility: Rating::Medium,
            cost: Rating::Medium,
        },
    },
];

pub const TRAFFIC_MANAGEMENT: SuggestionTemplate = SuggestionTemplate {
    kind: OptimizationKind::TrafficManagement,
    suggestion: "Establish emergency vehicle corridors and traffic control points",
    impact: "Would reduce response times by 15-25% during peak traffic",
    feasibility: Rating::High,
    cost: Rating::Low,
};

// --- Scenario comparison ---

/// Heuristic score reduction assumed achievable under optimal positioning.
pub const OPTIMAL_SCORE_OFFSET: u32 = 30;

/// Gap above which improvement notes are attached.
pub const IMPROVEMENT_NOTE_MIN_GAP: u32 = 20;

pub const IMPROVEMENT_NOTES: [&str; 2] = [
    "Significant improvement possible through resource optimization",
    "Strategic resource placement could reduce vulnerability substantially",
];

// --- Predictive projections ---

#[derive(Debug, Clone, Copy)]
pub struct ProjectionRule {
    pub name: &'static str,
    pub description: &'static str,
    /// Added to the base vulnerability score, then clamped into 0..=100.
    pub score_delta: i32,
    pub impact: &'static str,
}

pub const PROJECTIONS: [ProjectionRule; 3] = [
    ProjectionRule {
        name: "Escalated Severity",
        description: "What if severity increases to 10?",
        score_delta: 20,
        impact: "Response times would increase by 30-40%, requiring additional resources",
    },
    ProjectionRule {
        name: "Resource Constraint",
        description: "What if 50% of resources are unavailable?",
        score_delta: 35,
        impact: "Critical coverage gaps would emerge, requiring mutual aid",
    },
    ProjectionRule {
        name: "Optimal Response",
        description: "What if all resources are optimally positioned?",
        score_delta: -30,
        impact: "Response times could improve by 40-50% with strategic positioning",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rule_ids_are_unique() {
        let ids: Vec<&str> = SCORE_RULES
            .iter()
            .map(|r| r.id)
            .chain(RESPONSE_TIME_RULES.iter().map(|r| r.id))
            .chain(COVERAGE_RULES.iter().map(|r| r.id))
            .chain(DEPLOYMENT_RULES.iter().map(|r| r.id))
            .chain(PLACEMENT_RULES.iter().map(|r| r.id))
            .collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn score_rules_are_ordered_highest_first() {
        assert!(SCORE_RULES.windows(2).all(|w| w[0].min_score > w[1].min_score));
    }

    #[test]
    fn response_message_formats_one_decimal() {
        let rule = &RESPONSE_TIME_RULES[0];
        assert_eq!(
            rule.message(22.26),
            "AI Analysis: Police response time (22.3 min) exceeds optimal threshold."
        );
    }

    #[test]
    fn response_message_rounds_halves_up() {
        // Four stations at 20, 21, 23 and 25 minutes
        let rule = &RESPONSE_TIME_RULES[0];
        assert_eq!(
            rule.message(22.25),
            "AI Analysis: Police response time (22.3 min) exceeds optimal threshold."
        );
        assert_eq!(
            RESPONSE_TIME_RULES[1].message(16.75),
            "AI Analysis: Fire response time (16.8 min) may impact containment effectiveness."
        );
    }

    #[test]
    fn only_three_disasters_have_templates() {
        for disaster in DisasterType::ALL {
            let expected = matches!(
                disaster,
                DisasterType::Flood | DisasterType::Hurricane | DisasterType::Earthquake
            );
            assert_eq!(disaster_template(disaster).is_some(), expected, "{disaster}");
        }
        assert_eq!(
            disaster_template(DisasterType::Earthquake).map(|t| t.priority),
            Some(Priority::Critical)
        );
    }

    #[test]
    fn every_level_has_assessment_text() {
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High, RiskLevel::Critical] {
            assert!(!assessment_text(level).is_empty());
        }
    }
}
