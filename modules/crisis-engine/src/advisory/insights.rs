use crisis_common::{Insight, InsightKind, Priority, SimulationResult};

use super::rules::{COVERAGE_RULES, RESPONSE_TIME_RULES, SCORE_RULES};

/// Observations about a finished simulation, in rule-table order:
/// overall vulnerability, slow categories, uncovered categories.
pub fn derive_insights(result: &SimulationResult) -> Vec<Insight> {
    let mut insights = Vec::new();
    let response = &result.emergency_response;

    let score = result.vulnerability.score;
    if let Some(rule) = SCORE_RULES.iter().find(|r| score >= r.min_score) {
        insights.push(Insight {
            kind: rule.kind,
            message: rule.message.to_string(),
            priority: rule.priority,
            suggestion: None,
            impact: Some(rule.impact.to_string()),
        });
    }

    for rule in &RESPONSE_TIME_RULES {
        let Some(avg) = response.average_response_min(rule.category) else {
            continue;
        };
        if avg > rule.above_min {
            insights.push(Insight {
                kind: InsightKind::Performance,
                message: rule.message(avg),
                priority: rule.insight_priority,
                suggestion: Some(rule.suggestion.to_string()),
                impact: None,
            });
        }
    }

    for rule in &COVERAGE_RULES {
        let Some(insight) = rule.insight else {
            continue;
        };
        if response.count(rule.category) == 0 {
            insights.push(Insight {
                kind: InsightKind::Coverage,
                message: insight.message.to_string(),
                priority: Priority::Critical,
                suggestion: Some(insight.suggestion.to_string()),
                impact: None,
            });
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::fixtures::*;
    use crisis_common::{DisasterType, EmergencyResponse};

    #[test]
    fn quiet_scenario_has_no_insights() {
        let r = result(well_covered(), DisasterType::Flood, 2, 20);
        assert!(derive_insights(&r).is_empty());
    }

    #[test]
    fn only_the_highest_score_rule_fires() {
        let r = result(well_covered(), DisasterType::Flood, 9, 85);
        let insights = derive_insights(&r);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Critical);
        assert_eq!(insights[0].priority, Priority::High);
        assert!(insights[0].impact.is_some());

        let r = result(well_covered(), DisasterType::Flood, 5, 55);
        let insights = derive_insights(&r);
        assert_eq!(insights[0].kind, InsightKind::Warning);
        assert_eq!(insights[0].priority, Priority::Medium);
    }

    #[test]
    fn slow_categories_produce_performance_insights() {
        let response = EmergencyResponse {
            police: vec![police(1, 20), police(2, 25)],
            fire: vec![fire(1, 16)],
            hospitals: vec![hospital(1, 25)],
        };
        let insights = derive_insights(&result(response, DisasterType::Earthquake, 3, 40));
        assert_eq!(insights.len(), 2);
        assert!(insights.iter().all(|i| i.kind == InsightKind::Performance));
        assert_eq!(
            insights[0].message,
            "AI Analysis: Police response time (22.5 min) exceeds optimal threshold."
        );
        assert_eq!(insights[1].priority, Priority::High);
        assert!(insights[1].message.starts_with("AI Analysis: Fire response time (16.0 min)"));
    }

    #[test]
    fn missing_police_is_a_critical_coverage_gap() {
        let response = EmergencyResponse {
            police: vec![],
            ..well_covered()
        };
        let insights = derive_insights(&result(response, DisasterType::Flood, 1, 35));
        let coverage: Vec<_> = insights
            .iter()
            .filter(|i| i.kind == InsightKind::Coverage)
            .collect();
        assert_eq!(coverage.len(), 1);
        assert_eq!(coverage[0].priority, Priority::Critical);
        assert!(coverage[0].message.contains("No police coverage"));
    }

    #[test]
    fn missing_hospitals_raise_no_coverage_insight() {
        let response = EmergencyResponse {
            hospitals: vec![],
            ..well_covered()
        };
        assert!(derive_insights(&result(response, DisasterType::Flood, 1, 10)).is_empty());
    }

    #[test]
    fn uncovered_categories_are_not_reported_as_slow() {
        let insights = derive_insights(&result(
            EmergencyResponse::default(),
            DisasterType::Flood,
            1,
            10,
        ));
        assert!(insights.iter().all(|i| i.kind == InsightKind::Coverage));
        assert_eq!(insights.len(), 2);
    }
}
