use crisis_common::{Recommendation, SimulationResult};

use super::rules::{
    disaster_template, COMMUNICATION, DEPLOYMENT_RULES, ESCALATION, ESCALATION_MIN_SEVERITY,
};

/// Strategic recommendations. The communication recommendation is always last.
pub fn recommend(result: &SimulationResult) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if result.severity >= ESCALATION_MIN_SEVERITY {
        recommendations.push(ESCALATION.to_recommendation());
    }

    for rule in &DEPLOYMENT_RULES {
        if result.emergency_response.count(rule.category) < rule.min_count {
            recommendations.push(rule.template.to_recommendation());
        }
    }

    if let Some(template) = disaster_template(result.disaster_type) {
        recommendations.push(template.to_recommendation());
    }

    recommendations.push(COMMUNICATION.to_recommendation());
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::fixtures::*;
    use crisis_common::{DisasterType, EmergencyResponse, Priority, RecommendationCategory};

    fn categories(recs: &[Recommendation]) -> Vec<RecommendationCategory> {
        recs.iter().map(|r| r.category).collect()
    }

    #[test]
    fn well_covered_wildfire_only_gets_communication() {
        let recs = recommend(&result(well_covered(), DisasterType::Wildfire, 4, 40));
        assert_eq!(categories(&recs), vec![RecommendationCategory::Communication]);
        assert_eq!(recs[0].priority, Priority::Medium);
    }

    #[test]
    fn severe_sparse_earthquake_gets_everything_in_order() {
        let response = EmergencyResponse {
            police: vec![police(1, 5)],
            fire: vec![],
            hospitals: vec![],
        };
        let recs = recommend(&result(response, DisasterType::Earthquake, 8, 90));
        assert_eq!(
            categories(&recs),
            vec![
                RecommendationCategory::ImmediateAction,
                RecommendationCategory::ResourceDeployment,
                RecommendationCategory::ResourceDeployment,
                RecommendationCategory::DisasterSpecific,
                RecommendationCategory::Communication,
            ]
        );
        assert_eq!(recs[0].priority, Priority::Critical);
        assert!(recs[1].action.contains("police"));
        assert_eq!(recs[2].priority, Priority::Critical);
        assert_eq!(recs[3].priority, Priority::Critical);
    }

    #[test]
    fn severity_seven_does_not_escalate() {
        let recs = recommend(&result(well_covered(), DisasterType::Flood, 7, 70));
        assert!(!categories(&recs).contains(&RecommendationCategory::ImmediateAction));
    }

    #[test]
    fn communication_appears_exactly_once_and_last() {
        for disaster in DisasterType::ALL {
            for severity in [1, 5, 8, 10] {
                let recs = recommend(&result(EmergencyResponse::default(), disaster, severity, 50));
                let comms = recs
                    .iter()
                    .filter(|r| r.category == RecommendationCategory::Communication)
                    .count();
                assert_eq!(comms, 1);
                assert_eq!(
                    recs.last().map(|r| r.category),
                    Some(RecommendationCategory::Communication)
                );
            }
        }
    }
}
