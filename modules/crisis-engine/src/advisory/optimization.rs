use crisis_common::{City, OptimizationSuggestion, ServiceCategory, SimulationResult};

use super::rules::{SuggestionTemplate, OPTIMIZATION_BUFFER_KM, PLACEMENT_RULES, TRAFFIC_MANAGEMENT};
use crate::locator::count_within;

/// Placement and traffic suggestions.
///
/// Nearby counts come from the city's full station rosters around the
/// affected area, not from the simulation's located subset.
pub fn optimize_resources(result: &SimulationResult, city: &City) -> Vec<OptimizationSuggestion> {
    let area = &result.affected_area;
    let reach = area.radius_km + OPTIMIZATION_BUFFER_KM;

    let mut suggestions: Vec<OptimizationSuggestion> = PLACEMENT_RULES
        .iter()
        .filter(|rule| {
            let nearby = match rule.category {
                ServiceCategory::Police => count_within(area, &city.police_stations, reach),
                ServiceCategory::Fire => count_within(area, &city.fire_stations, reach),
                ServiceCategory::Medical => count_within(area, &city.hospitals, reach),
            };
            nearby < rule.min_nearby
        })
        .map(|rule| to_suggestion(&rule.template))
        .collect();

    suggestions.push(to_suggestion(&TRAFFIC_MANAGEMENT));
    suggestions
}

fn to_suggestion(template: &SuggestionTemplate) -> OptimizationSuggestion {
    OptimizationSuggestion {
        kind: template.kind,
        suggestion: template.suggestion.to_string(),
        impact: template.impact.to_string(),
        feasibility: template.feasibility,
        cost: template.cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::fixtures::*;
    use crisis_common::{
        DisasterType, EmergencyResponse, FireStation, OptimizationKind, PoliceStation, Rating,
    };

    fn station(id: u32, lat: f64) -> PoliceStation {
        PoliceStation {
            id,
            name: format!("P{id}"),
            lat,
            lng: 0.0,
            officers: 5,
        }
    }

    fn fire_station(id: u32, lat: f64) -> FireStation {
        FireStation {
            id,
            name: format!("F{id}"),
            lat,
            lng: 0.0,
            units: 2,
        }
    }

    #[test]
    fn empty_city_gets_both_placements_then_traffic() {
        let r = result(EmergencyResponse::default(), DisasterType::Flood, 5, 50);
        let suggestions = optimize_resources(&r, &empty_city("t"));
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions[0].suggestion.contains("police command post"));
        assert_eq!(suggestions[0].feasibility, Rating::High);
        assert_eq!(suggestions[0].cost, Rating::Low);
        assert!(suggestions[1].suggestion.contains("mobile fire units"));
        assert_eq!(suggestions[2].kind, OptimizationKind::TrafficManagement);
    }

    #[test]
    fn stations_near_the_area_suppress_placement() {
        let mut city = empty_city("t");
        city.police_stations = vec![station(1, 0.01), station(2, 0.02)];
        city.fire_stations = vec![fire_station(1, 0.01), fire_station(2, 0.05)];

        let r = result(EmergencyResponse::default(), DisasterType::Flood, 5, 50);
        let suggestions = optimize_resources(&r, &city);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, OptimizationKind::TrafficManagement);
    }

    #[test]
    fn counts_use_the_city_roster_not_the_located_subset() {
        // One station is ~1km away, the other ~50km: outside radius 5 + 5
        let mut city = empty_city("t");
        city.police_stations = vec![station(1, 0.01), station(2, 0.45)];
        city.fire_stations = vec![fire_station(1, 0.01), fire_station(2, 0.02)];

        let r = result(well_covered(), DisasterType::Flood, 5, 50);
        let suggestions = optimize_resources(&r, &city);
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions[0].suggestion.contains("police"));
    }
}
