use chrono::{DateTime, TimeZone, Utc};

use crisis_common::{
    AffectedArea, City, CrisisError, DisasterType, FactorKind, GeoPoint, PoliceStation,
    RiskLevel, RiskProfile, SimulationParams, SimulationRequest, TimelineStatus,
};
use crisis_engine::{distance_km, response_time_min, CityCatalog, Simulator, StaticCatalog};

const MIAMI_CENTER: GeoPoint = GeoPoint {
    lat: 25.7617,
    lng: -80.1918,
};

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn request(city_key: &str, disaster: DisasterType, severity: u8, radius_km: f64) -> SimulationRequest {
    SimulationRequest {
        city_key: city_key.to_string(),
        disaster_type: disaster,
        severity,
        affected_area: AffectedArea {
            center: MIAMI_CENTER,
            radius_km,
        },
    }
}

/// Miami center with only the downtown precinct and nothing else.
fn downtown_only() -> City {
    City {
        key: "downtown".to_string(),
        name: "Downtown".to_string(),
        coordinates: MIAMI_CENTER,
        population: 10_000,
        police_stations: vec![PoliceStation {
            id: 1,
            name: "Downtown Precinct".to_string(),
            lat: 25.7743,
            lng: -80.1937,
            officers: 45,
        }],
        fire_stations: vec![],
        hospitals: vec![],
        risk_profile: RiskProfile {
            flood_risk: Some(0.85),
            ..Default::default()
        },
    }
}

#[test]
fn downtown_flood_scenario() {
    let simulator = Simulator::new(StaticCatalog::new(vec![downtown_only()]).unwrap());
    let result = simulator
        .simulate_at(&request("downtown", DisasterType::Flood, 5, 5.0), at())
        .unwrap();

    let police = &result.emergency_response.police;
    assert_eq!(police.len(), 1);
    assert_eq!(police[0].distance_km, 1.4);
    assert_eq!(police[0].response_time_min, 5);

    let kinds: Vec<FactorKind> = result.vulnerability.factors.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FactorKind::SlowFireResponse,
            FactorKind::NoFireCoverage,
            FactorKind::HighFloodRisk,
        ]
    );
    // 30 + 25 + 17 + 50
    assert_eq!(result.vulnerability.score, 100);
    assert_eq!(result.vulnerability.level, RiskLevel::Critical);
}

#[test]
fn distance_is_symmetric_and_zero_on_self() {
    let points = [
        MIAMI_CENTER,
        GeoPoint::new(40.7128, -74.0060),
        GeoPoint::new(-33.8688, 151.2093),
        GeoPoint::new(0.0, 0.0),
    ];
    for a in points {
        assert_eq!(distance_km(a, a), 0.0);
        for b in points {
            assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
        }
    }
}

#[test]
fn response_time_never_below_floor() {
    for distance in [0.0, 0.1, 1.0, 4.9, 5.0, 12.3, 80.0] {
        for (speed, mult) in [(60.0, 1.0), (70.0, 1.0), (50.0, 1.2)] {
            assert!(response_time_min(distance, speed, mult) >= 5);
        }
    }
}

#[test]
fn scores_stay_in_range_for_every_builtin_city() {
    let simulator = Simulator::new(StaticCatalog::builtin().unwrap());
    let cities: Vec<City> = simulator.catalog().cities().to_vec();

    for city in &cities {
        for disaster in DisasterType::ALL {
            for severity in [1, 5, 10] {
                for radius_km in [0.0, 2.0, 10.0, 50.0] {
                    let req = SimulationRequest {
                        city_key: city.key.clone(),
                        disaster_type: disaster,
                        severity,
                        affected_area: AffectedArea {
                            center: city.coordinates,
                            radius_km,
                        },
                    };
                    let result = simulator.simulate_at(&req, at()).unwrap();
                    assert!(result.vulnerability.score <= 100);
                    let report = result.ai_analysis.as_ref().unwrap();
                    assert!(report.risk_assessment.score <= 100);

                    let timeline = &result.timeline;
                    assert_eq!(timeline[0].time_min, 0);
                    assert_eq!(timeline[0].status, TimelineStatus::Alert);
                    assert!(timeline.windows(2).all(|w| w[0].time_min <= w[1].time_min));
                    assert_eq!(
                        timeline.last().map(|e| e.status),
                        Some(TimelineStatus::Assessment)
                    );
                }
            }
        }
    }
}

#[test]
fn growing_radius_never_drops_resources() {
    let simulator = Simulator::new(StaticCatalog::builtin().unwrap());
    let mut previous: Option<(Vec<u32>, Vec<u32>, Vec<u32>)> = None;

    for radius_km in [0.0, 1.0, 3.0, 5.0, 8.0, 15.0, 30.0] {
        let result = simulator
            .simulate_at(&request("miami", DisasterType::Hurricane, 5, radius_km), at())
            .unwrap();
        let r = &result.emergency_response;
        let ids = (
            r.police.iter().map(|l| l.facility.id).collect::<Vec<_>>(),
            r.fire.iter().map(|l| l.facility.id).collect::<Vec<_>>(),
            r.hospitals.iter().map(|l| l.facility.id).collect::<Vec<_>>(),
        );
        if let Some((police, fire, hospitals)) = &previous {
            assert!(police.iter().all(|id| ids.0.contains(id)));
            assert!(fire.iter().all(|id| ids.1.contains(id)));
            assert!(hospitals.iter().all(|id| ids.2.contains(id)));
        }
        previous = Some(ids);
    }
}

#[test]
fn level_boundaries_are_exact() {
    for (score, level) in [
        (70.0, RiskLevel::Critical),
        (69.0, RiskLevel::High),
        (50.0, RiskLevel::High),
        (49.0, RiskLevel::Medium),
        (30.0, RiskLevel::Medium),
        (29.0, RiskLevel::Low),
    ] {
        assert_eq!(RiskLevel::from_score(score), level, "score {score}");
    }
}

#[test]
fn missing_fields_are_invalid_requests() {
    let params: SimulationParams = serde_json::from_value(serde_json::json!({
        "cityKey": "miami",
        "severity": 5
    }))
    .unwrap();
    let err = params.into_request().unwrap_err();
    assert!(matches!(err, CrisisError::InvalidRequest(_)));
}

#[test]
fn params_default_severity_and_simulate() {
    let params: SimulationParams = serde_json::from_value(serde_json::json!({
        "cityKey": "boston",
        "disasterType": "blizzard",
        "affectedArea": { "center": { "lat": 42.3601, "lng": -71.0589 }, "radius": 4 }
    }))
    .unwrap();
    let req = params.into_request().unwrap();
    assert_eq!(req.severity, 5);

    let simulator = Simulator::new(StaticCatalog::builtin().unwrap());
    let result = simulator.simulate_at(&req, at()).unwrap();
    assert_eq!(result.city, "Boston, MA");
    assert_eq!(result.severity, 5);
}

#[test]
fn unknown_city_is_not_found() {
    let catalog = StaticCatalog::builtin().unwrap();
    assert!(matches!(catalog.lookup("gotham"), Err(CrisisError::NotFound(_))));

    let simulator = Simulator::new(catalog);
    let err = simulator
        .simulate(&request("gotham", DisasterType::Flood, 5, 5.0))
        .unwrap_err();
    assert_eq!(err.to_string(), "City not found: gotham");
}
