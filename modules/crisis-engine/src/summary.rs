use crisis_common::{CategorySummary, EmergencyResponse, ResponseSummary, ServiceCategory};

/// Per-category counts and fastest response times.
pub fn summarize(response: &EmergencyResponse) -> ResponseSummary {
    let category = |c: ServiceCategory| CategorySummary {
        count: response.count(c),
        fastest_response: response.fastest(c).map(|(_, minutes)| minutes),
    };

    ResponseSummary {
        police: category(ServiceCategory::Police),
        fire: category(ServiceCategory::Fire),
        medical: category(ServiceCategory::Medical),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crisis_common::{Hospital, Located};

    #[test]
    fn empty_response_has_no_fastest_times() {
        let summary = summarize(&EmergencyResponse::default());
        assert_eq!(summary.police.count, 0);
        assert_eq!(summary.police.fastest_response, None);
        assert_eq!(summary.medical.fastest_response, None);
    }

    #[test]
    fn medical_fastest_is_minimum() {
        let hospital = |minutes| Located {
            facility: Hospital {
                id: minutes,
                name: format!("H{minutes}"),
                lat: 0.0,
                lng: 0.0,
                beds: 100,
            },
            distance_km: 1.0,
            response_time_min: minutes,
            available: None,
            capacity: Some(100),
        };
        let response = EmergencyResponse {
            hospitals: vec![hospital(14), hospital(9), hospital(22)],
            ..Default::default()
        };
        let summary = summarize(&response);
        assert_eq!(summary.medical.count, 3);
        assert_eq!(summary.medical.fastest_response, Some(9));
    }
}
