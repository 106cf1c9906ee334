//! Resource location: which stations and hospitals can reach an affected area.
//!
//! A facility is in range when its great-circle distance from the area center
//! is within `radius + buffer` for its category. Availability is annotated but
//! never used to exclude a facility.

use tracing::debug;

use crisis_common::{
    AffectedArea, City, EmergencyResponse, Facility, FireStation, Hospital, Located,
    PoliceStation, ServiceCategory,
};

use crate::geo::{distance_km, response_time_min, round_tenth};

/// Per-category reach and travel parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchProfile {
    pub category: ServiceCategory,
    /// Kilometers added to the affected radius when deciding reach.
    pub buffer_km: f64,
    pub base_speed_kmh: f64,
    pub traffic_multiplier: f64,
}

pub static DISPATCH_PROFILES: [DispatchProfile; 3] = [
    DispatchProfile {
        category: ServiceCategory::Police,
        buffer_km: 5.0,
        base_speed_kmh: 60.0,
        traffic_multiplier: 1.0,
    },
    DispatchProfile {
        category: ServiceCategory::Fire,
        buffer_km: 5.0,
        base_speed_kmh: 70.0,
        traffic_multiplier: 1.0,
    },
    DispatchProfile {
        category: ServiceCategory::Medical,
        buffer_km: 10.0,
        base_speed_kmh: 50.0,
        traffic_multiplier: 1.2,
    },
];

impl DispatchProfile {
    pub fn for_category(category: ServiceCategory) -> &'static DispatchProfile {
        match category {
            ServiceCategory::Police => &DISPATCH_PROFILES[0],
            ServiceCategory::Fire => &DISPATCH_PROFILES[1],
            ServiceCategory::Medical => &DISPATCH_PROFILES[2],
        }
    }

    /// Maximum distance from the area center that still counts as in range.
    pub fn reach_km(&self, area: &AffectedArea) -> f64 {
        area.radius_km + self.buffer_km
    }
}

/// A facility type the locator knows how to annotate.
pub trait Dispatchable: Facility + Clone {
    const CATEGORY: ServiceCategory;

    fn available(&self) -> Option<bool> {
        None
    }

    fn capacity(&self) -> Option<u32> {
        None
    }
}

impl Dispatchable for PoliceStation {
    const CATEGORY: ServiceCategory = ServiceCategory::Police;

    fn available(&self) -> Option<bool> {
        Some(self.officers > 0)
    }
}

impl Dispatchable for FireStation {
    const CATEGORY: ServiceCategory = ServiceCategory::Fire;

    fn available(&self) -> Option<bool> {
        Some(self.units > 0)
    }
}

impl Dispatchable for Hospital {
    const CATEGORY: ServiceCategory = ServiceCategory::Medical;

    fn capacity(&self) -> Option<u32> {
        Some(self.beds)
    }
}

/// Distance from the area center if the facility lies within `reach_km`.
pub fn within_reach<F: Facility>(area: &AffectedArea, facility: &F, reach_km: f64) -> Option<f64> {
    let distance = distance_km(area.center, facility.position());
    (distance <= reach_km).then_some(distance)
}

/// Count facilities within `reach_km` of the area center.
pub fn count_within<F: Facility>(area: &AffectedArea, facilities: &[F], reach_km: f64) -> usize {
    facilities
        .iter()
        .filter(|f| within_reach(area, *f, reach_km).is_some())
        .count()
}

/// Locate and annotate the facilities of one category, preserving input order.
pub fn locate<F: Dispatchable>(area: &AffectedArea, facilities: &[F]) -> Vec<Located<F>> {
    let category = F::CATEGORY;
    let profile = DispatchProfile::for_category(category);
    let reach = profile.reach_km(area);

    let located: Vec<Located<F>> = facilities
        .iter()
        .filter_map(|facility| {
            let distance = within_reach(area, facility, reach)?;
            Some(Located {
                facility: facility.clone(),
                distance_km: round_tenth(distance),
                response_time_min: response_time_min(
                    distance,
                    profile.base_speed_kmh,
                    profile.traffic_multiplier,
                ),
                available: facility.available(),
                capacity: facility.capacity(),
            })
        })
        .collect();

    debug!(
        category = %category,
        reach_km = reach,
        total = facilities.len(),
        in_range = located.len(),
        "Located facilities"
    );
    located
}

/// Locate every category for a city.
pub fn locate_all(city: &City, area: &AffectedArea) -> EmergencyResponse {
    EmergencyResponse {
        police: locate(area, &city.police_stations),
        fire: locate(area, &city.fire_stations),
        hospitals: locate(area, &city.hospitals),
    }
}
