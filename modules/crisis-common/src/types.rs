use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::advisory::AdvisoryReport;
use crate::error::CrisisError;

// --- Geo Types ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Circular area hit by the disaster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffectedArea {
    pub center: GeoPoint,
    #[serde(rename = "radius", alias = "radiusKm")]
    pub radius_km: f64,
}

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisasterType {
    Flood,
    Hurricane,
    Earthquake,
    Wildfire,
    Tsunami,
    Blizzard,
}

impl DisasterType {
    pub const ALL: [DisasterType; 6] = [
        DisasterType::Flood,
        DisasterType::Hurricane,
        DisasterType::Earthquake,
        DisasterType::Wildfire,
        DisasterType::Tsunami,
        DisasterType::Blizzard,
    ];
}

impl std::fmt::Display for DisasterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisasterType::Flood => write!(f, "flood"),
            DisasterType::Hurricane => write!(f, "hurricane"),
            DisasterType::Earthquake => write!(f, "earthquake"),
            DisasterType::Wildfire => write!(f, "wildfire"),
            DisasterType::Tsunami => write!(f, "tsunami"),
            DisasterType::Blizzard => write!(f, "blizzard"),
        }
    }
}

/// Emergency service categories dispatched to an affected area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Police,
    Fire,
    Medical,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 3] = [
        ServiceCategory::Police,
        ServiceCategory::Fire,
        ServiceCategory::Medical,
    ];
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceCategory::Police => write!(f, "police"),
            ServiceCategory::Fire => write!(f, "fire"),
            ServiceCategory::Medical => write!(f, "medical"),
        }
    }
}

/// Four-tier level shared by vulnerability scores, risk assessments and factor impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Lower bound (inclusive) of each tier above `Low`, highest first.
pub const RISK_TIERS: [(f64, RiskLevel); 3] = [
    (70.0, RiskLevel::Critical),
    (50.0, RiskLevel::High),
    (30.0, RiskLevel::Medium),
];

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        RISK_TIERS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, level)| *level)
            .unwrap_or(RiskLevel::Low)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Critical => write!(f, "Critical"),
        }
    }
}

// --- City reference data ---

/// Anything the locator can place on the map.
pub trait Facility {
    fn name(&self) -> &str;
    fn position(&self) -> GeoPoint;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoliceStation {
    pub id: u32,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub officers: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireStation {
    pub id: u32,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub units: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: u32,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub beds: u32,
}

macro_rules! impl_facility {
    ($($ty:ty),*) => {
        $(
            impl Facility for $ty {
                fn name(&self) -> &str {
                    &self.name
                }

                fn position(&self) -> GeoPoint {
                    GeoPoint::new(self.lat, self.lng)
                }
            }
        )*
    };
}

impl_facility!(PoliceStation, FireStation, Hospital);

/// Static hazard profile. Fields are present only for hazards relevant to the city.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flood_risk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hurricane_risk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earthquake_risk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildfire_risk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsunami_risk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blizzard_risk: Option<f64>,
    /// Sea-level exposure in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sea_level: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub key: String,
    pub name: String,
    pub coordinates: GeoPoint,
    pub population: u64,
    #[serde(default)]
    pub police_stations: Vec<PoliceStation>,
    #[serde(default)]
    pub fire_stations: Vec<FireStation>,
    #[serde(default)]
    pub hospitals: Vec<Hospital>,
    #[serde(rename = "vulnerability", default)]
    pub risk_profile: RiskProfile,
}

/// Listing view of a city, without its station rosters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySummary {
    pub key: String,
    pub name: String,
    pub coordinates: GeoPoint,
    pub population: u64,
    pub vulnerability: RiskProfile,
}

impl From<&City> for CitySummary {
    fn from(city: &City) -> Self {
        Self {
            key: city.key.clone(),
            name: city.name.clone(),
            coordinates: city.coordinates,
            population: city.population,
            vulnerability: city.risk_profile.clone(),
        }
    }
}

// --- Requests ---

pub const DEFAULT_SEVERITY: u8 = 5;
pub const SEVERITY_RANGE: RangeInclusive<u8> = 1..=10;

/// A validated simulation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub city_key: String,
    pub disaster_type: DisasterType,
    pub severity: u8,
    pub affected_area: AffectedArea,
}

impl SimulationRequest {
    pub fn validate(&self) -> Result<(), CrisisError> {
        if self.city_key.trim().is_empty() {
            return Err(CrisisError::invalid("cityKey is required"));
        }
        if !SEVERITY_RANGE.contains(&self.severity) {
            return Err(CrisisError::invalid(format!(
                "severity must be between {} and {}, got {}",
                SEVERITY_RANGE.start(),
                SEVERITY_RANGE.end(),
                self.severity
            )));
        }
        let area = &self.affected_area;
        if !area.center.is_valid() {
            return Err(CrisisError::invalid("affectedArea.center is not a valid coordinate"));
        }
        if !area.radius_km.is_finite() || area.radius_km < 0.0 {
            return Err(CrisisError::invalid(format!(
                "affectedArea.radius must be a non-negative number, got {}",
                area.radius_km
            )));
        }
        Ok(())
    }
}

/// Loosely-typed request as it arrives from a caller. Every field may be absent;
/// `into_request` decides which absences are errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    pub city_key: Option<String>,
    pub disaster_type: Option<DisasterType>,
    pub severity: Option<i64>,
    pub affected_area: Option<AffectedArea>,
}

impl SimulationParams {
    pub fn into_request(self) -> Result<SimulationRequest, CrisisError> {
        let (Some(city_key), Some(disaster_type), Some(affected_area)) =
            (self.city_key, self.disaster_type, self.affected_area)
        else {
            return Err(CrisisError::invalid("Missing required parameters"));
        };

        let severity = match self.severity {
            None => DEFAULT_SEVERITY,
            Some(raw) => u8::try_from(raw)
                .ok()
                .filter(|s| SEVERITY_RANGE.contains(s))
                .ok_or_else(|| {
                    CrisisError::invalid(format!("severity must be between 1 and 10, got {raw}"))
                })?,
        };

        let request = SimulationRequest {
            city_key,
            disaster_type,
            severity,
            affected_area,
        };
        request.validate()?;
        Ok(request)
    }
}

// --- Simulation output ---

/// A facility that falls inside the response buffer, annotated for dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Located<F> {
    #[serde(flatten)]
    pub facility: F,
    /// Kilometers from the area center, one decimal.
    #[serde(rename = "distance")]
    pub distance_km: f64,
    #[serde(rename = "responseTime")]
    pub response_time_min: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

pub type LocatedPolice = Located<PoliceStation>;
pub type LocatedFire = Located<FireStation>;
pub type LocatedHospital = Located<Hospital>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyResponse {
    #[serde(default)]
    pub police: Vec<LocatedPolice>,
    #[serde(default)]
    pub fire: Vec<LocatedFire>,
    #[serde(default)]
    pub hospitals: Vec<LocatedHospital>,
}

impl EmergencyResponse {
    pub fn count(&self, category: ServiceCategory) -> usize {
        match category {
            ServiceCategory::Police => self.police.len(),
            ServiceCategory::Fire => self.fire.len(),
            ServiceCategory::Medical => self.hospitals.len(),
        }
    }

    pub fn response_times(&self, category: ServiceCategory) -> Vec<u32> {
        match category {
            ServiceCategory::Police => response_times(&self.police),
            ServiceCategory::Fire => response_times(&self.fire),
            ServiceCategory::Medical => response_times(&self.hospitals),
        }
    }

    /// Mean response time in minutes, `None` when the category has no coverage.
    pub fn average_response_min(&self, category: ServiceCategory) -> Option<f64> {
        let times = self.response_times(category);
        if times.is_empty() {
            return None;
        }
        Some(times.iter().map(|t| *t as f64).sum::<f64>() / times.len() as f64)
    }

    /// Fastest responder as (name, minutes). Ties go to the earliest entry.
    pub fn fastest(&self, category: ServiceCategory) -> Option<(&str, u32)> {
        match category {
            ServiceCategory::Police => fastest(&self.police),
            ServiceCategory::Fire => fastest(&self.fire),
            ServiceCategory::Medical => fastest(&self.hospitals),
        }
    }
}

fn response_times<F>(located: &[Located<F>]) -> Vec<u32> {
    located.iter().map(|l| l.response_time_min).collect()
}

fn fastest<F: Facility>(located: &[Located<F>]) -> Option<(&str, u32)> {
    located
        .iter()
        .min_by_key(|l| l.response_time_min)
        .map(|l| (l.facility.name(), l.response_time_min))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    SlowPoliceResponse,
    ModeratePoliceResponse,
    SlowFireResponse,
    ModerateFireResponse,
    NoPoliceCoverage,
    NoFireCoverage,
    HighFloodRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityFactor {
    #[serde(rename = "type")]
    pub kind: FactorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub impact: RiskLevel,
}

/// Upper bound of every 0..=100 score.
pub const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    /// 0..=100
    pub score: u32,
    pub level: RiskLevel,
    #[serde(default)]
    pub factors: Vec<VulnerabilityFactor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineStatus {
    Alert,
    Response,
    Assessment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(rename = "time")]
    pub time_min: u32,
    pub event: String,
    pub status: TimelineStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub count: usize,
    pub fastest_response: Option<u32>,
}

/// Dashboard-style roll-up of the located resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseSummary {
    pub police: CategorySummary,
    pub fire: CategorySummary,
    pub medical: CategorySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// City display name.
    pub city: String,
    pub disaster_type: DisasterType,
    pub severity: u8,
    pub timestamp: DateTime<Utc>,
    pub affected_area: AffectedArea,
    #[serde(default)]
    pub emergency_response: EmergencyResponse,
    pub vulnerability: Vulnerability,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    #[serde(default)]
    pub summary: ResponseSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AdvisoryReport>,
}

impl SimulationResult {
    /// Check a result handed back by a caller before it is re-analyzed.
    pub fn validate(&self) -> Result<(), CrisisError> {
        if !SEVERITY_RANGE.contains(&self.severity) {
            return Err(CrisisError::invalid(format!(
                "simulation.severity must be between {} and {}, got {}",
                SEVERITY_RANGE.start(),
                SEVERITY_RANGE.end(),
                self.severity
            )));
        }
        if self.vulnerability.score > MAX_SCORE {
            return Err(CrisisError::invalid(format!(
                "simulation.vulnerability.score must be at most {MAX_SCORE}, got {}",
                self.vulnerability.score
            )));
        }
        Ok(())
    }
}
