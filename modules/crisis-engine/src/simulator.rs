//! Simulation pipeline: validate, look up, locate, score, timeline, advise.

use chrono::{DateTime, Utc};
use tracing::info;

use crisis_common::{
    AdvisoryReport, City, DisasterType, Result, ScenarioProjection, SimulationRequest,
    SimulationResult,
};

use crate::advisory::{self, AdvisoryPolicy};
use crate::catalog::{CityCatalog, StaticCatalog};
use crate::locator::locate_all;
use crate::summary::summarize;
use crate::timeline::build_timeline;
use crate::vulnerability::score_vulnerability;

/// Runs simulations against a read-only city catalog.
///
/// Holds no mutable state, so a single instance can be shared across
/// threads or tasks behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Simulator<C = StaticCatalog> {
    catalog: C,
    policy: AdvisoryPolicy,
}

impl<C: CityCatalog> Simulator<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            policy: AdvisoryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: AdvisoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn policy(&self) -> &AdvisoryPolicy {
        &self.policy
    }

    /// Simulate a request and attach the advisory report.
    pub fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult> {
        self.simulate_at(request, Utc::now())
    }

    pub fn simulate_at(
        &self,
        request: &SimulationRequest,
        at: DateTime<Utc>,
    ) -> Result<SimulationResult> {
        request.validate()?;
        let city = self.catalog.lookup(&request.city_key)?;

        let mut result = run(city, request, at);
        result.ai_analysis = Some(advisory::analyze_at(&self.policy, &result, city, at));

        info!(
            city = city.key.as_str(),
            disaster = %request.disaster_type,
            severity = request.severity,
            score = result.vulnerability.score,
            level = %result.vulnerability.level,
            "Simulation complete"
        );
        Ok(result)
    }

    /// Re-analyze an existing result against a catalog city.
    pub fn analyze(&self, result: &SimulationResult, city_key: &str) -> Result<AdvisoryReport> {
        result.validate()?;
        let city = self.catalog.lookup(city_key)?;
        Ok(advisory::analyze(&self.policy, result, city))
    }

    pub fn predict(
        &self,
        city_key: &str,
        disaster: DisasterType,
        base: &SimulationResult,
    ) -> Result<[ScenarioProjection; 3]> {
        base.validate()?;
        let city = self.catalog.lookup(city_key)?;
        Ok(advisory::predict_scenarios(city, disaster, base))
    }
}

/// The bare simulation for an already-resolved city, without advisory.
///
/// `request` is assumed valid.
pub fn run(city: &City, request: &SimulationRequest, at: DateTime<Utc>) -> SimulationResult {
    let emergency_response = locate_all(city, &request.affected_area);
    let vulnerability = score_vulnerability(
        &emergency_response,
        &city.risk_profile,
        request.disaster_type,
        request.severity,
    );
    let timeline = build_timeline(&emergency_response);
    let summary = summarize(&emergency_response);

    SimulationResult {
        city: city.name.clone(),
        disaster_type: request.disaster_type,
        severity: request.severity,
        timestamp: at,
        affected_area: request.affected_area,
        emergency_response,
        vulnerability,
        timeline,
        summary,
        ai_analysis: None,
    }
}
