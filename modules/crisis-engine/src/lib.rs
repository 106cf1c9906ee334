//! Emergency-response simulation and rule-based advisory.
//!
//! Pure, synchronous computation over immutable city reference data.
//! `Simulator` runs the locate, score and timeline pipeline; `advisory`
//! derives insights, recommendations and projections from a finished run.

pub mod advisory;
pub mod catalog;
pub mod geo;
pub mod locator;
pub mod simulator;
pub mod summary;
pub mod timeline;
pub mod vulnerability;

pub use advisory::{analyze, predict_scenarios, AdvisoryPolicy};
pub use catalog::{CityCatalog, StaticCatalog};
pub use geo::{distance_km, response_time_min};
pub use locator::{locate_all, DispatchProfile};
pub use simulator::Simulator;
pub use summary::summarize;
pub use timeline::build_timeline;
pub use vulnerability::score_vulnerability;
