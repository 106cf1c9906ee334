//! Response timeline: detection, first arrivals, initial assessment.

use crisis_common::{EmergencyResponse, ServiceCategory, TimelineEvent, TimelineStatus};

/// Minutes after the last arrival at which the initial assessment closes.
pub const ASSESSMENT_LAG_MIN: u32 = 30;

/// Categories that produce an arrival event, with their event label.
const ARRIVALS: [(ServiceCategory, &str); 2] = [
    (ServiceCategory::Police, "Police"),
    (ServiceCategory::Fire, "Fire"),
];

/// Build the chronological event list for a set of located resources.
///
/// Always starts with detection at minute 0 and ends with the assessment
/// milestone; the first arrival per covered category sits in between.
pub fn build_timeline(response: &EmergencyResponse) -> Vec<TimelineEvent> {
    let mut timeline = vec![TimelineEvent {
        time_min: 0,
        event: "Disaster detected".to_string(),
        status: TimelineStatus::Alert,
    }];

    for (category, label) in ARRIVALS {
        if let Some((name, minutes)) = response.fastest(category) {
            timeline.push(TimelineEvent {
                time_min: minutes,
                event: format!("{label} units arrive from {name}"),
                status: TimelineStatus::Response,
            });
        }
    }

    let last = timeline.iter().map(|e| e.time_min).max().unwrap_or(0);
    timeline.push(TimelineEvent {
        time_min: last + ASSESSMENT_LAG_MIN,
        event: "Initial assessment complete".to_string(),
        status: TimelineStatus::Assessment,
    });

    // Stable: police stays ahead of fire on equal arrival times.
    timeline.sort_by_key(|e| e.time_min);
    timeline
}
