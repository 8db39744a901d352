//! Business metrics for the event API.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `event_api_events_created_total` - Events created
//! - `event_api_events_updated_total` - Events updated
//! - `event_api_validation_failures_total{stage}` - Rejected submissions by stage (`binding`, `business`)

use metrics::describe_counter;

/// Counter of created events.
pub const EVENTS_CREATED: &str = "event_api_events_created_total";

/// Counter of updated events.
pub const EVENTS_UPDATED: &str = "event_api_events_updated_total";

/// Counter of rejected submissions.
pub const VALIDATION_FAILURES: &str = "event_api_validation_failures_total";

/// Validation stage that rejected a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStage {
    /// Required fields and number bounds
    Binding,
    /// Price and date rules
    Business,
}

impl ValidationStage {
    /// Metric label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binding => "binding",
            Self::Business => "business",
        }
    }
}

/// Register all metric descriptions.
///
/// Call once at startup, after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(EVENTS_CREATED, "Total number of events created");
    describe_counter!(EVENTS_UPDATED, "Total number of events updated");
    describe_counter!(
        VALIDATION_FAILURES,
        "Total number of rejected event submissions by validation stage"
    );

    tracing::info!("Event API metrics registered");
}

/// Record a created event.
pub fn record_event_created() {
    metrics::counter!(EVENTS_CREATED).increment(1);
}

/// Record an updated event.
pub fn record_event_updated() {
    metrics::counter!(EVENTS_UPDATED).increment(1);
}

/// Record a rejected submission.
pub fn record_validation_failure(stage: ValidationStage) {
    metrics::counter!(VALIDATION_FAILURES, "stage" => stage.as_str()).increment(1);
    tracing::debug!(stage = stage.as_str(), "Recorded validation failure metric");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_recording_without_recorder() {
        // No recorder installed: calls are no-ops
        register_metrics();
        record_event_created();
        record_event_updated();
        record_validation_failure(ValidationStage::Binding);
        record_validation_failure(ValidationStage::Business);
    }

    #[test]
    fn test_stage_labels() {
        assert_eq!(ValidationStage::Binding.as_str(), "binding");
        assert_eq!(ValidationStage::Business.as_str(), "business");
    }
}
