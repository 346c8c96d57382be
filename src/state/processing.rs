// src/state/processing.rs
use tracing::{debug, warn};

use crate::api::AnalysisOutcome;

/// Tracks which company's analysis spinner is showing. One slot; a second
/// trigger overwrites it while both requests continue independently.
#[derive(Debug, Default)]
pub struct ProcessingWorkflow {
    slot: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingReport {
    pub message: String,
    pub succeeded: bool,
}

impl ProcessingWorkflow {
    pub fn current(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    pub fn is_processing(&self, company: &str) -> bool {
        self.current() == Some(company)
    }

    pub fn begin(&mut self, company: &str) {
        if let Some(previous) = self.slot.replace(company.to_string()) {
            if previous != company {
                warn!(%previous, company, "processing slot overwritten while a request is outstanding");
            }
        }
        debug!(company, "processing started");
    }

    pub fn finish(&mut self, company: &str, outcome: &AnalysisOutcome) -> ProcessingReport {
        if self.is_processing(company) {
            self.slot = None;
        }

        match outcome {
            AnalysisOutcome::Success { .. } => ProcessingReport {
                message: format!("✅ Successfully processed {company} results!"),
                succeeded: true,
            },
            AnalysisOutcome::Error { error } => ProcessingReport {
                message: format!("❌ Error processing {company}: {error}"),
                succeeded: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_report_and_slot_cleared() {
        let mut workflow = ProcessingWorkflow::default();
        workflow.begin("Wipro");
        assert!(workflow.is_processing("Wipro"));

        let report = workflow.finish("Wipro", &AnalysisOutcome::Success { data: json!({}) });
        assert_eq!(report.message, "✅ Successfully processed Wipro results!");
        assert!(report.succeeded);
        assert_eq!(workflow.current(), None);
    }

    #[test]
    fn test_error_report_embeds_detail() {
        let mut workflow = ProcessingWorkflow::default();
        workflow.begin("Wipro");

        let report = workflow.finish("Wipro", &AnalysisOutcome::Error { error: "timeout".into() });
        assert_eq!(report.message, "❌ Error processing Wipro: timeout");
        assert!(!report.succeeded);
        assert_eq!(workflow.current(), None);
    }

    #[test]
    fn test_second_trigger_overwrites_slot() {
        let mut workflow = ProcessingWorkflow::default();
        workflow.begin("Wipro");
        workflow.begin("Infosys");
        assert_eq!(workflow.current(), Some("Infosys"));
        assert!(!workflow.is_processing("Wipro"));
    }

    #[test]
    fn test_late_completion_keeps_newer_spinner() {
        let mut workflow = ProcessingWorkflow::default();
        workflow.begin("Wipro");
        workflow.begin("Infosys");

        workflow.finish("Wipro", &AnalysisOutcome::Success { data: json!({}) });
        assert_eq!(workflow.current(), Some("Infosys"));
    }
}
