/// Security report generation
///
/// The run hands the generator a flat key/value map (token details plus
/// the review fields) and a directory; the generator returns the path of
/// the file it wrote.
pub mod layout;
pub mod pdf;

pub use layout::{build_report_lines, LineStyle, ReportLine};
pub use pdf::PdfReportGenerator;

use crate::errors::ReportError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Reviewer recorded on every automated report
pub const REVIEWER_NAME: &str = "SPL-AUTOMATION";
/// Confirmation status recorded on every automated report
pub const CONFIRMATION_STATUS: &str = "Confirmed";

pub const REVIEWER_NAME_KEY: &str = "reviewer_name";
pub const CONFIRMATION_STATUS_KEY: &str = "confirmation_status";

pub trait ReportGenerator {
    fn create_pdf(
        &self,
        fields: &Map<String, Value>,
        output_dir: &Path,
    ) -> Result<PathBuf, ReportError>;
}

/// Add the reviewer fields, replacing any same-named fields from the source
pub fn enrich(mut fields: Map<String, Value>) -> Map<String, Value> {
    fields.insert(
        REVIEWER_NAME_KEY.to_string(),
        Value::String(REVIEWER_NAME.to_string()),
    );
    fields.insert(
        CONFIRMATION_STATUS_KEY.to_string(),
        Value::String(CONFIRMATION_STATUS.to_string()),
    );
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enrich_adds_review_fields() {
        let fields = json!({ "name": "XYZ", "risk": "low" })
            .as_object()
            .cloned()
            .unwrap();

        let enriched = enrich(fields);

        assert_eq!(
            Value::Object(enriched),
            json!({
                "name": "XYZ",
                "risk": "low",
                "reviewer_name": "SPL-AUTOMATION",
                "confirmation_status": "Confirmed"
            })
        );
    }

    #[test]
    fn test_enrich_overwrites_source_values() {
        let fields = json!({ "reviewer_name": "someone", "confirmation_status": "Pending" })
            .as_object()
            .cloned()
            .unwrap();

        let enriched = enrich(fields);

        assert_eq!(enriched["reviewer_name"], "SPL-AUTOMATION");
        assert_eq!(enriched["confirmation_status"], "Confirmed");
        assert_eq!(enriched.len(), 2);
    }
}
