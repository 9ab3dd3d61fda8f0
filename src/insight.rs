//! Report enrichment from an external captioning service.
//!
//! The viewer only shows [`Insight::fallback`]. [`insight_prompt`] and
//! [`Insight::from_response`] are the two ends of the exchange for an
//! external captioning integration that sends the prompt and hands back the
//! reply; no network client lives in this crate.

use serde::{Deserialize, Serialize};

use crate::data::model::{FileMetadata, StatsBundle};

// ---------------------------------------------------------------------------
// Captioning contract
// ---------------------------------------------------------------------------

/// Narrative enrichment for a report, as returned by an external captioning
/// service. The service is optional: the viewer must work from
/// [`Insight::fallback`] alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub event_name: String,
    pub event_date: String,
    pub summary: String,
    pub compliance_note: String,
}

impl Insight {
    /// Static insight built from file-name metadata only.
    pub fn fallback(metadata: &FileMetadata) -> Self {
        Insight {
            event_name: metadata.derived_name.clone(),
            event_date: metadata.derived_date.clone(),
            summary: "Analysis unavailable.".to_string(),
            compliance_note: "Could not generate compliance insights.".to_string(),
        }
    }

    /// Parse a service response. Anything that is not a complete JSON
    /// object with the four fields yields the fallback.
    pub fn from_response(text: &str, metadata: &FileMetadata) -> Self {
        match serde_json::from_str::<Insight>(text) {
            Ok(insight) => insight,
            Err(e) => {
                log::warn!("Discarding captioning response: {e}");
                Self::fallback(metadata)
            }
        }
    }
}

/// Request text sent to a captioning service for one log.
pub fn insight_prompt(file_name: &str, stats: &StatsBundle) -> String {
    let before_10 = stats
        .peak_before_10
        .as_ref()
        .map(|p| format!("{} dB", p.level))
        .unwrap_or_else(|| "None".to_string());

    format!(
        "I have an SPL (Sound Pressure Level) log file.\n\
         \n\
         Filename: \"{file_name}\"\n\
         \n\
         Log Statistics:\n\
         - Average SPL: {avg:.2} dB\n\
         - Max SPL: {max:.2} dB\n\
         - Max SPL before 10am: {before_10}\n\
         - Duration: {duration}\n\
         \n\
         Task:\n\
         1. Extract the \"Event Name\" and \"Event Date\" strictly from the Filename. \
         If no date is found return \"Unknown Date\"; if no event name is found return \
         the Filename without its extension.\n\
         2. Provide a 1-sentence summary of the loudness profile based on the stats.\n\
         3. Provide a brief compliance note on noise level safety or norms.\n\
         \n\
         Respond with a JSON object with the string fields eventName, eventDate, \
         summary and complianceNote.",
        avg = stats.average_level,
        max = stats.max_level,
        duration = stats.duration_label,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::analyzer::analyze_log;
    use crate::data::filename::extract_metadata;

    #[test]
    fn test_response_with_camel_case_fields() {
        let meta = extract_metadata("gig.txt");
        let insight = Insight::from_response(
            r#"{"eventName":"Gig","eventDate":"2024-05-01","summary":"Loud.","complianceNote":"Wear plugs."}"#,
            &meta,
        );
        assert_eq!(insight.event_name, "Gig");
        assert_eq!(insight.compliance_note, "Wear plugs.");
    }

    #[test]
    fn test_bad_response_falls_back() {
        let meta = extract_metadata("20231025 Sunday Service.txt");
        let insight = Insight::from_response(r#"{"summary":"partial"}"#, &meta);
        assert_eq!(insight, Insight::fallback(&meta));
        assert_eq!(insight.event_name, "Sunday Service");
        assert_eq!(insight.event_date, "2023-10-25");
    }

    #[test]
    fn test_prompt_mentions_stats() {
        let (_, stats) = analyze_log("09:00:00 84\n11:00:00 96").unwrap();
        let prompt = insight_prompt("set.txt", &stats);
        assert!(prompt.contains("Filename: \"set.txt\""));
        assert!(prompt.contains("Average SPL: 90.00 dB"));
        assert!(prompt.contains("Max SPL before 10am: 84 dB"));
        assert!(prompt.contains("Duration: 2h 0m"));
    }
}
