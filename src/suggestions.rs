use crate::report::{AuditReport, FieldAccess};
use crate::results::{GreenHostingResult, Suggestion, SuggestionType};
use crate::utils::format_number;
use serde_json::Value;
use std::collections::HashSet;

const ENVIRONMENTAL_IMPACT: &str = "Environmental Impact";

/// Build the ordered, deduplicated suggestion list for a report.
///
/// The hosting banner always comes first and is never deduplicated against
/// the audit-derived suggestions.
pub fn aggregate(report: &AuditReport, green: &GreenHostingResult) -> Vec<Suggestion> {
    let organic = dedupe_by_title(opportunities(report));
    ::log::debug!("Collected {} unique opportunity suggestions", organic.len());

    let mut suggestions = Vec::with_capacity(organic.len() + 1);
    suggestions.push(hosting_banner(green));
    suggestions.extend(organic);
    suggestions
}

/// One suggestion per item of every `opportunity` audit, in report order
pub fn opportunities(report: &AuditReport) -> Vec<Suggestion> {
    let Some(audits) = report.audits() else {
        return Vec::new();
    };

    audits
        .values()
        .filter(|audit| audit.field("details.type").and_then(Value::as_str) == Some("opportunity"))
        .flat_map(|audit| {
            let title = audit.str_or("title", "N/A");
            let description = audit.str_or("description", "N/A");
            let items = audit
                .field("details.items")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();

            items.iter().map(move |item| Suggestion {
                title: title.clone(),
                description: description.clone(),
                savings: savings(item),
                kind: SuggestionType::Info,
            })
        })
        .collect()
}

fn savings(item: &Value) -> String {
    match item.field("wastedMs").and_then(Value::as_f64) {
        Some(ms) if ms != 0.0 => format!("{}ms", format_number(ms)),
        _ => "N/A".to_string(),
    }
}

/// Keep only the first suggestion for each title, preserving order
pub fn dedupe_by_title(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter(|suggestion| seen.insert(suggestion.title.clone()))
        .collect()
}

/// Banner praising green hosting or recommending a switch
pub fn hosting_banner(green: &GreenHostingResult) -> Suggestion {
    if green.is_green {
        Suggestion {
            title: "🌱 Excellent Green Hosting Choice!".to_string(),
            description: format!(
                "Your website is hosted by {}, a green hosting provider.",
                green.hosted_by
            ),
            savings: ENVIRONMENTAL_IMPACT.to_string(),
            kind: SuggestionType::Success,
        }
    } else {
        Suggestion {
            title: "Consider Green Hosting".to_string(),
            description: format!(
                "Currently hosted by {}. Consider switching to a green hosting provider.",
                green.hosted_by
            ),
            savings: ENVIRONMENTAL_IMPACT.to_string(),
            kind: SuggestionType::Improvement,
        }
    }
}
