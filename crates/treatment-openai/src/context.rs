//! Health-profile context builder for chat conversations.
//!
//! Assembles the caller's conditions and medications into a structured
//! context block prepended to the system prompt, so the diagnostic model
//! sees the record it is reasoning about.

use treatment_core::models::condition::Condition;
use treatment_core::models::medication::Medication;

/// Build a structured context block from an account's record.
///
/// Returns an XML-style block. If both lists are empty, returns an empty
/// string (no context to inject).
pub fn build_profile_block(conditions: &[Condition], medications: &[Medication]) -> String {
    if conditions.is_empty() && medications.is_empty() {
        return String::new();
    }

    let mut block = String::from("<health_profile>\n");

    if !conditions.is_empty() {
        block.push_str("<conditions>\n");
        for c in conditions {
            block.push_str(&format!("- {} ({}", c.name, c.status.as_str()));
            if let Some(code) = &c.icd10_code {
                block.push_str(&format!(", ICD-10 {code}"));
            }
            block.push_str(")\n");
        }
        block.push_str("</conditions>\n");
    }

    if !medications.is_empty() {
        block.push_str("<medications>\n");
        for m in medications {
            block.push_str(&format!(
                "- {} {} {} ({})\n",
                m.name,
                m.dosage,
                m.frequency,
                m.status.as_str()
            ));
        }
        block.push_str("</medications>\n");
    }

    block.push_str("</health_profile>");
    block
}
