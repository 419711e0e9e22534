use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::record::CodeRecord;

/// Redeem codes are 8-15 character uppercase alphanumeric runs. The forum
/// renders them as plain text with no stable markup, so the whole page is
/// matched rather than any selector.
fn code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[A-Z0-9]{8,15}\b").expect("code regex should compile"))
}

/// Extract candidate redeem codes from a forum page, deduplicated in
/// first-seen order. The heuristic is deliberately loose; whether a code is
/// still active cannot be determined here, so every record carries status
/// "unknown".
pub fn extract_codes(html: &str, source: &str) -> Vec<CodeRecord> {
    let mut seen = HashSet::new();
    let mut codes = Vec::new();

    for m in code_regex().find_iter(html) {
        let code = m.as_str();
        if !seen.insert(code.to_string()) {
            continue;
        }
        codes.push(CodeRecord::new(code, source));
    }

    codes
}
