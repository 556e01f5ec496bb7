//! The `explain` use case: look up deny reason and validation code documentation.

use ipcheck_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown identifier; includes the available reasons and codes.
    NotFound {
        identifier: String,
        available_reasons: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

/// Look up an explanation for a deny reason or validation code.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier.trim()) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_reasons: explain::all_reasons(),
            available_codes: validation_codes(),
        },
    }
}

fn validation_codes() -> &'static [&'static str] {
    let all = explain::all_codes();
    &all[explain::all_reasons().len()..]
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\n");
    out.push_str("Examples\n");
    out.push_str("--------\n\n");
    out.push_str("Before:\n");
    out.push_str("```toml\n");
    out.push_str(exp.examples.before);
    out.push('\n');
    out.push_str("```\n\n");
    out.push_str("After:\n");
    out.push_str("```toml\n");
    out.push_str(exp.examples.after);
    out.push('\n');
    out.push_str("```\n");

    out
}

/// Format the "not found" message for terminal display.
pub fn format_not_found(identifier: &str, reasons: &[&str], codes: &[&str]) -> String {
    let mut out = format!("Unknown reason or code: {identifier}\n\n");
    out.push_str("Deny reasons:\n");
    for reason in reasons {
        out.push_str(&format!("  - {reason}\n"));
    }
    out.push_str("\nValidation codes:\n");
    for code in codes {
        out.push_str(&format!("  - {code}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipcheck_types::ids;

    #[test]
    fn explain_known_reason() {
        let output = run_explain(ids::REASON_ADDRESS_NOT_MEMBER);
        assert!(matches!(output, ExplainOutput::Found(_)));
    }

    #[test]
    fn explain_known_code() {
        let output = run_explain(" overlapping_range ");
        assert!(matches!(output, ExplainOutput::Found(_)));
    }

    #[test]
    fn explain_unknown_lists_both_groups() {
        let ExplainOutput::NotFound {
            identifier,
            available_reasons,
            available_codes,
        } = run_explain("not_a_real_thing")
        else {
            panic!("expected NotFound");
        };
        assert_eq!(identifier, "not_a_real_thing");
        assert_eq!(available_reasons.len(), 3);
        assert!(available_codes.contains(&ids::CODE_PRIVILEGED_FIELD));
        assert!(!available_codes.contains(&ids::REASON_NO_ACTIVE_RANGES));
    }

    #[test]
    fn format_explanation_output() {
        let ExplainOutput::Found(exp) = run_explain(ids::CODE_DUPLICATE_RANGE) else {
            panic!("expected Found");
        };
        let formatted = format_explanation(&exp);
        assert!(formatted.starts_with(exp.title));
        assert!(formatted.contains("Remediation"));
        assert!(formatted.contains("```toml"));
    }

    #[test]
    fn format_not_found_output() {
        let formatted = format_not_found("missing", &["reason_one"], &["code_one", "code_two"]);
        insta::assert_snapshot!(formatted, @r"
        Unknown reason or code: missing

        Deny reasons:
          - reason_one

        Validation codes:
          - code_one
          - code_two
        ");
    }
}
