pub mod check;
pub mod probe;

use console::Style;
use dockgate_preflight::{interpret, DiagnosticResult, Reason, VersionChecker};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;
pub const EXIT_PROBE_ERROR: u8 = 3;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

/// Exit code for a finished check. Advisories do not fail the run.
pub fn exit_code(diag: &DiagnosticResult) -> u8 {
    if diag.is_blocking() {
        EXIT_FAILURE
    } else {
        EXIT_SUCCESS
    }
}

/// Run the check on `version_string` and print the outcome.
pub fn report(
    checker: &VersionChecker,
    version_string: &str,
    json_output: bool,
) -> Result<u8, String> {
    let interpreted = interpret(version_string);
    let diag = checker.check_interpreted(&interpreted);
    let detected = interpreted.detected;

    if json_output {
        let json = serde_json::json!({
            "version_string": version_string,
            "detected": detected,
            "minimum": checker.minimum().to_string(),
            "reason": diag.reason,
            "error": diag.error,
            "fix": diag.fix,
            "healthy": !diag.is_blocking(),
            "needs_improvement": diag.needs_improvement(),
        });
        println!("{}", json_pretty(&json)?);
    } else {
        println!("{}", render_text(checker, &detected, &diag));
    }
    Ok(exit_code(&diag))
}

pub fn render_text(checker: &VersionChecker, detected: &str, diag: &DiagnosticResult) -> String {
    let name = checker.runtime_name();
    let minimum = checker.minimum();
    match (diag.reason, diag.error) {
        (Some(reason), Some(error)) => {
            let mut out = format!("{} {error} ({reason})", Style::new().red().apply_to("✗"));
            if reason == Reason::VersionLow {
                out.push_str(&format!(
                    "\n    minimum version is {minimum}, current version is {detected}"
                ));
            }
            out.push_str(&format!("\n    hint: {}", reason.hint()));
            out
        }
        _ if diag.needs_improvement() => {
            format!("{} {}", Style::new().yellow().apply_to("⚠"), diag.fix)
        }
        _ => format!(
            "{} {name} {detected} meets the minimum version {minimum}",
            Style::new().green().apply_to("✓")
        ),
    }
}
