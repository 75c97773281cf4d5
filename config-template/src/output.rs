//! Output formatting for check reports.
//!
//! Provides JSON and plain-text formatters for `CheckReport`. Terminal
//! colors are left to the caller.

use std::io::Write;

use crate::report::CheckReport;

/// Format a `CheckReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &CheckReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `CheckReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &CheckReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer, "Files checked:  {}", report.checked_files)?;
    writeln!(writer, "Files passed:   {}", report.passed_files())?;

    let load_errors = report.failures.iter().filter(|f| !f.is_mismatch());
    let mismatches = report.failures.iter().filter(|f| f.is_mismatch());

    if report.load_error_count() > 0 {
        writeln!(writer)?;
        writeln!(writer, "Could not load:")?;
        for failure in load_errors {
            writeln!(writer, "  {}", failure.format_human_readable())?;
        }
    }

    if report.mismatch_count() > 0 {
        writeln!(writer)?;
        writeln!(writer, "Does not match template:")?;
        for failure in mismatches {
            writeln!(writer, "  {}", failure.format_human_readable())?;
        }
    }

    writeln!(writer)?;
    if report.ok {
        writeln!(writer, "OK: all {} file(s) match", report.checked_files)?;
    } else {
        writeln!(
            writer,
            "FAILED: {} of {} file(s)",
            report.failures.len(),
            report.checked_files
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind, MatchError, MismatchKind};
    use crate::path::PathSegment;
    use crate::report::FileFailure;
    use std::path::PathBuf;

    fn failing_report() -> CheckReport {
        let mismatch: Error = MatchError::new(
            [PathSegment::Key("age".to_owned())].into_iter().collect(),
            MismatchKind::MissingKey {
                key: "age".to_owned(),
            },
        )
        .into();
        let unknown = Error::UnknownFormat("notes.txt".to_owned());
        CheckReport {
            checked_files: 3,
            ok: false,
            failures: vec![
                FileFailure::new(PathBuf::from("a.json"), &mismatch),
                FileFailure::new(PathBuf::from("notes.txt"), &unknown),
            ],
        }
    }

    #[test]
    fn test_human_output_sections() {
        let mut out = Vec::new();
        write_human(&failing_report(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Files checked:  3"), "got:\n{text}");
        assert!(text.contains("Files passed:   1"), "got:\n{text}");
        assert!(text.contains("Could not load:\n  notes.txt: unknown data format"));
        assert!(text.contains("a.json: age: expected key 'age', got nothing"));
        assert!(text.contains("FAILED: 2 of 3 file(s)"));
    }

    #[test]
    fn test_human_output_ok() {
        let report = CheckReport {
            checked_files: 2,
            ok: true,
            failures: vec![],
        };
        let mut out = Vec::new();
        write_human(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("OK: all 2 file(s) match"));
        assert!(!text.contains("Could not load"));
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_json(&failing_report(), &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["checked_files"], 3);
        assert_eq!(json["ok"], false);
        assert_eq!(json["failures"][0]["kind"], "missing_key");
        assert_eq!(json["failures"][0]["mismatch"]["path"][0], "age");
        assert!(json["failures"][1].get("mismatch").is_none());
        assert_eq!(
            serde_json::to_value(ErrorKind::UnknownFormat).unwrap(),
            json["failures"][1]["kind"]
        );
    }
}
