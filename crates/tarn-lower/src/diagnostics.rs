//! Lowering diagnostics.
//!
//! Convention mismatches the lowerer refuses to adapt silently are recorded
//! here and reported by the driver. Rendering produces labeled terminal
//! reports via ariadne; the driver's machine-readable mode serializes the
//! raw diagnostics instead.

use std::fmt;
use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use serde::Serialize;
use tarn_common::Span;

/// A diagnostic produced during lowering.
///
/// These mark convention mismatches detected at an argument position.
/// Lowering continues past them; the driver decides whether they are fatal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LowerDiagnostic {
    /// A receiver-free function value flows into a receiver-taking slot.
    /// There is no receiver value to synthesize, so no adapter exists for
    /// this direction.
    UnsupportedBoundConversion { span: Span, param: String },
    /// An overloaded function's signatures disagree on their receiver
    /// convention; no single convention can be adapted to.
    AmbiguousOverload { span: Span, param: String },
}

impl LowerDiagnostic {
    /// The span the diagnostic points at.
    pub fn span(&self) -> Span {
        match self {
            LowerDiagnostic::UnsupportedBoundConversion { span, .. } => *span,
            LowerDiagnostic::AmbiguousOverload { span, .. } => *span,
        }
    }
}

/// Assign a unique error code to each diagnostic variant.
fn error_code(diagnostic: &LowerDiagnostic) -> &'static str {
    match diagnostic {
        LowerDiagnostic::UnsupportedBoundConversion { .. } => "L0001",
        LowerDiagnostic::AmbiguousOverload { .. } => "L0002",
    }
}

impl fmt::Display for LowerDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LowerDiagnostic::UnsupportedBoundConversion { param, .. } => write!(
                f,
                "receiver-free function passed to receiver-taking parameter `{param}`"
            ),
            LowerDiagnostic::AmbiguousOverload { param, .. } => write!(
                f,
                "overloaded function passed to parameter `{param}` has no single calling convention"
            ),
        }
    }
}

impl std::error::Error for LowerDiagnostic {}

/// Render a lowering diagnostic into a formatted string using ariadne.
///
/// The output is colorless for consistent test snapshots.
pub fn render_diagnostic(diagnostic: &LowerDiagnostic, source: &str) -> String {
    let config = Config::default().with_color(false);
    let source_len = source.len();

    // Clamp a range to be valid and non-empty within source bounds.
    let clamp = |r: Range<usize>| -> Range<usize> {
        let s = r.start.min(source_len);
        let e = r.end.min(source_len).max(s);
        if s == e {
            s..e.saturating_add(1).min(source_len)
        } else {
            s..e
        }
    };

    let code = error_code(diagnostic);
    let span = clamp(diagnostic.span().range());

    let report = match diagnostic {
        LowerDiagnostic::UnsupportedBoundConversion { param, .. } => {
            Report::build(ReportKind::Error, span.clone())
                .with_code(code)
                .with_message(format!(
                    "receiver-free function passed to receiver-taking parameter `{param}`"
                ))
                .with_config(config)
                .with_label(
                    Label::new(span)
                        .with_message("no receiver value exists to bind here")
                        .with_color(Color::Red),
                )
                .with_help(format!(
                    "declare parameter `{param}` as `bare`, or pass a method instead"
                ))
                .finish()
        }
        LowerDiagnostic::AmbiguousOverload { param, .. } => {
            Report::build(ReportKind::Error, span.clone())
                .with_code(code)
                .with_message(format!(
                    "overloaded function passed to parameter `{param}` has no single calling convention"
                ))
                .with_config(config)
                .with_label(
                    Label::new(span)
                        .with_message("overloads disagree on their receiver convention")
                        .with_color(Color::Red),
                )
                .finish()
        }
    };

    let mut buf = Vec::new();
    let cache = Source::from(source);
    report.write(cache, &mut buf).expect("failed to write diagnostic");
    String::from_utf8(buf).expect("diagnostic output is utf-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let d = LowerDiagnostic::UnsupportedBoundConversion {
            span: Span::new(0, 4),
            param: "handler".into(),
        };
        insta::assert_snapshot!(
            d,
            @"receiver-free function passed to receiver-taking parameter `handler`"
        );

        let d = LowerDiagnostic::AmbiguousOverload {
            span: Span::new(0, 4),
            param: "callback".into(),
        };
        insta::assert_snapshot!(
            d,
            @"overloaded function passed to parameter `callback` has no single calling convention"
        );
    }

    #[test]
    fn rendered_report_carries_code_and_help() {
        let source = "attach(free_fn)";
        let d = LowerDiagnostic::UnsupportedBoundConversion {
            span: Span::new(7, 14),
            param: "handler".into(),
        };
        let out = render_diagnostic(&d, source);
        assert!(out.contains("L0001"), "missing code in:\n{out}");
        assert!(out.contains("receiver-taking parameter"), "missing message in:\n{out}");
        assert!(out.contains("bare"), "missing help in:\n{out}");
    }

    #[test]
    fn diagnostics_serialize_for_machine_output() {
        let d = LowerDiagnostic::AmbiguousOverload {
            span: Span::new(2, 5),
            param: "cb".into(),
        };
        let json = serde_json::to_string(&d).expect("serializable");
        assert!(json.contains("AmbiguousOverload"));
        assert!(json.contains("cb"));
    }
}
