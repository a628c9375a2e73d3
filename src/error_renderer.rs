//! Error rendering using ariadne
//!
//! Compilation diagnostics are shown with the offending source snippet;
//! runtime and evaluation errors have no source location and are printed as
//! a single line.

use crate::{Diagnostic, Error, Severity};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<input>";

/// Render an error to stderr
///
/// # Example
/// ```no_run
/// use stackc::{Engine, EngineOptions, render_error};
///
/// let engine = Engine::new(EngineOptions::default());
/// if let Err(e) = engine.compile("x = 1 +;") {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    render_error_to_writer(error, writer, use_color)
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Compilation {
            diagnostics,
            source,
        } => render_diagnostics(source, diagnostics, writer, use_color),
        Error::Runtime(err) => writeln!(writer, "runtime error: {}", err),
        Error::Evaluation(err) => writeln!(writer, "evaluation error: {}", err),
    }
}

fn render_diagnostics(
    source: &str,
    diagnostics: &[Diagnostic],
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    for diag in diagnostics {
        let mut colors = ColorGenerator::new();
        colors.next(); // Skip the first color.

        let kind = match diag.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
            Severity::Info => ReportKind::Advice,
        };

        let mut report = Report::build(kind, (SOURCE_ID, diag.span.0.clone()))
            .with_message(&diag.message)
            .with_config(ariadne::Config::default().with_color(use_color));

        if let Some(code) = &diag.code {
            report = report.with_code(code);
        }

        let color = colors.next();
        report = report.with_label(
            Label::new((SOURCE_ID, diag.span.0.clone()))
                .with_message(&diag.message)
                .with_color(color),
        );

        if let Some(help) = &diag.help {
            report = report.with_help(help);
        }

        report
            .finish()
            .write((SOURCE_ID, Source::from(source)), &mut *writer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Engine, EngineOptions};

    fn compile_error(source: &str) -> Error {
        Engine::new(EngineOptions::default())
            .compile(source)
            .expect_err("expected a compilation error")
    }

    #[test]
    fn test_render_parse_error() {
        let output = render_error_to_string_no_color(&compile_error("x = 1 + + ;"));

        assert!(output.contains("Error"));
        assert!(output.contains("P001"));
        assert!(output.contains("x = 1 + + ;"));
    }

    #[test]
    fn test_render_lex_error_with_help() {
        let output = render_error_to_string_no_color(&compile_error("x = a & b;"));

        assert!(output.contains("L001"));
        assert!(output.contains("unexpected character '&'"));
        assert!(output.contains("'&&'"));
    }

    #[test]
    fn test_render_every_diagnostic() {
        let output = render_error_to_string_no_color(&compile_error("a = ;\nb = );"));
        assert_eq!(output.matches("P001").count(), 2);
        assert!(output.lines().count() > 2);
    }

    #[test]
    fn test_render_runtime_error() {
        let program = Engine::new(EngineOptions::default())
            .compile("x = 1 / 0;")
            .unwrap();
        let err = program.run().unwrap_err();
        assert_eq!(
            render_error_to_string_no_color(&err),
            "runtime error: division by zero (at instruction 2)\n"
        );
    }
}
