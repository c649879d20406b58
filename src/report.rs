//! Colored diagnostics and program output for the CLI and REPL.

use clap::ValueEnum;
use esgrove_parser::ast::{Program, SourceType};
use esgrove_parser::{Error, SyntaxError};
use owo_colors::OwoColorize;

/// How a parsed program is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// ESTree JSON
    #[default]
    Json,
    /// Rust debug representation of the tree
    Debug,
    /// One line per program
    Summary,
}

/// Renders a parsed program.
pub fn render_program(name: &str, program: &Program, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(program) {
            Ok(json) => json,
            Err(e) => format!("{}: {}", "Error".red().bold(), e),
        },
        OutputFormat::Debug => format!("{:#?}", program),
        OutputFormat::Summary => {
            let goal = match program.source_type {
                SourceType::Script => "script",
                SourceType::Module => "module",
            };
            format!(
                "{} {} ({}, {} statements, {} bytes)",
                "ok".green().bold(),
                name,
                goal,
                program.body.len(),
                program.span.end
            )
        }
    }
}

/// Prints an error to stderr. Syntax errors get a code frame.
pub fn print_error(name: &str, source: &str, error: &Error) {
    match error.as_syntax() {
        Some(syntax) => eprintln!("{}", code_frame(name, source, syntax)),
        None => eprintln!("{}: {}", "IOError".red().bold(), error),
    }
}

fn code_frame(name: &str, source: &str, error: &SyntaxError) -> String {
    let mut out = format!(
        "{}[{}]: {}\n  {} {}:{}:{}",
        "SyntaxError".red().bold(),
        error.kind.as_str().yellow(),
        error.message.bold(),
        "-->".blue(),
        name,
        error.line,
        error.column + 1
    );

    let Some(text) = line_text(source, error.line) else {
        return out;
    };
    let gutter = error.line.to_string();
    let pad = " ".repeat(gutter.len());
    let caret = " ".repeat(display_column(text, error.column));
    out.push_str(&format!(
        "\n{} {}\n{} {} {}\n{} {} {}{}",
        pad,
        "|".blue(),
        gutter.blue(),
        "|".blue(),
        text,
        pad,
        "|".blue(),
        caret,
        "^".red().bold()
    ));
    out
}

/// The text of a 1-based line, excluding its terminator.
fn line_text(source: &str, line: u32) -> Option<&str> {
    let index = usize::try_from(line).ok()?.checked_sub(1)?;
    source
        .split(['\n', '\u{2028}', '\u{2029}'])
        .nth(index)
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
}

/// Converts a UTF-16 column into a count of chars for caret placement.
fn display_column(text: &str, column: u32) -> usize {
    let mut units = 0u32;
    let mut chars = 0usize;
    for c in text.chars() {
        if units >= column {
            break;
        }
        units += c.len_utf16() as u32;
        chars += 1;
    }
    chars
}

#[cfg(test)]
mod tests {
    use super::*;
    use esgrove_parser::parse_script;

    #[test]
    fn test_line_text() {
        assert_eq!(line_text("a\r\nb\nc", 2), Some("b"));
        assert_eq!(line_text("a\r\nb", 1), Some("a"));
        assert_eq!(line_text("a", 3), None);
        assert_eq!(line_text("a", 0), None);
    }

    #[test]
    fn test_display_column_counts_surrogates() {
        assert_eq!(display_column("abc", 2), 2);
        // U+1F600 takes two UTF-16 units
        assert_eq!(display_column("\u{1F600}x", 2), 1);
    }

    #[test]
    fn test_code_frame_mentions_position() {
        let source = "var a;\nlet a;";
        let err = parse_script(source).unwrap_err();
        let frame = code_frame("input.js", source, err.as_syntax().unwrap());
        assert!(frame.contains("input.js:2:5"));
        assert!(frame.contains("DuplicateBinding"));
        assert!(frame.contains("let a;"));
    }

    #[test]
    fn test_summary_output() {
        let program = parse_script("a; b;").unwrap();
        let line = render_program("x.js", &program, OutputFormat::Summary);
        assert!(line.contains("x.js"));
        assert!(line.contains("2 statements"));
    }
}
