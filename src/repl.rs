// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Interactive parse REPL: each entry is parsed and its tree printed.

use crate::report::{self, OutputFormat};
use esgrove_parser::lexer::{Scanner, TokenKind};
use esgrove_parser::{ErrorKind, ParseOptions, parse};
use owo_colors::OwoColorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Config, Editor, Helper};
use std::borrow::Cow;
use std::path::PathBuf;

/// REPL configuration constants
const HISTORY_FILE: &str = ".esgrove_history";
const MAX_HISTORY_SIZE: usize = 1000;

/// Words offered for completion besides reserved words.
const CONTEXTUAL: &[&str] = &[
    "async", "await", "let", "static", "yield", "of", "get", "set", "from", "as", "undefined",
];

/// REPL commands that can be executed with a dot prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Exit,
    Clear,
    Version,
    Load,
    Module,
    Strict,
    Loc,
    Format,
}

impl ReplCommand {
    /// Parse a REPL command from input string
    pub fn parse(input: &str) -> Option<(Self, Option<&str>)> {
        let input = input.trim();
        let rest = input.strip_prefix('.')?;

        let mut parts = rest.splitn(2, char::is_whitespace);
        let cmd = parts.next()?.to_lowercase();
        let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

        let command = match cmd.as_str() {
            "help" | "h" | "?" => ReplCommand::Help,
            "exit" | "quit" | "q" => ReplCommand::Exit,
            "clear" | "cls" => ReplCommand::Clear,
            "version" | "v" => ReplCommand::Version,
            "load" | "l" => ReplCommand::Load,
            "module" => ReplCommand::Module,
            "strict" => ReplCommand::Strict,
            "loc" => ReplCommand::Loc,
            "format" => ReplCommand::Format,
            _ => return None,
        };
        Some((command, arg))
    }

    /// Get all available commands for help/completion
    pub fn all_commands() -> &'static [(&'static str, &'static str)] {
        &[
            (".help", "Show this help message"),
            (".exit", "Exit the REPL"),
            (".clear", "Clear the screen"),
            (".version", "Show version information"),
            (".load <file>", "Parse a file"),
            (".module", "Toggle the module goal"),
            (".strict", "Toggle strict mode for scripts"),
            (".loc", "Toggle line/column locations"),
            (".format <fmt>", "Output as json, debug or summary"),
        ]
    }
}

/// Completion, hints, highlighting and multi-line validation
struct EsgroveHelper {
    words: Vec<String>,
    options: ParseOptions,
}

impl EsgroveHelper {
    fn new(options: ParseOptions) -> Self {
        let mut words: Vec<String> = RESERVED
            .iter()
            .chain(CONTEXTUAL)
            .map(|w| w.to_string())
            .collect();
        words.extend(
            ReplCommand::all_commands()
                .iter()
                .filter_map(|(cmd, _)| cmd.split_whitespace().next())
                .map(String::from),
        );
        words.sort();
        words.dedup();
        Self { words, options }
    }

    fn word_start(line: &str) -> usize {
        line.rfind(|c: char| !c.is_alphanumeric() && c != '_' && c != '$' && c != '.')
            .map(|i| i + 1)
            .unwrap_or(0)
    }
}

const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "export", "extends", "false", "finally", "for", "function", "if", "import", "in",
    "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with",
];

impl Completer for EsgroveHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = Self::word_start(&line[..pos]);
        let word = &line[start..pos];
        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        let matches: Vec<Pair> = self
            .words
            .iter()
            .filter(|w| w.starts_with(word))
            .map(|w| Pair {
                display: w.clone(),
                replacement: w[word.len()..].to_string(),
            })
            .collect();

        Ok((pos, matches))
    }
}

impl Hinter for EsgroveHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }
        let word = &line[Self::word_start(line)..];
        if word.len() < 2 {
            return None;
        }
        self.words
            .iter()
            .find(|w| w.starts_with(word) && w.len() > word.len())
            .map(|w| w[word.len()..].to_string().dimmed().to_string())
    }
}

impl Highlighter for EsgroveHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.trim_start().starts_with('.') {
            return Cow::Owned(line.magenta().to_string());
        }
        Cow::Owned(highlight_source(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

/// Colors a line by scanning it. Whatever follows a scan error is left plain.
fn highlight_source(line: &str) -> String {
    let mut out = String::with_capacity(line.len() * 2);
    let mut scanner = Scanner::new(line);
    let mut last = 0;

    while let Ok(token) = scanner.next_token() {
        if matches!(token.kind, TokenKind::Eof) {
            break;
        }
        let (start, end) = (token.span.start, token.span.end);
        out.push_str(&line[last..start]);
        let text = &line[start..end];
        let colored = match &token.kind {
            TokenKind::True | TokenKind::False | TokenKind::Null => text.blue().to_string(),
            kind if kind.is_keyword() => text.magenta().bold().to_string(),
            TokenKind::Number(_) | TokenKind::BigInt(_) => text.yellow().to_string(),
            TokenKind::String(_) | TokenKind::Template { .. } => text.green().to_string(),
            TokenKind::Identifier(name) if CONTEXTUAL.contains(&name.as_str()) => text.magenta().to_string(),
            TokenKind::Identifier(_) | TokenKind::PrivateIdentifier(_) => text.to_string(),
            _ => text.cyan().to_string(),
        };
        out.push_str(&colored);
        last = end;
    }
    out.push_str(&line[last..]);
    out
}

impl Validator for EsgroveHelper {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        let input = ctx.input();
        if input.trim_start().starts_with('.') {
            return Ok(ValidationResult::Valid(None));
        }
        if needs_more_input(input, self.options) {
            return Ok(ValidationResult::Incomplete);
        }
        Ok(ValidationResult::Valid(None))
    }
}

/// True when parsing fails only because the input ended early: the error
/// sits at the end of the input, or a template or comment is still open.
fn needs_more_input(input: &str, options: ParseOptions) -> bool {
    let trimmed = input.trim_end();
    if trimmed.ends_with('\\') {
        return true;
    }
    let Err(err) = parse(input, options) else {
        return false;
    };
    let Some(syntax) = err.as_syntax() else {
        return false;
    };
    match syntax.kind {
        ErrorKind::UnexpectedToken | ErrorKind::AsiFailure => syntax.offset >= trimmed.len(),
        ErrorKind::LexicalError => {
            syntax.offset >= trimmed.len()
                || syntax.message.starts_with("Unterminated template")
                || syntax.message.starts_with("Unterminated comment")
        }
        _ => false,
    }
}

impl Helper for EsgroveHelper {}

/// The interactive parse REPL
pub struct Repl {
    editor: Editor<EsgroveHelper, DefaultHistory>,
    history_path: PathBuf,
    options: ParseOptions,
    format: OutputFormat,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new(options: ParseOptions) -> rustyline::Result<Self> {
        let config = Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .max_history_size(MAX_HISTORY_SIZE)?
            .auto_add_history(true)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(EsgroveHelper::new(options)));

        let history_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("esgrove")
            .join(HISTORY_FILE);

        if let Some(parent) = history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = editor.load_history(&history_path);

        Ok(Self {
            editor,
            history_path,
            options,
            format: OutputFormat::Summary,
        })
    }

    /// Run the REPL main loop
    pub fn run(&mut self) -> rustyline::Result<()> {
        self.print_banner();

        loop {
            let prompt = self.format_prompt();

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    if let Some((cmd, arg)) = ReplCommand::parse(trimmed) {
                        match self.execute_command(cmd, arg) {
                            CommandResult::Continue => continue,
                            CommandResult::Exit => break,
                        }
                    }

                    self.parse_and_print("<repl>", &line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C".dimmed());
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "^D".dimmed());
                    break;
                }
                Err(err) => {
                    eprintln!("{}: {:?}", "Error".red().bold(), err);
                    break;
                }
            }
        }

        let _ = self.editor.save_history(&self.history_path);
        println!();
        Ok(())
    }

    fn print_banner(&self) {
        println!();
        println!(
            "  {} {} {}",
            "esgrove".bright_green().bold(),
            "v".dimmed(),
            env!("CARGO_PKG_VERSION").bright_yellow()
        );
        println!("  {}", "ECMAScript to ESTree, one entry at a time".dimmed());
        println!(
            "  {} {} {}",
            "Type".dimmed(),
            ".help".cyan(),
            "for available commands".dimmed()
        );
        println!();
    }

    fn format_prompt(&self) -> String {
        let goal = if self.options.module {
            "module"
        } else if self.options.strict_by_default {
            "strict"
        } else {
            "script"
        };
        format!("{}{} ", goal.bright_green().bold(), ">".bright_green().bold())
    }

    fn set_options(&mut self, options: ParseOptions) {
        self.options = options;
        if let Some(helper) = self.editor.helper_mut() {
            helper.options = options;
        }
    }

    fn execute_command(&mut self, cmd: ReplCommand, arg: Option<&str>) -> CommandResult {
        match cmd {
            ReplCommand::Help => self.print_help(),
            ReplCommand::Exit => return CommandResult::Exit,
            ReplCommand::Clear => print!("\x1B[2J\x1B[H"),
            ReplCommand::Version => {
                println!("{}: {}", "esgrove".bright_green().bold(), env!("CARGO_PKG_VERSION").yellow());
            }
            ReplCommand::Load => match arg {
                Some(path) => self.load_file(path),
                None => eprintln!(
                    "{}: {} {}",
                    "Error".red().bold(),
                    ".load".cyan(),
                    "requires a file path".dimmed()
                ),
            },
            ReplCommand::Module => {
                let options = self.options.with_module(!self.options.module);
                self.set_options(options);
                print_toggle("module goal", options.module);
            }
            ReplCommand::Strict => {
                let options = self.options.with_strict(!self.options.strict_by_default);
                self.set_options(options);
                print_toggle("strict mode", options.strict_by_default);
            }
            ReplCommand::Loc => {
                let options = self.options.with_locations(!self.options.track_source_locations);
                self.set_options(options);
                print_toggle("locations", options.track_source_locations);
            }
            ReplCommand::Format => match arg.map(str::to_lowercase).as_deref() {
                Some("json") => self.format = OutputFormat::Json,
                Some("debug") => self.format = OutputFormat::Debug,
                Some("summary") => self.format = OutputFormat::Summary,
                _ => eprintln!(
                    "{}: {} {}",
                    "Error".red().bold(),
                    ".format".cyan(),
                    "expects json, debug or summary".dimmed()
                ),
            },
        }
        CommandResult::Continue
    }

    fn print_help(&self) {
        println!();
        println!("{}", "REPL Commands:".white().bold());
        println!();
        for (cmd, desc) in ReplCommand::all_commands() {
            println!("  {:16} {}", cmd.cyan(), desc.dimmed());
        }
        println!();
        println!("{}", "Keyboard Shortcuts:".white().bold());
        println!();
        println!("  {:16} {}", "Ctrl+C".yellow(), "Cancel current input".dimmed());
        println!("  {:16} {}", "Ctrl+D".yellow(), "Exit REPL".dimmed());
        println!("  {:16} {}", "Tab".yellow(), "Autocomplete".dimmed());
        println!();
    }

    fn load_file(&self, path: &str) {
        match std::fs::read_to_string(path) {
            Ok(source) => self.parse_and_print(path, &source),
            Err(e) => eprintln!("{}: Failed to read {}: {}", "IOError".red().bold(), path, e),
        }
    }

    fn parse_and_print(&self, name: &str, source: &str) {
        match parse(source, self.options) {
            Ok(program) => println!("{}", report::render_program(name, &program, self.format)),
            Err(e) => report::print_error(name, source, &e),
        }
    }
}

fn print_toggle(what: &str, on: bool) {
    let state = if on { "on".green().to_string() } else { "off".red().to_string() };
    println!("{} {}", what.dimmed(), state);
}

/// Result of executing a REPL command
enum CommandResult {
    Continue,
    Exit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repl_command_parse() {
        assert!(matches!(ReplCommand::parse(".help"), Some((ReplCommand::Help, None))));
        assert!(matches!(ReplCommand::parse(".exit"), Some((ReplCommand::Exit, None))));
        assert!(matches!(
            ReplCommand::parse(".load test.js"),
            Some((ReplCommand::Load, Some("test.js")))
        ));
        assert!(matches!(
            ReplCommand::parse(".format  json"),
            Some((ReplCommand::Format, Some("json")))
        ));
        assert!(matches!(ReplCommand::parse(".module"), Some((ReplCommand::Module, None))));
        assert!(ReplCommand::parse("not a command").is_none());
        assert!(ReplCommand::parse(".unknown").is_none());
    }

    #[test]
    fn test_needs_more_input() {
        let options = ParseOptions::default();
        assert!(needs_more_input("var x =", options));
        assert!(needs_more_input("if (a)", options));
        assert!(needs_more_input("function f() {\n  return 1;", options));
        assert!(needs_more_input("[1,\n2", options));
        assert!(!needs_more_input("var x = 1;", options));
        // A real error is not a request for more input.
        assert!(!needs_more_input("let a; let a;", options));
    }

    #[test]
    fn test_highlight_keeps_text() {
        let line = "let x = 'a' + 1; // done";
        let highlighted = highlight_source(line);
        assert!(highlighted.contains("// done"));
        assert!(highlighted.contains('x'));
        assert!(highlight_source("'unterminated").contains("unterminated"));
    }
}
