//! Line editor abstraction for the REPL.
//!
//! A trait-based wrapper over rustyline so the REPL stays testable with a
//! scripted editor and the line-editing library remains swappable.

use std::borrow::Cow;

use refrain_foundation::{Error, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator as RlValidator};

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
pub trait LineEditor {
    /// Reads a line with the given prompt.
    ///
    /// # Errors
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Adds a line to history.
    fn add_history(&mut self, line: &str);

    /// Sets the element names offered by completion.
    fn set_elements(&mut self, elements: Vec<String>);
}

/// Helper for rustyline: element completion, history hints, and delimiter
/// validation.
#[derive(Helper, Completer, Hinter, RlValidator)]
struct RefrainHelper {
    #[rustyline(Completer)]
    completer: ElementCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    #[rustyline(Validator)]
    validator: DelimiterValidator,
}

impl Highlighter for RefrainHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        false
    }
}

/// Completes the word under the cursor from the corpus alphabet.
struct ElementCompleter {
    elements: Vec<String>,
}

impl Completer for ElementCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos]
            .rfind(|c: char| c.is_whitespace() || "()[]{}|&~^$".contains(c))
            .map_or(0, |i| i + 1);
        let word = &line[start..pos];

        let candidates: Vec<Pair> = self
            .elements
            .iter()
            .filter(|e| e.starts_with(word))
            .map(|e| Pair {
                display: e.clone(),
                replacement: e.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

/// Flags unbalanced `()[]{}` before the pattern is submitted.
#[derive(Default)]
struct DelimiterValidator;

impl Validator for DelimiterValidator {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        let mut depth = 0i32;
        for c in ctx.input().chars() {
            match c {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                _ => {}
            }
        }
        if depth > 0 {
            Ok(ValidationResult::Invalid(Some(
                " unclosed delimiter".to_string(),
            )))
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<RefrainHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor.
    ///
    /// # Errors
    /// Returns an error if rustyline initialization fails.
    pub fn new() -> Result<Self> {
        let config = Config::builder().auto_add_history(false).build();

        let helper = RefrainHelper {
            completer: ElementCompleter {
                elements: Vec::new(),
            },
            hinter: HistoryHinter::new(),
            validator: DelimiterValidator,
        };

        let mut editor =
            Editor::with_config(config).map_err(|e| Error::internal(e.to_string()))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::internal(e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_elements(&mut self, elements: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.elements = elements;
        }
    }
}
