//! Interactive pattern queries against a loaded corpus.
//!
//! Each input line is counted as one `count` invocation: a pattern,
//! optionally followed by ` -v NAME` variable declarations. Results print
//! in the same text format as the batch CLI.

use refrain_engine::{Corpus, Miner, SequenceFormat};
use refrain_foundation::{Error, Result};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::report::{DisplayConfig, render_text};

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,
    /// The loaded corpus queried by every input line.
    corpus: Corpus,
    /// Separators used when echoing sequence text.
    format: SequenceFormat,
    /// Report display options.
    config: DisplayConfig,
    /// Whether to show the welcome banner.
    show_banner: bool,
    /// Primary prompt.
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL over a corpus with the default rustyline editor.
    ///
    /// # Errors
    /// Returns an error if the editor fails to initialize.
    pub fn new(corpus: Corpus) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, corpus))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL over a corpus with the given editor.
    pub fn with_editor(mut editor: E, corpus: Corpus) -> Self {
        editor.set_elements(corpus.alphabet().iter().cloned().collect());
        Self {
            editor,
            corpus,
            format: SequenceFormat::default(),
            config: DisplayConfig::default(),
            show_banner: true,
            prompt: "?> ".to_string(),
        }
    }

    /// Sets the sequence format used for echoed text.
    #[must_use]
    pub fn with_format(mut self, format: SequenceFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the report display options.
    #[must_use]
    pub fn with_config(mut self, config: DisplayConfig) -> Self {
        self.config = config;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Runs the REPL loop until EOF.
    ///
    /// # Errors
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        let miner = Miner::new(&self.corpus);
        loop {
            let input = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };

            let trimmed = input.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.editor.add_history(&input);

            if let Some(command) = trimmed.strip_prefix(':') {
                if !self.handle_command(command) {
                    break;
                }
                continue;
            }

            let (pattern, variables) = split_query(trimmed);
            match miner.run_texts(&[pattern], &variables) {
                Ok(report) => {
                    for error in &report.errors {
                        eprintln!("\x1b[31mError: {error}\x1b[0m");
                    }
                    if let Some(variable) = &report.empty_domain {
                        eprintln!(
                            "\x1b[33mwarning: variable {variable} has an empty domain\x1b[0m"
                        );
                    }
                    print!(
                        "{}",
                        render_text(&report, &self.corpus, &self.format, &self.config)
                    );
                }
                Err(e) => print_error(&e),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Handles a `:` command; returns false to exit the loop.
    fn handle_command(&self, command: &str) -> bool {
        match command.trim() {
            "quit" | "q" => false,
            "help" | "h" => {
                println!(
                    "Enter a pattern to count it, optionally with variables:\n\
                     \x20 A -> B\n\
                     \x20 [x OutFever] -v x~Fever\n\
                     Commands: :help, :quit (or Ctrl+D)"
                );
                true
            }
            other => {
                println!("unknown command :{other} (try :help)");
                true
            }
        }
    }

    /// Prints the welcome banner.
    fn print_banner(&self) {
        println!(
            "\x1b[1mRefrain\x1b[0m {} — {} sequences loaded, {} elements",
            env!("CARGO_PKG_VERSION"),
            self.corpus.len(),
            self.corpus.alphabet().len()
        );
        println!("Type a pattern, :help, or Ctrl+D to exit.\n");
    }
}

/// Prints an error in red to stderr.
fn print_error(error: &Error) {
    eprintln!("\x1b[31mError: {error}\x1b[0m");
}

/// Splits an input line into the pattern and its ` -v NAME` declarations.
fn split_query(line: &str) -> (String, Vec<String>) {
    let mut parts = line.split(" -v ");
    let pattern = parts.next().unwrap_or_default().trim().to_string();
    let variables = parts.map(|v| v.trim().to_string()).collect();
    (pattern, variables)
}
