//! Report formatters.
//!
//! The miner produces plain data; this module renders it as the
//! human-readable text report, as CSV rows, or as JSON. All formatters
//! push into a `String` so they can be asserted on directly in tests.

use refrain_engine::{Corpus, Report, ReportBlock, SequenceFormat};
use refrain_foundation::{Error, Fraction, Result};

/// Display options for the text and CSV reports.
#[derive(Clone, Debug, Default)]
pub struct DisplayConfig {
    /// Append ` | N lines: …` to every support line.
    pub show_lines: bool,
    /// Print the matching sequences under every support line.
    pub show_text: bool,
    /// Keep binding blocks whose support is zero.
    pub show_support_zero: bool,
    /// Suppress the per-binding blocks entirely.
    pub hide_bindings: bool,
}

/// Renders the report as the text format.
#[must_use]
pub fn render_text(
    report: &Report,
    corpus: &Corpus,
    format: &SequenceFormat,
    config: &DisplayConfig,
) -> String {
    let mut out = String::new();
    render_block(
        &mut out,
        &report.aggregate,
        corpus,
        format,
        config,
        "",
    );

    if !config.hide_bindings {
        for binding_block in &report.bindings {
            if block_is_zero(&binding_block.block) && !config.show_support_zero {
                continue;
            }
            out.push_str(&format!("\n[BINDING: {}]\n", binding_block.binding));
            render_block(
                &mut out,
                &binding_block.block,
                corpus,
                format,
                config,
                "  ",
            );
        }
    }
    out
}

/// Returns true if the block's headline support is zero.
fn block_is_zero(block: &ReportBlock) -> bool {
    match &block.joint {
        Some(joint) => joint.matches.is_empty(),
        None => block
            .entries
            .first()
            .map_or(true, |entry| entry.matches.is_empty()),
    }
}

/// Renders one block: a single support line, or the joint line plus every
/// directional association rule.
fn render_block(
    out: &mut String,
    block: &ReportBlock,
    corpus: &Corpus,
    format: &SequenceFormat,
    config: &DisplayConfig,
    prefix: &str,
) {
    let Some(joint) = &block.joint else {
        if let Some(entry) = block.entries.first() {
            support_line(
                out,
                prefix,
                &entry.pattern,
                &entry.matches,
                entry.support,
                corpus,
                format,
                config,
            );
        }
        return;
    };

    support_line(
        out,
        prefix,
        &joint.name,
        &joint.matches,
        joint.support,
        corpus,
        format,
        config,
    );
    for rule in &joint.rules {
        out.push_str(&format!(
            "{prefix}Association Rule: {} ==> {}\n",
            rule.lhs, rule.rhs
        ));
        let inner = format!("{prefix}  ");
        for (name, support) in [(&rule.lhs, rule.lhs_support), (&rule.rhs, rule.rhs_support)]
        {
            let matches = block
                .entries
                .iter()
                .find(|entry| &entry.pattern == name)
                .map_or(&[] as &[usize], |entry| &entry.matches);
            support_line(out, &inner, name, matches, support, corpus, format, config);
        }
        if let Some(confidence) = rule.confidence {
            out.push_str(&format!("{prefix}  Conf = {confidence}\n"));
        }
        if let Some(lift) = rule.lift {
            out.push_str(&format!("{prefix}  Lift = {lift}\n"));
        }
    }
}

/// Writes one `Supp(name) = value` line with optional line numbers and
/// sequence text.
#[allow(clippy::too_many_arguments)]
fn support_line(
    out: &mut String,
    prefix: &str,
    name: &str,
    matches: &[usize],
    support: Fraction,
    corpus: &Corpus,
    format: &SequenceFormat,
    config: &DisplayConfig,
) {
    out.push_str(&format!("{prefix}Supp({name}) = {support}"));
    if config.show_lines {
        out.push_str(&format!(" | {} lines", matches.len()));
        if !matches.is_empty() {
            let list: Vec<String> = matches.iter().map(ToString::to_string).collect();
            out.push_str(&format!(": {}", list.join(", ")));
        }
    }
    out.push('\n');
    if config.show_text {
        for &line in matches {
            let number = if config.show_lines {
                format!("{line}: ")
            } else {
                String::new()
            };
            let text = corpus
                .get(line)
                .map(|seq| seq.to_text(format))
                .unwrap_or_default();
            out.push_str(&format!("{prefix}  {number}{text}\n"));
        }
    }
}

/// Renders the report as CSV with a `Name,Support,Lines,Bindings` header.
#[must_use]
pub fn render_csv(report: &Report, config: &DisplayConfig) -> String {
    let mut out = String::from("Name,Support,Lines,Bindings\n");
    csv_rows(&mut out, &report.aggregate, "");
    if !config.hide_bindings {
        for binding_block in &report.bindings {
            if block_is_zero(&binding_block.block) && !config.show_support_zero {
                continue;
            }
            csv_rows(
                &mut out,
                &binding_block.block,
                &binding_block.binding.to_string(),
            );
        }
    }
    out
}

/// Writes the rows of one block: each entry, then the joint when present.
fn csv_rows(out: &mut String, block: &ReportBlock, binding: &str) {
    for entry in &block.entries {
        csv_row(out, &entry.pattern, entry.support, &entry.matches, binding);
    }
    if let Some(joint) = &block.joint {
        csv_row(out, &joint.name, joint.support, &joint.matches, binding);
    }
}

fn csv_row(out: &mut String, name: &str, support: Fraction, matches: &[usize], binding: &str) {
    let lines: Vec<String> = matches.iter().map(ToString::to_string).collect();
    out.push_str(&format!(
        "{},{support},{},{}\n",
        csv_field(name),
        csv_field(&lines.join("; ")),
        csv_field(binding)
    ));
}

/// Quotes a CSV field when it contains a comma or a quote.
fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Renders the report as pretty-printed JSON.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn render_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|e| Error::internal(e.to_string()))
}
