//! Shared helpers for the renderers.

use roam_outline::{Node, RefIndex};

/// Collapse every run of three or more newlines to exactly two.
pub(crate) fn collapse_blank_lines(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut newlines = 0;
    for ch in text.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        output.push(ch);
    }
    output
}

/// Join output lines and normalize blank lines and surrounding whitespace.
pub(crate) fn finish(lines: &[String]) -> String {
    collapse_blank_lines(&lines.join("\n")).trim().to_owned()
}

/// Join output lines, dropping repeated separator lines, and trim.
///
/// Only the empty lines the renderer pushes between blocks are merged; node
/// text (code blocks in particular) is emitted verbatim.
pub(crate) fn join_blocks(lines: &[String]) -> String {
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.is_empty() && kept.last().is_some_and(|last| last.is_empty()) {
            continue;
        }
        kept.push(line);
    }
    kept.join("\n").trim().to_owned()
}

/// Index for one render call: the caller's index merged with the input forest.
///
/// Entries already in the caller's index take precedence.
pub(crate) fn merged_index<'a>(external: Option<&RefIndex<'a>>, nodes: &'a [Node]) -> RefIndex<'a> {
    let mut index = external.cloned().unwrap_or_default();
    index.extend(nodes);
    index
}
