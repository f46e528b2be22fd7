//! Outline table decoding.
//!
//! A table root's children, in sort order, are its rows. Cells are not stored
//! as siblings: the row node's own text is the first cell, its first child is
//! the second cell, that child's first child the third, and so on.
//!
//! ```text
//! {{[[table]]}}
//! +-- Name          row 0, cell 0
//! |   +-- Role      row 0, cell 1
//! +-- Ada           row 1, cell 0
//!     +-- Engineer  row 1, cell 1
//! ```

use std::fmt::Write;

use roam_outline::{Node, RefIndex};

use crate::refs::resolve_references;

/// A decoded, rectangular table.
///
/// Always has at least one row; the first row is the header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Decode a table root.
    ///
    /// References in every cell are resolved with a single pass. Short rows
    /// are padded with empty cells to the width of the widest row.
    ///
    /// Returns `None` if the root has no rows.
    pub fn decode(root: &Node, index: &RefIndex<'_>) -> Option<Self> {
        let mut rows: Vec<Vec<String>> = root
            .sorted_children()
            .into_iter()
            .map(|row| row_cells(row, index))
            .collect();

        let columns = rows.iter().map(Vec::len).max()?;
        for row in &mut rows {
            row.resize(columns, String::new());
        }

        Some(Self { rows })
    }

    /// Rows including the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Render as a GFM pipe table without a trailing newline.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            push_row(&mut output, row.iter().map(String::as_str));
            if i == 0 {
                output.push('\n');
                push_row(&mut output, std::iter::repeat_n("---", self.columns()));
            }
        }
        output
    }
}

/// Decode and render a table root, or return an empty string if it has no rows.
pub fn render_table(root: &Node, index: &RefIndex<'_>) -> String {
    Table::decode(root, index)
        .map(|table| table.to_markdown())
        .unwrap_or_default()
}

fn row_cells(row: &Node, index: &RefIndex<'_>) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = Some(row);
    while let Some(node) = cell {
        cells.push(resolve_references(&node.text, index, 1));
        cell = node.first_child();
    }
    cells
}

fn push_row<'c>(output: &mut String, cells: impl Iterator<Item = &'c str>) {
    output.push('|');
    for cell in cells {
        let _ = write!(output, " {cell} |");
    }
}
