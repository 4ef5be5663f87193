//! Converts a file's linear diff-line stream into rows for the two-column
//! view, pairing delete runs with the add runs that follow them.

use crate::inline::{self, InlineSpan};
use crate::patch::{DiffLine, LineKind};

/// One row of the split view. Context and hunk lines occupy both columns,
/// paired changes occupy one column each, and a one-sided change leaves the
/// other column empty.
#[derive(Debug, Clone)]
pub struct SplitRow {
    pub left: Option<DiffLine>,
    pub right: Option<DiffLine>,
    /// Present only when `left` is a delete paired with the corresponding
    /// add on `right`.
    pub inline_diff: Option<Vec<InlineSpan>>,
}

/// Builds the row sequence for one file.
///
/// A run of consecutive deletes followed by a run of consecutive adds forms
/// one change block; within the block the i-th delete pairs with the i-th
/// add, by position only. Rows keep the surrounding lines' original order.
pub fn align(lines: &[DiffLine]) -> Vec<SplitRow> {
    let mut rows = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        match lines[i].kind {
            LineKind::Context | LineKind::Hunk => {
                rows.push(SplitRow {
                    left: Some(lines[i].clone()),
                    right: Some(lines[i].clone()),
                    inline_diff: None,
                });
                i += 1;
            }
            LineKind::Delete => {
                let deletes_start = i;
                while i < lines.len() && lines[i].kind == LineKind::Delete {
                    i += 1;
                }
                let adds_start = i;
                while i < lines.len() && lines[i].kind == LineKind::Add {
                    i += 1;
                }

                let deletes = &lines[deletes_start..adds_start];
                let adds = &lines[adds_start..i];

                for idx in 0..deletes.len().max(adds.len()) {
                    let left = deletes.get(idx).cloned();
                    let right = adds.get(idx).cloned();
                    let inline_diff = match (&left, &right) {
                        (Some(del), Some(add)) => {
                            Some(inline::diff_line(&del.content, &add.content))
                        }
                        _ => None,
                    };
                    rows.push(SplitRow {
                        left,
                        right,
                        inline_diff,
                    });
                }
            }
            LineKind::Add => {
                // An add run with no delete run before it.
                rows.push(SplitRow {
                    left: None,
                    right: Some(lines[i].clone()),
                    inline_diff: None,
                });
                i += 1;
            }
        }
    }

    rows
}
