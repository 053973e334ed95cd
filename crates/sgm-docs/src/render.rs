//! Plain-text diff rendering.

use std::fmt::Write;

use crate::diff::{ChangeKind, VersionDiff};

/// Render diffs as text, one block per section.
///
/// Each change gets a gutter marker (`+`, `-`, `~`). Modifications show
/// the old text on a `-` line followed by the new text on a `+` line.
pub fn render_diff(diffs: &[VersionDiff]) -> String {
    let mut out = String::new();
    if diffs.is_empty() {
        out.push_str("No differences.\n");
        return out;
    }

    for diff in diffs {
        let _ = writeln!(out, "@@ {} ({})", diff.section_title, diff.section_id);
        for change in &diff.changes {
            if let Some(context) = &change.context {
                let _ = writeln!(out, "{} {context}", change.kind.marker());
            }
            match change.kind {
                ChangeKind::Addition => {
                    if let Some(old) = &change.old_text {
                        push_lines(&mut out, '-', old);
                    }
                    push_lines(&mut out, '+', change.new_text.as_deref().unwrap_or_default());
                }
                ChangeKind::Deletion => {
                    push_lines(&mut out, '-', change.old_text.as_deref().unwrap_or_default());
                    if let Some(new) = &change.new_text {
                        push_lines(&mut out, '+', new);
                    }
                }
                ChangeKind::Modification => {
                    push_lines(&mut out, '-', change.old_text.as_deref().unwrap_or_default());
                    push_lines(&mut out, '+', change.new_text.as_deref().unwrap_or_default());
                }
            }
        }
        out.push('\n');
    }
    out
}

fn push_lines(out: &mut String, marker: char, text: &str) {
    for line in text.lines() {
        let _ = writeln!(out, "{marker}   {line}");
    }
}
