//! Parses a multi-file unified-diff patch into per-file split rows.
//!
//! Parsing never fails: malformed input degrades to best-effort line
//! classification and empty input yields no files.

use crate::split::{self, SplitRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Hunk,
    Add,
    Delete,
    Context,
}

/// One physical line of the patch body, with the leading `+`/`-`/space
/// marker stripped. Hunk headers keep their full `@@ .. @@` text and carry
/// no line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: LineKind,
    pub content: String,
    pub old_line_num: Option<u32>,
    pub new_line_num: Option<u32>,
}

impl DiffLine {
    pub fn hunk(header: &str) -> Self {
        Self {
            kind: LineKind::Hunk,
            content: header.to_string(),
            old_line_num: None,
            new_line_num: None,
        }
    }

    pub fn added(content: &str, line_number: u32) -> Self {
        Self {
            kind: LineKind::Add,
            content: content.to_string(),
            old_line_num: None,
            new_line_num: Some(line_number),
        }
    }

    pub fn removed(content: &str, line_number: u32) -> Self {
        Self {
            kind: LineKind::Delete,
            content: content.to_string(),
            old_line_num: Some(line_number),
            new_line_num: None,
        }
    }

    pub fn context(content: &str, old_line_num: u32, new_line_num: u32) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.to_string(),
            old_line_num: Some(old_line_num),
            new_line_num: Some(new_line_num),
        }
    }
}

/// One file section of the patch, already aligned into split-view rows.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub file_name: String,
    pub additions: u32,
    pub deletions: u32,
    pub rows: Vec<SplitRow>,
}

impl ParsedFile {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Splits a raw patch into its file sections and parses each one. Sections
/// with no visible diff body (header-only, or whitespace) are dropped.
pub fn parse(patch: &str) -> Vec<ParsedFile> {
    patch
        .split("diff --git ")
        .filter(|section| !section.trim().is_empty())
        .filter_map(parse_file_section)
        .collect()
}

fn parse_file_section(section: &str) -> Option<ParsedFile> {
    let first_line = section.lines().next().unwrap_or("");
    let file_name = match first_line.split_once("b/") {
        Some((_, path)) => path.trim().to_string(),
        None => "Unknown File".to_string(),
    };

    let mut old_counter: u32 = 0;
    let mut new_counter: u32 = 0;
    let mut additions: u32 = 0;
    let mut deletions: u32 = 0;
    let mut in_hunk = false;
    let mut lines = Vec::new();

    for line in section.lines() {
        if line.starts_with("@@") {
            in_hunk = true;
            // A header that doesn't parse still emits a hunk line; the
            // counters just keep their previous values.
            if let Some((old_start, new_start)) = parse_hunk_header(line) {
                old_counter = old_start;
                new_counter = new_start;
            }
            lines.push(DiffLine::hunk(line));
            continue;
        }
        if !in_hunk {
            // index/---/+++ metadata before the first hunk.
            continue;
        }

        if let Some(content) = line.strip_prefix('+') {
            lines.push(DiffLine::added(content, new_counter));
            new_counter += 1;
            additions += 1;
        } else if let Some(content) = line.strip_prefix('-') {
            lines.push(DiffLine::removed(content, old_counter));
            old_counter += 1;
            deletions += 1;
        } else {
            let content = strip_marker_column(line);
            lines.push(DiffLine::context(content, old_counter, new_counter));
            old_counter += 1;
            new_counter += 1;
        }
    }

    if lines.is_empty() {
        return None;
    }

    Some(ParsedFile {
        file_name,
        additions,
        deletions,
        rows: split::align(&lines),
    })
}

/// Extracts the starting line numbers from `@@ -<old>[,n] +<new>[,n] @@`.
fn parse_hunk_header(line: &str) -> Option<(u32, u32)> {
    let rest = line.strip_prefix("@@ -")?;
    let (old_part, rest) = rest.split_once(" +")?;
    let (new_part, _) = rest.split_once(" @@")?;

    let old_start = old_part.split(',').next()?.parse().ok()?;
    let new_start = new_part.split(',').next()?.parse().ok()?;
    Some((old_start, new_start))
}

/// Drops the leading marker column of a context line. An entirely empty
/// line has no marker column and stays empty.
fn strip_marker_column(line: &str) -> &str {
    let mut chars = line.chars();
    chars.next();
    chars.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::SpanState;

    const SAMPLE_PATCH: &str = r#"diff --git a/test.txt b/test.txt
index 1234567..abcdefg 100644
--- a/test.txt
+++ b/test.txt
@@ -1,5 +1,6 @@
-This is the original file.
+This is the MODIFIED file.
 It has multiple lines.
-Some content here.
+Some NEW content here.
 More content.
+Additional line added.
 Final line."#;

    #[test]
    fn test_parse_sample_patch() {
        let files = parse(SAMPLE_PATCH);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "test.txt");
        assert_eq!(files[0].additions, 3);
        assert_eq!(files[0].deletions, 2);
        assert!(files[0].row_count() > 0);
    }

    #[test]
    fn test_line_numbers_follow_hunk_header() {
        let patch = "diff --git a/f.txt b/f.txt\n@@ -1,2 +1,2 @@\n-foo\n+bar\n context\n";
        let files = parse(patch);

        assert_eq!(files.len(), 1);
        let file = &files[0];
        assert_eq!(file.file_name, "f.txt");
        assert_eq!(file.additions, 1);
        assert_eq!(file.deletions, 1);

        // Row 0 is the hunk header, self-paired.
        let hunk = files[0].rows[0].left.as_ref().unwrap();
        assert_eq!(hunk.kind, LineKind::Hunk);
        assert_eq!(hunk.content, "@@ -1,2 +1,2 @@");

        // Row 1 pairs -foo with +bar and carries an inline diff.
        let row = &file.rows[1];
        let left = row.left.as_ref().unwrap();
        let right = row.right.as_ref().unwrap();
        assert_eq!(left.content, "foo");
        assert_eq!(left.old_line_num, Some(1));
        assert_eq!(right.content, "bar");
        assert_eq!(right.new_line_num, Some(1));
        let inline = row.inline_diff.as_ref().unwrap();
        assert!(inline.iter().all(|s| s.state != SpanState::Unchanged));

        // Row 2 is the trailing context line, numbered on both sides.
        let ctx = file.rows[2].left.as_ref().unwrap();
        assert_eq!(ctx.content, "context");
        assert_eq!(ctx.old_line_num, Some(2));
        assert_eq!(ctx.new_line_num, Some(2));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("   \n  \n").is_empty());
    }

    #[test]
    fn test_header_only_section_is_dropped() {
        let patch = "diff --git a/empty.txt b/empty.txt\nindex 111..222 100644\n";
        assert!(parse(patch).is_empty());
    }

    #[test]
    fn test_missing_file_name_uses_placeholder() {
        let patch = "diff --git mangled header line\n@@ -1,1 +1,1 @@\n-x\n+y\n";
        let files = parse(patch);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "Unknown File");
    }

    #[test]
    fn test_malformed_hunk_header_keeps_counters() {
        let patch = "diff --git a/f b/f\n@@ bad @@\n context\n-old\n+new\n";
        let files = parse(patch);
        assert_eq!(files.len(), 1);

        let rows = &files[0].rows;
        let hunk = rows[0].left.as_ref().unwrap();
        assert_eq!(hunk.kind, LineKind::Hunk);
        assert_eq!(hunk.content, "@@ bad @@");

        // No counters were ever set, so numbering starts from zero.
        let ctx = rows[1].left.as_ref().unwrap();
        assert_eq!(ctx.old_line_num, Some(0));
        assert_eq!(ctx.new_line_num, Some(0));
        let del = rows[2].left.as_ref().unwrap();
        assert_eq!(del.old_line_num, Some(1));
    }

    #[test]
    fn test_multiple_hunks_reset_counters() {
        let patch = concat!(
            "diff --git a/f.rs b/f.rs\n",
            "@@ -1,2 +1,2 @@\n",
            " one\n",
            "-two\n",
            "+TWO\n",
            "@@ -10,2 +10,2 @@\n",
            " ten\n",
            "-eleven\n",
            "+ELEVEN\n",
        );
        let files = parse(patch);
        assert_eq!(files.len(), 1);

        let rows = &files[0].rows;
        let first_ctx = rows[1].left.as_ref().unwrap();
        assert_eq!(first_ctx.old_line_num, Some(1));
        let second_ctx = rows[4].left.as_ref().unwrap();
        assert_eq!(second_ctx.old_line_num, Some(10));
        assert_eq!(second_ctx.new_line_num, Some(10));
        let second_del = rows[5].left.as_ref().unwrap();
        assert_eq!(second_del.old_line_num, Some(11));
    }

    #[test]
    fn test_multi_file_patch() {
        let patch = concat!(
            "diff --git a/one.rs b/one.rs\n",
            "@@ -1,1 +1,1 @@\n",
            "-a\n",
            "+b\n",
            "diff --git a/two.rs b/two.rs\n",
            "@@ -1,1 +1,2 @@\n",
            " keep\n",
            "+add\n",
        );
        let files = parse(patch);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].file_name, "one.rs");
        assert_eq!(files[1].file_name, "two.rs");
        assert_eq!(files[1].additions, 1);
        assert_eq!(files[1].deletions, 0);
    }

    #[test]
    fn test_counts_match_rows() {
        let files = parse(SAMPLE_PATCH);
        let file = &files[0];

        let adds = file
            .rows
            .iter()
            .filter_map(|r| r.right.as_ref())
            .filter(|l| l.kind == LineKind::Add)
            .count() as u32;
        let dels = file
            .rows
            .iter()
            .filter_map(|r| r.left.as_ref())
            .filter(|l| l.kind == LineKind::Delete)
            .count() as u32;

        assert_eq!(file.additions, adds);
        assert_eq!(file.deletions, dels);
    }

    #[test]
    fn test_inline_round_trip_over_parsed_rows() {
        let files = parse(SAMPLE_PATCH);

        for row in &files[0].rows {
            let Some(spans) = &row.inline_diff else {
                continue;
            };
            let old: String = spans
                .iter()
                .filter(|s| s.state != SpanState::Added)
                .map(|s| s.text.as_str())
                .collect();
            let new: String = spans
                .iter()
                .filter(|s| s.state != SpanState::Removed)
                .map(|s| s.text.as_str())
                .collect();
            assert_eq!(old, row.left.as_ref().unwrap().content);
            assert_eq!(new, row.right.as_ref().unwrap().content);
        }
    }

    #[test]
    fn test_empty_context_line_stays_empty() {
        let patch = "diff --git a/f b/f\n@@ -1,2 +1,2 @@\n\n x\n";
        let files = parse(patch);
        let ctx = files[0].rows[1].left.as_ref().unwrap();
        assert_eq!(ctx.kind, LineKind::Context);
        assert_eq!(ctx.content, "");
    }
}
