//! Word/character-level diff between a paired deleted/added line.
//!
//! The output is a flat sequence of spans over the line text. Dropping the
//! `Added` spans reconstructs the old line, dropping the `Removed` spans
//! reconstructs the new one, so the renderer can walk a single sequence for
//! both columns.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanState {
    Unchanged,
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub text: String,
    pub state: SpanState,
}

impl InlineSpan {
    fn unchanged(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            state: SpanState::Unchanged,
        }
    }

    fn added(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            state: SpanState::Added,
        }
    }

    fn removed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            state: SpanState::Removed,
        }
    }
}

/// Computes the changed sub-spans between the old and new version of a line.
///
/// Both lines are split into alternating word and whitespace tokens which are
/// consumed in lockstep: equal tokens pass through unchanged, differing token
/// pairs fall down to a positional character diff. There is no re-sync by
/// lookahead and no minimal-edit search; the positional behavior is the
/// contract the renderer relies on.
pub fn diff_line(old_text: &str, new_text: &str) -> Vec<InlineSpan> {
    if old_text == new_text {
        return vec![InlineSpan::unchanged(old_text)];
    }

    let old_tokens = split_keeping_whitespace(old_text);
    let new_tokens = split_keeping_whitespace(new_text);

    let mut spans = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < old_tokens.len() || j < new_tokens.len() {
        match (old_tokens.get(i), new_tokens.get(j)) {
            (Some(old_tok), Some(new_tok)) if old_tok == new_tok => {
                spans.push(InlineSpan::unchanged(*old_tok));
                i += 1;
                j += 1;
            }
            (Some(old_tok), Some(new_tok)) => {
                spans.extend(diff_chars(old_tok, new_tok));
                i += 1;
                j += 1;
            }
            (Some(old_tok), None) => {
                spans.push(InlineSpan::removed(*old_tok));
                i += 1;
            }
            (None, Some(new_tok)) => {
                spans.push(InlineSpan::added(*new_tok));
                j += 1;
            }
            (None, None) => break,
        }
    }

    spans
}

/// Position-by-position character diff of two mismatched tokens.
///
/// Characters are only ever compared at the same index: a mismatch emits a
/// removed/added pair for that position and runs of equal characters extend a
/// trailing unchanged span. A one-character shift therefore shows up as a run
/// of removed/added pairs, not a clean insertion.
fn diff_chars(old_tok: &str, new_tok: &str) -> Vec<InlineSpan> {
    let old_chars: Vec<char> = old_tok.chars().collect();
    let new_chars: Vec<char> = new_tok.chars().collect();

    let mut spans: Vec<InlineSpan> = Vec::new();
    for idx in 0..old_chars.len().max(new_chars.len()) {
        match (old_chars.get(idx), new_chars.get(idx)) {
            (Some(old_ch), Some(new_ch)) if old_ch == new_ch => match spans.last_mut() {
                Some(last) if last.state == SpanState::Unchanged => last.text.push(*old_ch),
                _ => spans.push(InlineSpan::unchanged(old_ch.to_string())),
            },
            (old_ch, new_ch) => {
                if let Some(old_ch) = old_ch {
                    spans.push(InlineSpan::removed(old_ch.to_string()));
                }
                if let Some(new_ch) = new_ch {
                    spans.push(InlineSpan::added(new_ch.to_string()));
                }
            }
        }
    }

    spans
}

/// Splits into alternating word and whitespace tokens, keeping whitespace
/// runs as tokens of their own so the original line can be reassembled by
/// concatenation. The empty string yields no tokens.
fn split_keeping_whitespace(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_whitespace: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let is_ws = ch.is_whitespace();
        if in_whitespace != Some(is_ws) {
            if idx > start {
                tokens.push(&text[start..idx]);
            }
            start = idx;
            in_whitespace = Some(is_ws);
        }
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(spans: &[InlineSpan], exclude: SpanState) -> String {
        spans
            .iter()
            .filter(|s| s.state != exclude)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn test_identical_lines_short_circuit() {
        let spans = diff_line("let x = 1;", "let x = 1;");
        assert_eq!(spans, vec![InlineSpan::unchanged("let x = 1;")]);

        let spans = diff_line("", "");
        assert_eq!(spans, vec![InlineSpan::unchanged("")]);
    }

    #[test]
    fn test_changed_word_falls_to_char_diff() {
        // "world" vs "there" share no characters at any index, so the word
        // pair decomposes into alternating removed/added single characters.
        let spans = diff_line("hello world", "hello there");

        assert_eq!(spans[0], InlineSpan::unchanged("hello"));
        assert_eq!(spans[1], InlineSpan::unchanged(" "));

        let expected: Vec<InlineSpan> = "world"
            .chars()
            .zip("there".chars())
            .flat_map(|(o, n)| {
                vec![
                    InlineSpan::removed(o.to_string()),
                    InlineSpan::added(n.to_string()),
                ]
            })
            .collect();
        assert_eq!(&spans[2..], expected.as_slice());
    }

    #[test]
    fn test_char_diff_keeps_common_prefix() {
        let spans = diff_line("help", "held");
        assert_eq!(
            spans,
            vec![
                InlineSpan::unchanged("hel"),
                InlineSpan::removed("p"),
                InlineSpan::added("d"),
            ]
        );
    }

    #[test]
    fn test_char_diff_length_mismatch() {
        // Extra trailing characters on one side become one span each.
        let spans = diff_line("foo", "foobar");
        assert_eq!(
            spans,
            vec![
                InlineSpan::unchanged("foo"),
                InlineSpan::added("b"),
                InlineSpan::added("a"),
                InlineSpan::added("r"),
            ]
        );
    }

    #[test]
    fn test_trailing_tokens_on_one_side() {
        let spans = diff_line("a b", "a b c");
        assert_eq!(
            spans,
            vec![
                InlineSpan::unchanged("a"),
                InlineSpan::unchanged(" "),
                InlineSpan::unchanged("b"),
                InlineSpan::added(" "),
                InlineSpan::added("c"),
            ]
        );
    }

    #[test]
    fn test_empty_versus_non_empty() {
        let spans = diff_line("", "new line");
        assert_eq!(
            spans,
            vec![
                InlineSpan::added("new"),
                InlineSpan::added(" "),
                InlineSpan::added("line"),
            ]
        );

        let spans = diff_line("old", "");
        assert_eq!(spans, vec![InlineSpan::removed("old")]);
    }

    #[test]
    fn test_round_trip_reconstruction() {
        let cases = [
            ("let total = a + b;", "let total = a - b;"),
            ("  indented", "\tindented"),
            ("short", "a much longer replacement line"),
            ("", "added"),
            ("removed", ""),
        ];

        for (old, new) in cases {
            let spans = diff_line(old, new);
            assert_eq!(reconstruct(&spans, SpanState::Added), old);
            assert_eq!(reconstruct(&spans, SpanState::Removed), new);
        }
    }

    #[test]
    fn test_split_keeping_whitespace() {
        assert_eq!(
            split_keeping_whitespace("  fn main()  {"),
            vec!["  ", "fn", " ", "main()", "  ", "{"]
        );
        assert_eq!(split_keeping_whitespace("word"), vec!["word"]);
        assert_eq!(split_keeping_whitespace("   "), vec!["   "]);
        assert!(split_keeping_whitespace("").is_empty());
    }
}
