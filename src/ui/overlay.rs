use std::ops::Range;

use ratatui::{style::Color, text::Span};

use crate::inline::{InlineSpan, SpanState};
use crate::ui::highlight::HighlightSpan;

/// Projects an inline-diff span sequence onto each side of the row, as the
/// byte ranges of the changed sub-spans. Adjacent ranges are merged.
/// Returns (ranges in the old text, ranges in the new text).
pub fn changed_ranges(spans: &[InlineSpan]) -> (Vec<Range<usize>>, Vec<Range<usize>>) {
    let mut old_ranges: Vec<Range<usize>> = Vec::new();
    let mut new_ranges: Vec<Range<usize>> = Vec::new();
    let mut old_idx = 0;
    let mut new_idx = 0;

    for span in spans {
        let len = span.text.len();
        match span.state {
            SpanState::Unchanged => {
                old_idx += len;
                new_idx += len;
            }
            SpanState::Removed => {
                push_range(&mut old_ranges, old_idx..old_idx + len);
                old_idx += len;
            }
            SpanState::Added => {
                push_range(&mut new_ranges, new_idx..new_idx + len);
                new_idx += len;
            }
        }
    }

    (old_ranges, new_ranges)
}

fn push_range(ranges: &mut Vec<Range<usize>>, range: Range<usize>) {
    match ranges.last_mut() {
        Some(last) if last.end == range.start => last.end = range.end,
        _ => ranges.push(range),
    }
}

/// Lays diff backgrounds over a line's syntax-highlighted spans, walking the
/// highlight spans and the changed ranges in lockstep. Every span gets
/// `base_bg`; the parts covered by a range get `emphasis_bg` instead, split
/// at range boundaries when they fall inside a span.
pub fn overlay_changes<'a>(
    spans: Vec<HighlightSpan>,
    ranges: &[Range<usize>],
    base_bg: Color,
    emphasis_bg: Color,
) -> Vec<Span<'a>> {
    if ranges.is_empty() {
        return spans
            .into_iter()
            .map(|span| Span::styled(span.text, span.style.bg(base_bg)))
            .collect();
    }

    let mut out = Vec::new();
    let mut span_start = 0;

    for span in spans {
        let len = span.text.len();
        let span_end = span_start + len;
        let mut cursor = span_start;

        for range in ranges {
            if range.end <= span_start {
                continue;
            }
            if range.start >= span_end {
                break;
            }

            let overlap_start = range.start.max(span_start);
            let overlap_end = range.end.min(span_end);

            if overlap_start > cursor {
                let chunk = &span.text[(cursor - span_start)..(overlap_start - span_start)];
                out.push(Span::styled(chunk.to_string(), span.style.bg(base_bg)));
            }

            let chunk = &span.text[(overlap_start - span_start)..(overlap_end - span_start)];
            out.push(Span::styled(chunk.to_string(), span.style.bg(emphasis_bg)));

            cursor = overlap_end;
        }

        if cursor < span_end {
            let chunk = &span.text[(cursor - span_start)..];
            out.push(Span::styled(chunk.to_string(), span.style.bg(base_bg)));
        }

        span_start = span_end;
    }

    out
}
