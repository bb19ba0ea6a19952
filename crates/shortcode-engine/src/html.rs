//! HTML spans hidden from the scanner.

use std::ops::Range;

/// Byte ranges of HTML comments and tags in `content`.
///
/// Comments run from `<!--` to `-->` (or the end of input if unclosed). Tags
/// start with `<` followed by a letter, `/`, `!` or `?` and end at the next
/// `>`; a `<` with no later `>` is plain text.
pub(crate) fn protected_spans(content: &str) -> Vec<Range<usize>> {
    let bytes = content.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(offset) = content[pos..].find('<') {
        let start = pos + offset;
        let rest = &content[start..];

        if let Some(body) = rest.strip_prefix("<!--") {
            let end = body
                .find("-->")
                .map_or(content.len(), |e| start + 4 + e + 3);
            spans.push(start..end);
            pos = end;
            continue;
        }

        let opens_tag = bytes
            .get(start + 1)
            .is_some_and(|b| b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'));

        if opens_tag {
            let Some(close) = rest.find('>') else {
                break;
            };
            spans.push(start..start + close + 1);
            pos = start + close + 1;
        } else {
            pos = start + 1;
        }
    }

    spans
}

/// Membership test over sorted, disjoint spans for non-decreasing positions.
pub(crate) struct SpanCursor<'s> {
    spans: &'s [Range<usize>],
    idx: usize,
}

impl<'s> SpanCursor<'s> {
    pub(crate) fn new(spans: &'s [Range<usize>]) -> Self {
        Self { spans, idx: 0 }
    }

    pub(crate) fn contains(&mut self, pos: usize) -> bool {
        while self.spans.get(self.idx).is_some_and(|span| span.end <= pos) {
            self.idx += 1;
        }
        self.spans.get(self.idx).is_some_and(|span| span.start <= pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_html() {
        assert!(protected_spans("plain [tag] text").is_empty());
    }

    #[test]
    fn test_tags_and_comments() {
        let content = r#"a <img alt="[x]"> b <!-- [y] --> c </p>"#;
        let spans = protected_spans(content);
        let texts: Vec<&str> = spans.iter().map(|s| &content[s.clone()]).collect();
        assert_eq!(texts, [r#"<img alt="[x]">"#, "<!-- [y] -->", "</p>"]);
    }

    #[test]
    fn test_unclosed_comment_runs_to_end() {
        let content = "a <!-- [x]";
        assert_eq!(protected_spans(content), [2..content.len()]);
    }

    #[test]
    fn test_less_than_in_text_is_not_a_tag() {
        assert!(protected_spans("1 < 2 and 3 <4").is_empty());
        assert!(protected_spans("<a no close").is_empty());
    }

    #[test]
    fn test_span_cursor() {
        let spans = [2..4, 8..9];
        let mut cursor = SpanCursor::new(&spans);
        let hits: Vec<usize> = (0..10).filter(|&p| cursor.contains(p)).collect();
        assert_eq!(hits, [2, 3, 8]);
    }
}
