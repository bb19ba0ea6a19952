//! Shortcode scanning.
//!
//! Finds `[name attrs]`, `[name attrs /]` and `[name attrs]...[/name]`
//! occurrences of registered names in a single left-to-right pass.
//!
//! # Algorithm
//!
//! Scanning is split into a lexing pass and a lazy matching pass:
//!
//! 1. **Lexing** visits every `[` once. An opener is `[` + name + boundary
//!    and the first following `]`, found with a cursor over the precomputed
//!    close-bracket positions that only moves forward. Closers `[/name]` are
//!    paired with openers through one stack per name, so an inner `[name]`
//!    pushes and its own `[/name]` pops before the outer opener is reached.
//! 2. **Matching** ([`Matches`]) walks the openers in order, skips those
//!    inside the previous match and attaches escape brackets.
//!
//! Every step of both passes is counted; the total is bounded by a small
//! multiple of the input length times the number of registered names.

use std::ops::Range;

use crate::html::{SpanCursor, protected_spans};

/// One shortcode occurrence.
///
/// `span` covers the whole consumed text, including a lead `[` and trail `]`
/// escape bracket when present and the closing tag of an enclosing form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a> {
    /// An extra `[` directly before the tag is part of the match.
    pub lead_escape: bool,
    /// Tag name as written.
    pub name: &'a str,
    /// Text between the name and the closing `]` (or `/]`).
    pub attr_text: &'a str,
    /// The tag ended with `/]`.
    pub self_closing: bool,
    /// Text between the opening tag and its matching `[/name]`.
    ///
    /// `None` for self-closing tags and tags with no matching closer.
    pub content: Option<&'a str>,
    /// An extra `]` directly after the tag is part of the match.
    pub trail_escape: bool,
    /// Byte range in the scanned text.
    pub span: Range<usize>,
}

impl Match<'_> {
    /// Whether the tag is wrapped in escape brackets on both sides: `[[tag]]`.
    #[must_use]
    pub fn is_escaped(&self) -> bool {
        self.lead_escape && self.trail_escape
    }

    /// Byte range of the tag itself, without escape brackets.
    #[must_use]
    pub fn tag_span(&self) -> Range<usize> {
        let start = self.span.start + usize::from(self.lead_escape);
        let end = self.span.end - usize::from(self.trail_escape);
        start..end
    }
}

/// Scanner over a fixed set of tag names.
///
/// # Example
///
/// ```
/// use shortcode_engine::Scanner;
///
/// let names = vec!["gallery".to_owned()];
/// let found: Vec<_> = Scanner::new(&names)
///     .scan(r#"a [gallery ids="1,2"] b [[gallery]]"#)
///     .collect();
///
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].attr_text, r#" ids="1,2""#);
/// assert!(found[1].is_escaped());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'n> {
    names: &'n [String],
    ignore_html: bool,
}

impl<'n> Scanner<'n> {
    /// Create a scanner for `names`.
    ///
    /// Names are tried in slice order, so callers pass them longest first
    /// (see [`TagRegistry::names_snapshot`](crate::TagRegistry::names_snapshot)).
    #[must_use]
    pub fn new(names: &'n [String]) -> Self {
        Self {
            names,
            ignore_html: false,
        }
    }

    /// Hide brackets inside HTML tags and comments.
    #[must_use]
    pub fn ignore_html(mut self, ignore: bool) -> Self {
        self.ignore_html = ignore;
        self
    }

    /// Scan `content`, yielding non-overlapping matches left to right.
    ///
    /// Lexing happens here; matches are then produced lazily.
    #[must_use]
    pub fn scan<'a>(&self, content: &'a str) -> Matches<'a> {
        let protected = if self.ignore_html {
            protected_spans(content)
        } else {
            Vec::new()
        };

        let mut lexer = Lexer {
            content,
            names: self.names,
            steps: 0,
        };
        let openers = if self.names.is_empty() || !content.contains('[') {
            Vec::new()
        } else {
            lexer.lex(&protected)
        };

        Matches {
            content,
            openers,
            next: 0,
            cursor: 0,
            steps: lexer.steps,
        }
    }
}

/// An opening tag found during lexing.
#[derive(Debug)]
struct Opener {
    /// Index of the tag's `[`.
    start: usize,
    /// End of the name.
    name_end: usize,
    /// Index of the tag's `]`.
    close: usize,
    self_closing: bool,
    /// Range of the matching `[/name]`.
    closer: Option<Range<usize>>,
}

struct Lexer<'a, 'n> {
    content: &'a str,
    names: &'n [String],
    steps: usize,
}

impl Lexer<'_, '_> {
    fn lex(&mut self, protected: &[Range<usize>]) -> Vec<Opener> {
        let content = self.content;
        let names = self.names;
        let bytes = content.as_bytes();

        let mut shield = SpanCursor::new(protected);
        let closes: Vec<usize> = bytes
            .iter()
            .enumerate()
            .filter(|&(i, &b)| b == b']' && !shield.contains(i))
            .map(|(i, _)| i)
            .collect();
        let mut close_idx = 0;

        let mut openers: Vec<Opener> = Vec::new();
        let mut stacks: Vec<Vec<usize>> = vec![Vec::new(); names.len()];
        // Per name: openers and closers before this position sit inside the
        // previous opening tag of that name and are ignored.
        let mut guards = vec![0usize; names.len()];

        let mut shield = SpanCursor::new(protected);
        for (i, &b) in bytes.iter().enumerate() {
            if b != b'[' {
                continue;
            }
            self.steps += 1;
            if shield.contains(i) {
                continue;
            }

            let rest = &content[i + 1..];
            if let Some(tail) = rest.strip_prefix('/') {
                if let Some(k) = self.closer_name(tail)
                    && i >= guards[k]
                    && let Some(top) = stacks[k].pop()
                {
                    openers[top].closer = Some(i..i + names[k].len() + 3);
                }
                continue;
            }

            let Some(k) = self.opener_name(rest) else {
                continue;
            };
            if i < guards[k] {
                continue;
            }

            let name_end = i + 1 + names[k].len();
            while closes.get(close_idx).is_some_and(|&c| c < name_end) {
                close_idx += 1;
                self.steps += 1;
            }
            let Some(&close) = closes.get(close_idx) else {
                continue;
            };

            let self_closing = close > name_end && bytes[close - 1] == b'/';
            // `[[name ...]]` is a literal and never opens an enclosing form.
            let escaped = i > 0 && bytes[i - 1] == b'[' && bytes.get(close + 1) == Some(&b']');
            guards[k] = close + 1;
            if !self_closing && !escaped {
                stacks[k].push(openers.len());
            }
            openers.push(Opener {
                start: i,
                name_end,
                close,
                self_closing,
                closer: None,
            });
        }

        for (k, stack) in stacks.iter().enumerate() {
            if !stack.is_empty() {
                tracing::trace!(
                    name = %names[k],
                    count = stack.len(),
                    "Unterminated shortcode tags"
                );
            }
        }

        openers
    }

    /// Name index for an opener whose name starts at `rest`.
    ///
    /// The name must not be followed by a word character or hyphen.
    fn opener_name(&mut self, rest: &str) -> Option<usize> {
        let names = self.names;
        names.iter().position(|name| {
            self.steps += 1;
            rest.strip_prefix(name.as_str()).is_some_and(|after| {
                !after
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            })
        })
    }

    /// Name index for a closer whose name starts at `tail` (after `[/`).
    fn closer_name(&mut self, tail: &str) -> Option<usize> {
        let names = self.names;
        names.iter().position(|name| {
            self.steps += 1;
            tail.as_bytes().get(name.len()) == Some(&b']') && tail.starts_with(name.as_str())
        })
    }
}

/// Lazy iterator over the matches of one scan.
///
/// Created by [`Scanner::scan`].
#[derive(Debug)]
pub struct Matches<'a> {
    content: &'a str,
    openers: Vec<Opener>,
    next: usize,
    cursor: usize,
    steps: usize,
}

impl Matches<'_> {
    /// Work steps spent so far: bracket positions visited, name comparisons,
    /// close-bracket cursor moves and openers considered.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl<'a> Iterator for Matches<'a> {
    type Item = Match<'a>;

    fn next(&mut self) -> Option<Match<'a>> {
        let content = self.content;
        let bytes = content.as_bytes();

        while let Some(opener) = self.openers.get(self.next) {
            self.next += 1;
            self.steps += 1;
            if opener.start < self.cursor {
                continue;
            }

            let lead_escape = opener.start > self.cursor && bytes[opener.start - 1] == b'[';
            let (end, inner) = match &opener.closer {
                Some(closer) if !opener.self_closing => {
                    (closer.end, Some(&content[opener.close + 1..closer.start]))
                }
                _ => (opener.close + 1, None),
            };
            let trail_escape = bytes.get(end) == Some(&b']');
            let attr_end = if opener.self_closing {
                opener.close - 1
            } else {
                opener.close
            };

            let found = Match {
                lead_escape,
                name: &content[opener.start + 1..opener.name_end],
                attr_text: &content[opener.name_end..attr_end],
                self_closing: opener.self_closing,
                content: inner,
                trail_escape,
                span: opener.start - usize::from(lead_escape)..end + usize::from(trail_escape),
            };
            self.cursor = found.span.end;
            return Some(found);
        }

        None
    }
}
