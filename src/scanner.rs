//! A minimal inline host: splits text into plain runs and the nodes found by
//! its matchers, and writes those segments back out through its renderers.
//!
//! Matchers are tried in registration order at every candidate position, so
//! a matcher registered first takes precedence over later ones.

use crate::node::WikiLinkNode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    WikiLink(WikiLinkNode),
}

pub trait InlineMatcher: Send + Sync {
    /// Byte index at or after `from` where a match might start.
    fn locate_candidate(&self, text: &str, from: usize) -> Option<usize>;
    /// Match anchored at `at`, returning the node and the bytes it covers.
    fn try_match(&self, text: &str, at: usize) -> Option<(Inline, usize)>;
}

pub trait InlineRenderer: Send + Sync {
    /// `None` if this renderer does not handle the node.
    fn render(&self, inline: &Inline) -> Option<String>;
}

#[derive(Default)]
pub struct Scanner {
    matchers: Vec<Box<dyn InlineMatcher>>,
    renderers: Vec<Box<dyn InlineRenderer>>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matcher(mut self, matcher: impl InlineMatcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    pub fn with_renderer(mut self, renderer: impl InlineRenderer + 'static) -> Self {
        self.renderers.push(Box::new(renderer));
        self
    }

    /// Split `text` into segments. Text between matches is kept verbatim, so
    /// concatenating the segments' source gives back the input.
    pub fn parse(&self, text: &str) -> Vec<Inline> {
        let mut out = vec![];
        let mut text_start = 0;
        let mut pos = 0;

        fn flush_text(out: &mut Vec<Inline>, text: &str, start: usize, end: usize) {
            if end > start {
                out.push(Inline::Text(text[start..end].to_owned()));
            }
        }

        while let Some(candidate) = self.next_candidate(text, pos) {
            match self.match_at(text, candidate) {
                Some((node, consumed)) if consumed > 0 => {
                    log::trace!("Matched {} bytes at {}.", consumed, candidate);
                    flush_text(&mut out, text, text_start, candidate);
                    out.push(node);
                    pos = candidate + consumed;
                    text_start = pos;
                }
                _ => {
                    // Step over the whole character, not just one byte.
                    pos = candidate
                        + text
                            .get(candidate..)
                            .and_then(|rest| rest.chars().next())
                            .map_or(1, char::len_utf8);
                }
            }
        }

        flush_text(&mut out, text, text_start, text.len());
        out
    }

    /// Write segments back out. The first renderer that handles a node wins;
    /// plain text is written as is.
    pub fn render(&self, inlines: &[Inline]) -> String {
        inlines
            .iter()
            .map(|inline| {
                self.renderers
                    .iter()
                    .find_map(|renderer| renderer.render(inline))
                    .unwrap_or_else(|| match inline {
                        Inline::Text(text) => text.clone(),
                        Inline::WikiLink(node) => node.to_string(),
                    })
            })
            .collect()
    }

    fn next_candidate(&self, text: &str, from: usize) -> Option<usize> {
        self.matchers
            .iter()
            .filter_map(|matcher| matcher.locate_candidate(text, from))
            .min()
    }

    fn match_at(&self, text: &str, at: usize) -> Option<(Inline, usize)> {
        self.matchers
            .iter()
            .find_map(|matcher| matcher.try_match(text, at))
    }
}
