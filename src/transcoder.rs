//! Parsing `[[wikilinks]]` into [`WikiLinkNode`]s and printing them back.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    node::WikiLinkNode,
    resolver::{resolve, ResolverConfig},
    scanner::{Inline, InlineMatcher, InlineRenderer},
    title::PageTitle,
};

/// The character every wikilink starts with.
pub const MARKER: char = '[';

// Matches a wikilink at the start of the input and captures its title.
// The title is the shortest run up to the first `]]` and stays on one line,
// where both `\r` and `\n` end a line.
pub static WIKILINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[\[([^\r\n]+?)\]\]").expect("Failed to compile WIKILINK_RE regex.")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub node: WikiLinkNode,
    /// Bytes of input covered by the link, brackets included.
    pub consumed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct WikiLinkTranscoder {
    config: ResolverConfig,
}

impl WikiLinkTranscoder {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Byte index of the next `[` at or after `from`. Only a hint: the
    /// bracket does not have to start a wikilink.
    pub fn locate_candidate(&self, text: &str, from: usize) -> Option<usize> {
        text.get(from..)?.find(MARKER).map(|index| from + index)
    }

    /// Try to read a wikilink starting exactly at byte `at`.
    pub fn try_match(&self, text: &str, at: usize) -> Option<Match> {
        let captures = WIKILINK_RE.captures(text.get(at..)?)?;
        let consumed = captures.get(0)?.end();
        let raw_title = captures.get(1)?.as_str().trim();

        let node = self.build_node(raw_title);
        log::debug!("Found wikilink: {:?}", node);
        Some(Match { node, consumed })
    }

    /// Wikilink syntax for a node. Parsing the result again gives back the
    /// same target and alias.
    pub fn render(&self, node: &WikiLinkNode) -> String {
        node.to_string()
    }

    fn build_node(&self, raw_title: &str) -> WikiLinkNode {
        let PageTitle { target, alias } = PageTitle::parse(raw_title, self.config.alias_split);
        let resolution = resolve(&target, &self.config);

        let mut render_class = vec![self.config.base_class_name.clone()];
        if !resolution.exists {
            render_class.push(self.config.unresolved_class_name.clone());
        }

        WikiLinkNode {
            render_href: self.config.href(&resolution.permalink),
            render_label: alias.clone(),
            render_class,
            target,
            alias,
            permalink: resolution.permalink,
            exists: resolution.exists,
        }
    }
}

impl InlineMatcher for WikiLinkTranscoder {
    fn locate_candidate(&self, text: &str, from: usize) -> Option<usize> {
        WikiLinkTranscoder::locate_candidate(self, text, from)
    }

    fn try_match(&self, text: &str, at: usize) -> Option<(Inline, usize)> {
        WikiLinkTranscoder::try_match(self, text, at)
            .map(|Match { node, consumed }| (Inline::WikiLink(node), consumed))
    }
}

impl InlineRenderer for WikiLinkTranscoder {
    fn render(&self, inline: &Inline) -> Option<String> {
        match inline {
            Inline::WikiLink(node) => Some(WikiLinkTranscoder::render(self, node)),
            _ => None,
        }
    }
}
