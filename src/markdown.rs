//! An extension for markdown-it that parses wikilinks.
//! A wikilink is a link that looks like this: `[[link]]` or `[[link:alias]]`.

use markdown_it::{
    parser::{
        extset::MarkdownItExt,
        inline::{InlineRule, InlineState},
    },
    MarkdownIt, Node,
};

use crate::transcoder::{self, Match, WikiLinkTranscoder};

impl MarkdownItExt for WikiLinkTranscoder {}

/// Register the wikilink rule. It runs before every other inline rule so
/// that `[[Page]]` is never read as a regular link.
pub fn add(md: &mut MarkdownIt, transcoder: WikiLinkTranscoder) {
    md.ext.insert(transcoder);
    md.inline.add_rule::<WikiLinkScanner>().before_all();
}

#[doc(hidden)]
pub struct WikiLinkScanner;
impl InlineRule for WikiLinkScanner {
    const MARKER: char = transcoder::MARKER;

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let transcoder = state.md.ext.get::<WikiLinkTranscoder>()?;
        let Match { node, consumed } =
            transcoder.try_match(&state.src[state.pos..state.pos_max], 0)?;
        Some((Node::new(node), consumed))
    }
}
