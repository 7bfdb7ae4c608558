use std::fmt;

use markdown_it::{Node, NodeValue, Renderer};

use crate::title::ALIAS_SEPARATOR;

pub const OPEN: &str = "[[";
pub const CLOSE: &str = "]]";

/// A parsed wikilink: `[[Target]]` or `[[Target:Alias]]`.
///
/// Only the transcoder builds these, so the fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLinkNode {
    pub(crate) target: String,
    pub(crate) alias: String,
    pub(crate) permalink: String,
    pub(crate) exists: bool,
    pub(crate) render_class: Vec<String>,
    pub(crate) render_href: String,
    pub(crate) render_label: String,
}

impl WikiLinkNode {
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn permalink(&self) -> &str {
        &self.permalink
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn render_class(&self) -> &[String] {
        &self.render_class
    }

    pub fn render_href(&self) -> &str {
        &self.render_href
    }

    pub fn render_label(&self) -> &str {
        &self.render_label
    }

    pub fn has_alias(&self) -> bool {
        self.alias != self.target
    }
}

fn ends_with_whitespace(s: &str) -> bool {
    s.ends_with(char::is_whitespace)
}

/// Writes the node back in wikilink syntax, in a form that parses to the
/// same target and alias.
impl fmt::Display for WikiLinkNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(OPEN)?;
        // `[[]]` does not parse and trailing whitespace would be trimmed, so
        // those titles need the separator.
        let needs_separator =
            self.has_alias() || self.target.is_empty() || ends_with_whitespace(&self.target);
        let last = if needs_separator {
            write!(f, "{}{ALIAS_SEPARATOR}{}", self.target, self.alias)?;
            // A truncated alias can end in whitespace. The extra separator
            // keeps it out of reach of the trim.
            if ends_with_whitespace(&self.alias) {
                write!(f, "{ALIAS_SEPARATOR}")?;
            }
            &self.alias
        } else {
            f.write_str(&self.target)?;
            &self.target
        };
        // `]]]` would close one bracket early.
        if last.ends_with(']') {
            f.write_str(" ")?;
        }
        f.write_str(CLOSE)
    }
}

impl NodeValue for WikiLinkNode {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        let mut attrs = node.attrs.clone();
        attrs.push(("href", self.render_href.clone()));
        attrs.push(("class", self.render_class.join(" ")));

        fmt.open("a", &attrs);
        fmt.text(&self.render_label);
        fmt.close("a");
    }
}
