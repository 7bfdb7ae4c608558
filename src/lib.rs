//! Wikilinks (`[[Page]]`, `[[Page:Alias]]`) for markdown documents.
//!
//! [`WikiLinkTranscoder`] turns the syntax into [`WikiLinkNode`]s, resolving
//! each target against a set of known permalinks, and prints nodes back out.
//! It plugs into markdown-it through [`markdown::add`] or into the
//! standalone [`Scanner`].

pub mod markdown;
pub mod node;
pub mod resolver;
pub mod scanner;
pub mod title;
pub mod transcoder;
pub mod vault;

pub use node::WikiLinkNode;
pub use resolver::{resolve, Resolution, ResolverConfig};
pub use scanner::{Inline, InlineMatcher, InlineRenderer, Scanner};
pub use title::{AliasSplit, PageTitle};
pub use transcoder::{Match, WikiLinkTranscoder};
