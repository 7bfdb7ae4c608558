//! Mapping page names to permalinks and deciding whether a page exists.

use std::{collections::HashSet, fmt, sync::Arc};

use crate::title::AliasSplit;

pub type PageResolverFn = dyn Fn(&str) -> Vec<String> + Send + Sync;
pub type HrefTemplateFn = dyn Fn(&str) -> String + Send + Sync;

pub const DEFAULT_BASE_CLASS_NAME: &str = "internal";
pub const DEFAULT_UNRESOLVED_CLASS_NAME: &str = "new";
pub const DEFAULT_HREF_PREFIX: &str = "#/page/";

/// Lowercase the name and replace spaces with underscores.
pub fn default_page_resolver(name: &str) -> Vec<String> {
    vec![name.replace(' ', "_").to_lowercase()]
}

pub fn default_href_template(permalink: &str) -> String {
    format!("{DEFAULT_HREF_PREFIX}{permalink}")
}

/// Settings for one processing session. Built once and only read afterwards,
/// so a single config can be shared between threads.
#[derive(Clone)]
pub struct ResolverConfig {
    pub known_identifiers: HashSet<String>,
    pub base_class_name: String,
    pub unresolved_class_name: String,
    pub alias_split: AliasSplit,
    resolver: Arc<PageResolverFn>,
    href_template: Arc<HrefTemplateFn>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            known_identifiers: HashSet::new(),
            base_class_name: DEFAULT_BASE_CLASS_NAME.to_owned(),
            unresolved_class_name: DEFAULT_UNRESOLVED_CLASS_NAME.to_owned(),
            alias_split: AliasSplit::default(),
            resolver: Arc::new(default_page_resolver),
            href_template: Arc::new(default_href_template),
        }
    }
}

impl fmt::Debug for ResolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverConfig")
            .field("known_identifiers", &self.known_identifiers)
            .field("base_class_name", &self.base_class_name)
            .field("unresolved_class_name", &self.unresolved_class_name)
            .field("alias_split", &self.alias_split)
            .finish_non_exhaustive()
    }
}

impl ResolverConfig {
    pub fn with_known_identifiers<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_identifiers = identifiers.into_iter().map(Into::into).collect();
        self
    }

    /// Use a custom resolver producing candidate permalinks in preference order.
    pub fn with_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn with_href_template<F>(mut self, template: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.href_template = Arc::new(template);
        self
    }

    pub fn with_base_class_name(mut self, name: impl Into<String>) -> Self {
        self.base_class_name = name.into();
        self
    }

    pub fn with_unresolved_class_name(mut self, name: impl Into<String>) -> Self {
        self.unresolved_class_name = name.into();
        self
    }

    pub fn with_alias_split(mut self, policy: AliasSplit) -> Self {
        self.alias_split = policy;
        self
    }

    /// Candidate permalinks for a page name. Never empty: a resolver that
    /// returns nothing falls back to the name itself.
    pub fn candidates(&self, name: &str) -> Vec<String> {
        let candidates = (self.resolver)(name);
        if candidates.is_empty() {
            log::warn!("Page resolver returned no candidates for {:?}.", name);
            return vec![name.to_owned()];
        }
        candidates
    }

    pub fn href(&self, permalink: &str) -> String {
        (self.href_template)(permalink)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub permalink: String,
    pub exists: bool,
}

/// The first candidate that is a known identifier wins. Without one, the
/// first candidate is used and the page is marked as missing.
pub fn resolve(target: &str, config: &ResolverConfig) -> Resolution {
    let mut candidates = config.candidates(target);
    match candidates
        .iter()
        .position(|candidate| config.known_identifiers.contains(candidate))
    {
        Some(found) => Resolution {
            permalink: candidates.swap_remove(found),
            exists: true,
        },
        None => Resolution {
            permalink: candidates.swap_remove(0),
            exists: false,
        },
    }
}
