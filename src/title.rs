//! Splitting the text between `[[` and `]]` into a page name and the text
//! shown to the reader.

/// The separator between the page name and its alias: `[[Target:Alias]]`.
pub const ALIAS_SEPARATOR: char = ':';

/// What to do with the text after a second `:` in a page title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AliasSplit {
    /// Keep only the text between the first and second separator.
    /// `[[a:b:c]]` has the alias `b`.
    #[default]
    Truncate,
    /// Everything after the first separator is the alias.
    /// `[[a:b:c]]` has the alias `b:c`.
    Rejoin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTitle {
    pub target: String,
    pub alias: String,
}

impl PageTitle {
    /// Parse an already trimmed page title.
    ///
    /// No validation happens here, an empty target is passed through and
    /// left for the resolver to treat as a literal name.
    pub fn parse(raw: &str, policy: AliasSplit) -> Self {
        match raw.split_once(ALIAS_SEPARATOR) {
            Some((target, rest)) => {
                let alias = match policy {
                    AliasSplit::Truncate => rest
                        .split_once(ALIAS_SEPARATOR)
                        .map_or(rest, |(alias, _)| alias),
                    AliasSplit::Rejoin => rest,
                };
                Self {
                    target: target.to_owned(),
                    alias: alias.to_owned(),
                }
            }
            None => Self {
                target: raw.to_owned(),
                alias: raw.to_owned(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_without_alias() {
        let title = PageTitle::parse("Wiki Link", AliasSplit::default());
        assert_eq!(title.target, "Wiki Link");
        assert_eq!(title.alias, "Wiki Link");
    }

    #[test]
    fn title_with_alias() {
        let title = PageTitle::parse("Real Page:Page Alias", AliasSplit::default());
        assert_eq!(title.target, "Real Page");
        assert_eq!(title.alias, "Page Alias");
    }

    #[test]
    fn second_separator_is_truncated_by_default() {
        let title = PageTitle::parse("Page:Alias:Extra", AliasSplit::Truncate);
        assert_eq!(title.target, "Page");
        assert_eq!(title.alias, "Alias");
    }

    #[test]
    fn second_separator_is_kept_when_rejoining() {
        let title = PageTitle::parse("Page:Alias:Extra", AliasSplit::Rejoin);
        assert_eq!(title.target, "Page");
        assert_eq!(title.alias, "Alias:Extra");
    }

    #[test]
    fn empty_parts_pass_through() {
        let title = PageTitle::parse(":Alias", AliasSplit::default());
        assert_eq!(title.target, "");
        assert_eq!(title.alias, "Alias");

        let title = PageTitle::parse("Page:", AliasSplit::default());
        assert_eq!(title.target, "Page");
        assert_eq!(title.alias, "");
    }

    #[test]
    fn inner_whitespace_is_not_trimmed() {
        let title = PageTitle::parse("Real Page : Alias", AliasSplit::default());
        assert_eq!(title.target, "Real Page ");
        assert_eq!(title.alias, " Alias");
    }
}
