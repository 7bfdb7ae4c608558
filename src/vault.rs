//! Collecting known permalinks from a directory of markdown notes.

use std::{
    collections::HashSet,
    path::{Component, Path},
};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// True if no component of the path starts with a dot.
pub fn file_has_no_hidden_component(path: &Path) -> bool {
    !path.components().any(|component| match component {
        Component::Normal(name) => name.to_str().map_or(false, |name| name.starts_with('.')),
        _ => false,
    })
}

/// The permalink of a note: its path relative to the vault root, without
/// the `.md` extension and with `/` as separator.
fn vault_path_from_relative_path(rel_path: &Path) -> Option<String> {
    match rel_path.extension() {
        Some(ext) if ext == "md" => {
            let without_extension = rel_path.with_extension("");
            let parts = without_extension
                .components()
                .map(|component| component.as_os_str().to_str())
                .collect::<Option<Vec<_>>>()?;
            Some(parts.join("/"))
        }
        _ => None,
    }
}

/// Walk `vault_root_path` and return the permalink of every markdown note
/// outside of hidden directories.
pub fn known_permalinks(vault_root_path: &Path) -> Result<HashSet<String>> {
    let mut permalinks = HashSet::new();
    for entry in WalkDir::new(vault_root_path) {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", vault_root_path))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel_path = entry
            .path()
            .strip_prefix(vault_root_path)
            .with_context(|| format!("{:?} is outside of the vault", entry.path()))?;
        if !file_has_no_hidden_component(rel_path) {
            continue;
        }
        match vault_path_from_relative_path(rel_path) {
            Some(permalink) => {
                log::debug!("Found note {:?}.", permalink);
                permalinks.insert(permalink);
            }
            None => log::trace!("Skipping {:?}.", rel_path),
        }
    }
    log::info!(
        "Collected {} permalinks from {:?}.",
        permalinks.len(),
        vault_root_path
    );
    Ok(permalinks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs::{self, File};

    #[test]
    fn hidden_components() {
        assert!(file_has_no_hidden_component(Path::new("notes/page.md")));
        assert!(!file_has_no_hidden_component(Path::new(".git/config")));
        assert!(!file_has_no_hidden_component(Path::new("notes/.draft.md")));
    }

    #[test]
    fn relative_path_to_permalink() {
        assert_eq!(
            vault_path_from_relative_path(Path::new("wiki_link.md")),
            Some("wiki_link".to_owned())
        );
        assert_eq!(
            vault_path_from_relative_path(Path::new("sub/real_page.md")),
            Some("sub/real_page".to_owned())
        );
        assert_eq!(vault_path_from_relative_path(Path::new("image.png")), None);
    }

    #[test]
    fn collects_markdown_notes() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let root = temp_dir.path();
        fs::create_dir(root.join("sub"))?;
        fs::create_dir(root.join(".hidden"))?;
        File::create(root.join("wiki_link.md"))?;
        File::create(root.join("sub").join("real_page.md"))?;
        File::create(root.join(".hidden").join("secret.md"))?;
        File::create(root.join("image.png"))?;

        let permalinks = known_permalinks(root)?;
        assert_eq!(
            permalinks,
            HashSet::from(["wiki_link".to_owned(), "sub/real_page".to_owned()])
        );

        temp_dir.close()?;
        Ok(())
    }

    #[test]
    fn missing_vault_is_an_error() {
        assert!(known_permalinks(Path::new("/definitely/not/a/vault")).is_err());
    }
}
