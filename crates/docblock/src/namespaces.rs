//! Folder-wide index of namespaced docblocks.

use std::path::Path;

use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use indexmap::IndexMap;

use crate::document::Docblock;
use crate::error::{DocblockError, Result};
use crate::settings::DocblockOptions;
use crate::value::{Record, Value};

/// Folders skipped unless the caller passes its own exclude list.
pub const DEFAULT_EXCLUDES: &[&str] = &["**/__tests__/**", "**/__wip__/**"];

/// Index the first docblock of every file under `dir` that mentions `@namespace`.
///
/// Records are keyed by `namespace.name` (the name defaults to the file stem),
/// lose their `raw` text, and gain a `path` relative to `dir`. Files matching
/// one of the `exclude` globs are skipped. A missing `dir` yields an empty index.
pub async fn first_docblocks_with_namespace_in_folder(
    dir: &Path,
    exclude: &[String],
    options: &DocblockOptions,
) -> Result<IndexMap<String, Record>> {
    let mut index = IndexMap::new();
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "Namespace folder does not exist");
        return Ok(index);
    }

    let mut overrides = OverrideBuilder::new(dir);
    let globs: Vec<&str> = if exclude.is_empty() {
        DEFAULT_EXCLUDES.to_vec()
    } else {
        exclude.iter().map(String::as_str).collect()
    };
    for glob in globs {
        overrides
            .add(&format!("!{glob}"))
            .map_err(|err| DocblockError::config(format!("invalid exclude glob '{glob}': {err}")))?;
    }
    let overrides = overrides
        .build()
        .map_err(|err| DocblockError::config(format!("invalid exclude globs: {err}")))?;

    let walker = WalkBuilder::new(dir)
        .hidden(true)
        .git_ignore(true)
        .overrides(overrides)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();

    for entry in walker.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(path) else {
            tracing::debug!(path = %path.display(), "Skipping unreadable file");
            continue;
        };
        if !content.contains("@namespace") {
            continue;
        }

        let mut file_options = options.clone();
        file_options.settings.file_path = Some(path.to_path_buf());
        let mut document = Docblock::new(content, file_options);
        let Some(block) = document.parse().await?.first() else {
            continue;
        };
        let mut record = block.to_object()?.clone();
        record.shift_remove("raw");

        let Some(namespace) = record.get("namespace").and_then(Value::as_str) else {
            tracing::debug!(path = %path.display(), "First docblock has no namespace");
            continue;
        };
        let name = match record.get("name").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        let key = format!("{namespace}.{name}");

        let relative = path.strip_prefix(dir).unwrap_or(path);
        record.insert("path".into(), Value::from(relative.to_string_lossy().into_owned()));
        index.insert(key, record);
    }

    tracing::debug!(dir = %dir.display(), entries = index.len(), "Indexed namespaced docblocks");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn indexes_first_block_by_namespace_and_name() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "src/button.ts",
            "/**\n * @name Button\n * @namespace ui.components\n */\n/**\n * @name other\n */",
        );
        write(temp.path(), "src/colors.ts", "/**\n * @namespace ui.theme\n */");
        write(temp.path(), "src/plain.ts", "/**\n * @name nothing\n */");
        write(
            temp.path(),
            "src/__tests__/button.test.ts",
            "/**\n * @name Hidden\n * @namespace ui.tests\n */",
        );

        let index = first_docblocks_with_namespace_in_folder(temp.path(), &[], &DocblockOptions::new())
            .await
            .unwrap();

        let keys: Vec<_> = index.keys().cloned().collect();
        assert_eq!(keys, ["ui.components.Button", "ui.theme.colors"]);

        let button = &index["ui.components.Button"];
        assert!(!button.contains_key("raw"));
        assert_eq!(
            button["path"],
            Value::from(Path::new("src").join("button.ts").to_string_lossy().into_owned())
        );
    }

    #[tokio::test]
    async fn missing_folder_is_empty() {
        let temp = TempDir::new().unwrap();
        let index = first_docblocks_with_namespace_in_folder(
            &temp.path().join("nope"),
            &[],
            &DocblockOptions::new(),
        )
        .await
        .unwrap();
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn custom_excludes_replace_defaults() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a/one.ts", "/**\n * @namespace a\n */");
        write(temp.path(), "b/two.ts", "/**\n * @namespace b\n */");

        let index = first_docblocks_with_namespace_in_folder(
            temp.path(),
            &["b/**".to_string()],
            &DocblockOptions::new(),
        )
        .await
        .unwrap();
        assert_eq!(index.keys().collect::<Vec<_>>(), ["a.one"]);
    }
}
