//! Command implementations.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use docblock::{
    CollectingDiagnostics, Collaborators, Docblock, DocblockOptions, DiagnosticsSink,
    TracingDiagnostics, first_docblocks_with_namespace_in_folder,
};

use crate::cli::{NamespacesArgs, OutputFormat, ParseArgs};
use crate::config::{CliConfig, FlagOverrides};
use crate::error::{CliError, Result};

/// Where a parsed source came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    fn label(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Execute `docblock parse`.
pub async fn parse_execute(args: ParseArgs, config_path: Option<&Path>) -> Result<()> {
    let cwd = current_dir()?;
    let config = CliConfig::load(config_path, &cwd, FlagOverrides::from(&args))?;
    let output = run_parse(&args, config, read_stdin).await?;
    println!("{output}");
    Ok(())
}

/// Parse every source and render the output.
///
/// `stdin` is only called when no file was given. With `--strict`, any tag
/// failure turns into an error once every source has been parsed.
pub async fn run_parse(
    args: &ParseArgs,
    config: CliConfig,
    stdin: impl FnOnce() -> Result<String>,
) -> Result<String> {
    let collected = Arc::new(CollectingDiagnostics::new());
    let diagnostics: Arc<dyn DiagnosticsSink> = if args.strict {
        collected.clone()
    } else {
        Arc::new(TracingDiagnostics)
    };
    let options = DocblockOptions::builder()
        .settings(config.settings)
        .collaborators(Collaborators::builder().diagnostics(diagnostics).build())
        .build();

    let sources: Vec<Source> = if args.files.is_empty() {
        vec![Source::Stdin]
    } else {
        args.files.iter().cloned().map(Source::File).collect()
    };
    let stdin_text = if sources.contains(&Source::Stdin) {
        Some(stdin()?)
    } else {
        None
    };

    let mut documents = Vec::with_capacity(sources.len());
    for source in sources {
        let mut document = match &source {
            Source::Stdin => Docblock::new(stdin_text.clone().unwrap_or_default(), options.clone()),
            Source::File(path) => Docblock::from_path(path, options.clone())?,
        };
        let blocks = document.parse().await?.len();
        tracing::info!(source = %source.label(), blocks, "Parsed source");
        documents.push((source, document));
    }

    let output = render(&documents, args.format)?;

    if args.strict && !collected.is_empty() {
        return Err(CliError::TagFailures {
            count: collected.failures().len(),
        });
    }
    Ok(output)
}

fn render(documents: &[(Source, Docblock)], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let texts = documents
                .iter()
                .map(|(_, document)| document.to_text())
                .collect::<docblock::Result<Vec<_>>>()?;
            Ok(texts.join("\n"))
        }
        OutputFormat::Json => {
            let json = match documents {
                [(_, document)] => document.to_json()?,
                _ => {
                    let mut by_source = serde_json::Map::new();
                    for (source, document) in documents {
                        by_source.insert(source.label(), document.to_json()?);
                    }
                    serde_json::Value::Object(by_source)
                }
            };
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}

/// Execute `docblock namespaces`.
pub async fn namespaces_execute(args: NamespacesArgs, config_path: Option<&Path>) -> Result<()> {
    let cwd = current_dir()?;
    let flags = FlagOverrides {
        exclude: args.exclude.clone(),
        ..FlagOverrides::default()
    };
    let config = CliConfig::load(config_path, &cwd, flags)?;
    let output = run_namespaces(&args.dir, config).await?;
    println!("{output}");
    Ok(())
}

/// Build the namespace index of `dir` as pretty JSON.
pub async fn run_namespaces(dir: &Path, config: CliConfig) -> Result<String> {
    let options = DocblockOptions::from_settings(config.settings);
    let index = first_docblocks_with_namespace_in_folder(dir, &config.exclude, &options).await?;
    tracing::info!(dir = %dir.display(), entries = index.len(), "Indexed namespaces");

    let json: serde_json::Map<String, serde_json::Value> = index
        .into_iter()
        .map(|(key, record)| (key, docblock::Value::Record(record).to_json()))
        .collect();
    Ok(serde_json::to_string_pretty(&json)?)
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|source| CliError::Io {
        path: PathBuf::from("."),
        source,
    })
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|source| CliError::Io {
            path: PathBuf::from("<stdin>"),
            source,
        })?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SOURCE: &str = "/**\n * @name a\n * @status beta\n */\n/**\n * @name b\n * @status wip\n */";

    fn no_stdin() -> Result<String> {
        panic!("stdin should not be read")
    }

    #[tokio::test]
    async fn parses_stdin_as_json() {
        let args = ParseArgs::default();
        let output = run_parse(&args, CliConfig::default(), || Ok(SOURCE.to_string()))
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn filters_from_config() {
        let args = ParseArgs::default();
        let mut config = CliConfig::default();
        config
            .settings
            .filter_by_tag
            .insert("status".into(), serde_json::json!("beta"));
        let output = run_parse(&args, config, || Ok(SOURCE.to_string())).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["name"], "a");
    }

    #[tokio::test]
    async fn multiple_files_are_keyed_by_path() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("a.ts");
        let second = temp.path().join("b.ts");
        fs::write(&first, "/**\n * @name a\n */").unwrap();
        fs::write(&second, "/**\n * @name b\n */").unwrap();

        let args = ParseArgs {
            files: vec![first.clone(), second.clone()],
            ..ParseArgs::default()
        };
        let output = run_parse(&args, CliConfig::default(), no_stdin).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json[first.display().to_string()][0]["name"], "a");
        assert_eq!(json[second.display().to_string()][0]["name"], "b");
    }

    #[tokio::test]
    async fn text_format_prints_normalized_comments() {
        let args = ParseArgs {
            format: OutputFormat::Text,
            ..ParseArgs::default()
        };
        let output = run_parse(&args, CliConfig::default(), || Ok("/** Hello */".to_string()))
            .await
            .unwrap();
        assert_eq!(output, "/**\n* Hello \n*/");
    }

    #[tokio::test]
    async fn strict_mode_fails_on_tag_errors() {
        let args = ParseArgs {
            strict: true,
            ..ParseArgs::default()
        };
        let source = "/**\n * @param {String  name  broken type\n */";
        let err = run_parse(&args, CliConfig::default(), || Ok(source.to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::TagFailures { count: 1 }));
    }

    #[tokio::test]
    async fn namespaces_index_as_json() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("button.ts"), "/**\n * @namespace ui\n */").unwrap();
        let output = run_namespaces(temp.path(), CliConfig::default()).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["ui.button"]["path"], "button.ts");
    }
}
