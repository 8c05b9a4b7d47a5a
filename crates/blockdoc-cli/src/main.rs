use anyhow::{Context, Result, bail};
use blockdoc_config::Config;
use blockdoc_engine::{Document, DocumentStore, FsStore, format_outline, io};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use relative_path::RelativePathBuf;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "blockdoc", version, about = "Inspect and normalise block documents")]
struct Cli {
    /// Config file to use instead of ~/.config/blockdoc/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the header and block outline of a document
    Show {
        file: PathBuf,
    },

    /// Rewrite a document in canonical form
    Fmt {
        file: PathBuf,

        /// Only report whether the file is already canonical
        #[arg(long)]
        check: bool,
    },

    /// Decode every document under a directory and verify it round-trips
    Check {
        /// Defaults to the configured notes directory
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let level = config
        .as_ref()
        .and_then(|c| c.log_level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    log::debug!("Config path: {}", Config::config_path().display());

    match cli.command {
        Command::Show { file } => show(&file),
        Command::Fmt { file, check } => {
            let changed = format_file(&file, check)?;
            if check && changed {
                bail!("{} is not in canonical form", file.display());
            }
            Ok(())
        }
        Command::Check { dir } => {
            let (dir, extension) = match (dir, config) {
                (Some(dir), config) => (dir, config.map_or_else(|| "md".to_string(), |c| c.extension)),
                (None, Some(config)) => (config.notes_path, config.extension),
                (None, None) => bail!(
                    "no directory given and no notes_path configured in {}",
                    Config::config_path().display()
                ),
            };
            let failures = check_dir(&dir, &extension)?;
            if !failures.is_empty() {
                for failure in &failures {
                    eprintln!("{failure}");
                }
                bail!("{} document(s) failed checks", failures.len());
            }
            Ok(())
        }
    }
}

/// Splits a file path into a store rooted at its directory and its name.
fn open_file(file: &Path) -> Result<(FsStore, RelativePathBuf)> {
    let name = file
        .file_name()
        .with_context(|| format!("{} is not a file path", file.display()))?;
    let root = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let relative = RelativePathBuf::from_path(name)
        .with_context(|| format!("unusable file name {}", file.display()))?;
    Ok((FsStore::new(root), relative))
}

fn show(file: &Path) -> Result<()> {
    let (store, path) = open_file(file)?;
    let doc = io::load_document(&store, &path)?;

    println!("id: {}", doc.metadata.id);
    if !doc.metadata.title.is_empty() {
        println!("title: {}", doc.metadata.title);
    }
    if !doc.metadata.tags.is_empty() {
        println!("tags: {}", doc.metadata.tags.join(", "));
    }
    println!();
    print!("{}", format_outline(doc.tree()));
    Ok(())
}

/// Canonical text of a document, keeping its stored `updated_at` so that an
/// already formatted file compares equal to itself.
fn canonical(doc: &Document) -> String {
    let stamp = DateTime::parse_from_rfc3339(&doc.metadata.updated_at)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());
    doc.serialize_at(stamp)
}

/// Returns whether the file differs from its canonical form. Unless
/// `check_only`, a differing file is rewritten.
fn format_file(file: &Path, check_only: bool) -> Result<bool> {
    let (store, path) = open_file(file)?;
    let original = store.read(&path)?;
    let doc = Document::from_bytes(&original);

    if canonical(&doc).as_bytes() == original.as_slice() {
        log::info!("{} already canonical", file.display());
        return Ok(false);
    }
    if !check_only {
        io::save_document(&store, &path, &doc)?;
        log::info!("formatted {}", file.display());
    }
    Ok(true)
}

/// Checks every document under `dir`; returns one message per failure.
fn check_dir(dir: &Path, extension: &str) -> Result<Vec<String>> {
    let store = FsStore::open(dir)?;
    let files = io::scan_documents(dir, extension)?;
    log::info!("checking {} document(s) in {}", files.len(), dir.display());

    let mut failures = Vec::new();
    for file in files {
        let relative = file.strip_prefix(dir).unwrap_or(&file);
        let relative = RelativePathBuf::from_path(relative)
            .with_context(|| format!("unusable path {}", file.display()))?;
        let doc = io::load_document(&store, &relative)?;

        if !doc.is_valid() {
            failures.push(format!("{relative}: block tree is invalid"));
            continue;
        }
        let first = canonical(&doc);
        let second = canonical(&Document::from_bytes(first.as_bytes()));
        if first != second {
            failures.push(format!("{relative}: encoding is not stable"));
        } else {
            log::debug!("{relative}: ok");
        }
    }
    Ok(failures)
}
