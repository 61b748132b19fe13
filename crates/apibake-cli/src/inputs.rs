use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use apibake_core::parse;
use apibake_core::text;

/// File extensions parsed as OpenAPI documents.
pub const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Input files in processing order, the directory entries that were skipped and the command
/// line paths that do not exist.
#[derive(Debug, Default, PartialEq)]
pub struct Inputs {
    pub files: Vec<PathBuf>,
    pub ignored: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

/// Expand the command line inputs. Directories contribute their direct entries, sorted by name.
/// Paths that do not exist are collected in [`Inputs::missing`] so the rest can still be used.
pub fn collect(paths: &[PathBuf]) -> Result<Inputs> {
    let mut inputs = Inputs::default();
    for path in paths {
        if path.is_dir() {
            let mut entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory {}", path.display()))?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("failed to read directory {}", path.display()))?;
            entries.sort();
            for entry in entries.into_iter().filter(|e| e.is_file()) {
                inputs.push(entry);
            }
        } else if path.is_file() {
            inputs.push(path.clone());
        } else {
            log::debug!("{} does not exist", path.display());
            inputs.missing.push(path.clone());
        }
    }
    Ok(inputs)
}

impl Inputs {
    fn push(&mut self, path: PathBuf) {
        if is_supported(&path) {
            self.files.push(path);
        } else {
            self.ignored.push(path);
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

pub fn is_supported(path: &Path) -> bool {
    extension(path).is_some_and(|e| EXTENSIONS.contains(&e.as_str()))
}

/// Section name of an input file: the capitalized file stem.
pub fn section_name(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    text::section_name(stem)
}

/// Read and decode one input file into a generic tree.
pub fn read_tree(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let ext = extension(path).unwrap_or_default();
    Ok(parse::decode(&content, &ext)?)
}
