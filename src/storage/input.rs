// src/storage/input.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::DocumentFailure;
use crate::records::RawDocument;

/// Regular files directly inside `dir`, sorted by name so batches are reproducible.
fn files_in(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Reads every path (directories expand to their files) into memory.
/// Unreadable paths are reported back and skipped.
pub fn load_documents(paths: &[PathBuf]) -> (Vec<RawDocument>, Vec<DocumentFailure>) {
    let mut documents = Vec::new();
    let mut failures = Vec::new();

    for path in paths {
        let files = if path.is_dir() {
            match files_in(path) {
                Ok(files) => files,
                Err(e) => {
                    tracing::error!("Failed to list {}: {}", path.display(), e);
                    failures.push(DocumentFailure::new(&path.display().to_string(), &e));
                    continue;
                }
            }
        } else {
            vec![path.clone()]
        };

        for file in files {
            let name = file.display().to_string();
            match fs::read(&file) {
                Ok(bytes) => {
                    tracing::debug!("Read {} ({} bytes)", name, bytes.len());
                    documents.push(RawDocument::new(name, bytes));
                }
                Err(e) => {
                    tracing::error!("Error reading {}: {}", name, e);
                    failures.push(DocumentFailure::new(&name, &e));
                }
            }
        }
    }

    (documents, failures)
}
