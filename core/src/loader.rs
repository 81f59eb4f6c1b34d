//! Corpus loading from CSV, JSON and JSON Lines files, and a reload-on-change cache.
//!
//! This sits outside the ranking engine: the engine only ever sees a
//! [`Corpus`] handed to it by the caller.

use crate::error::{Error, Result};
use crate::index::{Corpus, Document};
use parking_lot::Mutex;
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
struct InputRecord {
    #[serde(default)]
    id: Option<serde_json::Value>,
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    content: String,
}

/// A CSV row; ids stay text so values like `007` survive.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    content: String,
}

impl CsvRecord {
    fn into_document(self, position: usize) -> Document {
        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => position.to_string(),
        };
        Document { id, title: self.title, author: self.author, content: self.content }
    }
}

impl InputRecord {
    fn into_document(self, position: usize) -> Document {
        let id = match self.id {
            Some(serde_json::Value::String(s)) => s,
            Some(serde_json::Value::Null) | None => position.to_string(),
            Some(other) => other.to_string(),
        };
        Document { id, title: self.title, author: self.author, content: self.content }
    }
}

/// Load a `.csv` / `.json` / `.jsonl` file, or every such file under a directory in path order.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus> {
    let path = path.as_ref();
    let files = corpus_files(path)?;
    let mut documents = Vec::new();
    for file in &files {
        match extension(file) {
            Some("jsonl") => load_jsonl(file, &mut documents)?,
            Some("json") => load_json(file, &mut documents)?,
            Some("csv") => load_csv(file, &mut documents)?,
            _ => return Err(Error::UnsupportedFormat(file.clone())),
        }
    }
    tracing::info!(path = %path.display(), files = files.len(), docs = documents.len(), "loaded corpus");
    Ok(Corpus::new(documents))
}

fn extension(path: &Path) -> Option<&str> { path.extension().and_then(|s| s.to_str()) }

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io { path: path.to_path_buf(), source }
}

fn json_err(path: &Path) -> impl FnOnce(serde_json::Error) -> Error + '_ {
    move |source| Error::Json { path: path.to_path_buf(), source }
}

fn corpus_files(path: &Path) -> Result<Vec<PathBuf>> {
    let meta = fs::metadata(path).map_err(io_err(path))?;
    if !meta.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| matches!(extension(p), Some("csv" | "json" | "jsonl")))
        .collect();
    files.sort();
    Ok(files)
}

fn load_jsonl(file: &Path, documents: &mut Vec<Document>) -> Result<()> {
    let reader = BufReader::new(File::open(file).map_err(io_err(file))?);
    let mut skipped = 0usize;
    for line in reader.lines() {
        let line = line.map_err(io_err(file))?;
        if line.trim().is_empty() {
            skipped += 1;
            continue;
        }
        let record: InputRecord = serde_json::from_str(&line).map_err(json_err(file))?;
        documents.push(record.into_document(documents.len()));
    }
    if skipped > 0 {
        tracing::warn!(file = %file.display(), skipped, "skipped blank lines");
    }
    Ok(())
}

fn load_json(file: &Path, documents: &mut Vec<Document>) -> Result<()> {
    let reader = BufReader::new(File::open(file).map_err(io_err(file))?);
    let json: serde_json::Value = serde_json::from_reader(reader).map_err(json_err(file))?;
    let values = match json {
        serde_json::Value::Array(arr) => arr,
        obj @ serde_json::Value::Object(_) => vec![obj],
        _ => return Err(Error::UnsupportedFormat(file.to_path_buf())),
    };
    for v in values {
        let record: InputRecord = serde_json::from_value(v).map_err(json_err(file))?;
        documents.push(record.into_document(documents.len()));
    }
    Ok(())
}

/// Header row names the columns; `title` is required, the rest default.
fn load_csv(file: &Path, documents: &mut Vec<Document>) -> Result<()> {
    let mut reader = csv::Reader::from_path(file).map_err(csv_err(file))?;
    for row in reader.deserialize() {
        let record: CsvRecord = row.map_err(csv_err(file))?;
        documents.push(record.into_document(documents.len()));
    }
    Ok(())
}

fn csv_err(path: &Path) -> impl FnOnce(csv::Error) -> Error + '_ {
    move |source| Error::Csv { path: path.to_path_buf(), source }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FileStamp {
    path: PathBuf,
    modified: Option<SystemTime>,
    len: u64,
}

/// Every source file with its modification time and size, in path order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceVersion {
    files: Vec<FileStamp>,
}

fn source_version(path: &Path) -> Result<SourceVersion> {
    let mut files = Vec::new();
    for file in corpus_files(path)? {
        let meta = fs::metadata(&file).map_err(io_err(&file))?;
        files.push(FileStamp { modified: meta.modified().ok(), len: meta.len(), path: file });
    }
    Ok(SourceVersion { files })
}

struct Loaded {
    version: SourceVersion,
    corpus: Arc<Corpus>,
}

/// Owned load-once cache. A `get` reloads when any source file was added,
/// removed, resized or touched since the last load, or after `invalidate`.
pub struct CachedCorpus {
    path: PathBuf,
    state: Mutex<Option<Loaded>>,
}

impl CachedCorpus {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf(), state: Mutex::new(None) }
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn get(&self) -> Result<Arc<Corpus>> {
        let version = source_version(&self.path)?;
        let mut state = self.state.lock();
        if let Some(loaded) = state.as_ref() {
            if loaded.version == version {
                return Ok(Arc::clone(&loaded.corpus));
            }
            tracing::info!(path = %self.path.display(), "corpus source changed, reloading");
        }
        let corpus = Arc::new(load_corpus(&self.path)?);
        *state = Some(Loaded { version, corpus: Arc::clone(&corpus) });
        Ok(corpus)
    }

    /// Drop the cached corpus; the next `get` reloads.
    pub fn invalidate(&self) {
        *self.state.lock() = None;
    }

    pub fn is_loaded(&self) -> bool { self.state.lock().is_some() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_missing_ids() {
        let r: InputRecord = serde_json::from_str(r#"{"id": 7, "title": "Dune"}"#).unwrap();
        let d = r.into_document(3);
        assert_eq!(d.id, "7");
        assert_eq!(d.author, "");
        assert_eq!(d.content, "");
        let r: InputRecord = serde_json::from_str(r#"{"title": "Dune", "content": "spice"}"#).unwrap();
        assert_eq!(r.into_document(3).id, "3");
    }

    #[test]
    fn blank_csv_id_falls_back_to_position() {
        let r = CsvRecord { id: Some(String::new()), title: "Dune".into(), author: String::new(), content: String::new() };
        assert_eq!(r.into_document(4).id, "4");
    }

    #[test]
    fn title_is_required() {
        assert!(serde_json::from_str::<InputRecord>(r#"{"content": "spice"}"#).is_err());
    }
}
