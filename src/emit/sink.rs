//! Output sinks
//!
//! Two ways to persist emitted sections, selected by [`SinkMode`]:
//! - [`MemorySink`] collects every section and writes each file once
//! - [`AppendSink`] truncates a file on its first section and appends the rest
//!
//! Both produce byte-identical files for the same section sequence.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use super::Fragments;
use crate::error::{Error, Result};

/// Where emitted sections go
pub trait Sink {
    /// Accept one section destined for `target`
    fn write_section(&mut self, target: &Path, section: Fragments) -> Result<()>;

    /// Flush everything still pending and report what was written
    fn finish(&mut self) -> Result<Vec<WrittenFile>>;
}

/// Summary of one generated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WrittenFile {
    pub path: PathBuf,
    /// Number of emitter sections in the file
    pub sections: usize,
    pub bytes: usize,
}

/// Sink selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SinkMode {
    /// Collect fully in memory, write each file once
    #[default]
    Memory,
    /// Truncate then append section by section
    Append,
}

impl SinkMode {
    pub fn into_sink(self) -> Box<dyn Sink> {
        match self {
            SinkMode::Memory => Box::new(MemorySink::new()),
            SinkMode::Append => Box::new(AppendSink::new()),
        }
    }
}

impl FromStr for SinkMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(SinkMode::Memory),
            "append" => Ok(SinkMode::Append),
            other => Err(Error::Config(format!(
                "unknown sink mode '{}' (expected memory or append)",
                other
            ))),
        }
    }
}

/// Identity of an output file
///
/// Absolute, with `.` and `..` resolved lexically, so that `out/all.py`,
/// `out/../out/all.py` and the absolute spelling share one target.
pub fn target_key(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut key = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !key.pop() {
                    key.push(component);
                }
            }
            other => key.push(other),
        }
    }
    key
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[derive(Debug)]
struct PendingFile {
    /// Spelling of the first write
    path: PathBuf,
    key: PathBuf,
    fragments: Fragments,
    sections: usize,
}

/// Collects sections per target and writes on [`Sink::finish`]
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Vec<PendingFile>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text for `target`, if any section was written to it
    pub fn text(&self, target: &Path) -> Option<String> {
        let key = target_key(target);
        self.files
            .iter()
            .find(|file| file.key == key)
            .map(|file| file.fragments.concat())
    }

    /// Targets in first-write order
    pub fn targets(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|file| file.path.as_path())
    }
}

impl Sink for MemorySink {
    fn write_section(&mut self, target: &Path, section: Fragments) -> Result<()> {
        let key = target_key(target);
        match self.files.iter_mut().find(|file| file.key == key) {
            Some(file) => {
                file.fragments.append(section);
                file.sections += 1;
            }
            None => self.files.push(PendingFile {
                path: target.to_path_buf(),
                key,
                fragments: section,
                sections: 1,
            }),
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<WrittenFile>> {
        let mut written = Vec::with_capacity(self.files.len());
        for PendingFile {
            path,
            fragments,
            sections,
            ..
        } in self.files.drain(..)
        {
            ensure_parent(&path)?;
            let text = fragments.concat();
            fs::write(&path, &text)?;
            info!(path = %path.display(), bytes = text.len(), "wrote file");
            written.push(WrittenFile {
                path,
                sections,
                bytes: text.len(),
            });
        }
        Ok(written)
    }
}

/// Writes each section straight to disk
#[derive(Debug, Default)]
pub struct AppendSink {
    written: Vec<WrittenFile>,
    keys: Vec<PathBuf>,
}

impl AppendSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sink for AppendSink {
    fn write_section(&mut self, target: &Path, section: Fragments) -> Result<()> {
        let text = section.concat();

        let key = target_key(target);
        match self.keys.iter().position(|k| *k == key) {
            Some(index) => {
                let record = &mut self.written[index];
                let mut file = OpenOptions::new().append(true).open(&record.path)?;
                file.write_all(text.as_bytes())?;
                record.sections += 1;
                record.bytes += text.len();
            }
            None => {
                ensure_parent(target)?;
                let mut file = File::create(target)?;
                file.write_all(text.as_bytes())?;
                self.written.push(WrittenFile {
                    path: target.to_path_buf(),
                    sections: 1,
                    bytes: text.len(),
                });
                self.keys.push(key);
            }
        }

        debug!(path = %target.display(), bytes = text.len(), "appended section");
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<WrittenFile>> {
        for file in &self.written {
            info!(path = %file.path.display(), bytes = file.bytes, "wrote file");
        }
        self.keys.clear();
        Ok(std::mem::take(&mut self.written))
    }
}
