//! Model name list
//!
//! Model names come either from an explicit list or from a flat text file
//! with one name per line. Names are trimmed; blank entries are dropped.

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Ordered list of model names (PascalCase, e.g. `UserProfile`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelList {
    names: Vec<String>,
}

impl ModelList {
    /// Build from explicit names, trimming each and skipping blank ones
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref().trim();
                (!name.is_empty()).then(|| name.to_string())
            })
            .collect();
        Self { names }
    }

    /// Parse newline-separated names
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        // Trailing blank lines are ordinary file endings, not worth a warning
        let last = lines.iter().rposition(|line| !line.trim().is_empty());

        let mut names = Vec::new();
        for (idx, line) in lines.iter().enumerate() {
            let name = line.trim();
            if name.is_empty() {
                if last.is_some_and(|last| idx < last) {
                    warn!(line = idx + 1, "skipping blank model name");
                }
                continue;
            }
            names.push(name.to_string());
        }
        Self { names }
    }

    /// Load names from a file
    ///
    /// A `.py` path means Django model definitions, which would need a
    /// source parser; that is rejected with [`Error::UnimplementedParsing`].
    pub fn load(path: &Path) -> Result<Self> {
        if path.extension().is_some_and(|ext| ext == "py") {
            return Err(Error::UnimplementedParsing(path.display().to_string()));
        }

        let text = fs::read_to_string(path).map_err(|source| Error::ModelsFile {
            path: path.to_path_buf(),
            source,
        })?;
        let models = Self::from_text(&text);
        debug!(path = %path.display(), count = models.len(), "loaded models");
        Ok(models)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Short content hash of the list, stable across runs
    pub fn hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(self.names.join("\n").as_bytes());
        format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
    }
}

impl AsRef<[String]> for ModelList {
    fn as_ref(&self) -> &[String] {
        &self.names
    }
}
