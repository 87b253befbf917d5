// File: src/persistence.rs
//! Renders output documents and writes them into place.
//!
//! Every document of a run is staged in a temp file next to its target
//! first; only when all of them are written are they renamed into place.

use crate::errors::PersistError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::NamedTempFile;
use tracing::debug;

/// How an output document is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Sorted keys, four-space indent.
    Json,
    /// The JSON document as an ES module's default export.
    #[serde(rename = "js")]
    JsModule,
    /// Compact binary snapshot.
    Bincode,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::JsModule => "js",
            Self::Bincode => "bin",
        }
    }

    pub fn render<T: Serialize + ?Sized>(self, value: &T) -> Result<Vec<u8>, PersistError> {
        match self {
            Self::Json => {
                let mut bytes = to_pretty_json(value)?;
                bytes.push(b'\n');
                Ok(bytes)
            }
            Self::JsModule => {
                let mut bytes = b"export default ".to_vec();
                bytes.extend(to_pretty_json(value)?);
                bytes.extend(b";\n");
                Ok(bytes)
            }
            Self::Bincode => Ok(bincode::serialize(value)?),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::JsModule => "js",
            Self::Bincode => "bincode",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "js" => Ok(Self::JsModule),
            "bincode" | "bin" => Ok(Self::Bincode),
            other => Err(format!("unknown output format '{other}' (expected json, js or bincode)")),
        }
    }
}

/// Pretty JSON with a four-space indent and every object's keys sorted,
/// struct fields included.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    // `Value` objects are BTreeMaps, so going through one sorts struct fields too
    let value = serde_json::to_value(value)?;
    let mut bytes = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    value.serialize(&mut serializer)?;
    Ok(bytes)
}

/// A set of documents written together.
pub struct OutputSet {
    dir: PathBuf,
    staged: Vec<(PathBuf, NamedTempFile)>,
}

impl OutputSet {
    pub fn new(dir: &Path) -> Result<Self, PersistError> {
        fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;
        Ok(Self { dir: dir.to_path_buf(), staged: Vec::new() })
    }

    /// Renders `value` and writes it to a temp file in the output directory.
    /// The target `<dir>/<name>.<ext>` is not touched until `commit`.
    pub fn stage<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        format: OutputFormat,
        value: &T,
    ) -> Result<&Path, PersistError> {
        let target = self.dir.join(format!("{name}.{}", format.extension()));
        let bytes = format.render(value)?;

        let temp_file = NamedTempFile::new_in(&self.dir).map_err(|e| io_error(&self.dir, e))?;
        let mut writer = BufWriter::new(&temp_file);
        writer.write_all(&bytes).map_err(|e| io_error(temp_file.path(), e))?;
        writer.flush().map_err(|e| io_error(temp_file.path(), e))?;
        drop(writer);

        debug!(target = %target.display(), bytes = bytes.len(), "staged output");
        self.staged.push((target, temp_file));
        Ok(&self.staged[self.staged.len() - 1].0)
    }

    /// Moves every staged file into place. Dropping an uncommitted set
    /// deletes its temp files and leaves earlier outputs as they were.
    pub fn commit(self) -> Result<Vec<PathBuf>, PersistError> {
        let mut written = Vec::with_capacity(self.staged.len());
        for (target, temp_file) in self.staged {
            temp_file.persist(&target)?;
            written.push(target);
        }
        Ok(written)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> PersistError {
    PersistError::Io { path: path.display().to_string(), source }
}
