//! JSON result file.
//!
//! The result log lives under the `runtime` key of a JSON document. Other
//! top-level keys of an existing document are kept, so the scenario and the
//! results can share one file. Writes go to a sibling temp file first and
//! are renamed into place.

use roundtable_application::ports::result_store::{PersistenceError, ResultStore};
use roundtable_domain::ResultLog;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const RUNTIME_KEY: &str = "runtime";

pub struct JsonResultStore {
    path: PathBuf,
}

impl JsonResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Top-level fields of the current document, if it is a JSON object
    fn existing_document(&self) -> Map<String, Value> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return Map::new();
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                warn!(
                    "{} is not a JSON object; rewriting it with results only",
                    self.path.display()
                );
                Map::new()
            }
        }
    }

    fn write_atomically(&self, content: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content).map_err(|e| self.io_error(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))
    }
}

impl ResultStore for JsonResultStore {
    fn save(&self, log: &ResultLog) -> Result<(), PersistenceError> {
        let mut document = self.existing_document();
        let runtime =
            serde_json::to_value(log).map_err(|e| PersistenceError::Encode(e.to_string()))?;
        document.insert(RUNTIME_KEY.to_string(), runtime);

        let content = serde_json::to_string_pretty(&Value::Object(document))
            .map_err(|e| PersistenceError::Encode(e.to_string()))?;
        self.write_atomically(&content)
    }

    fn load(&self) -> Result<ResultLog, PersistenceError> {
        if !self.path.exists() {
            return Ok(ResultLog::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let decode = |message: String| PersistenceError::Decode {
            path: self.path.display().to_string(),
            message,
        };

        let mut document: Value = serde_json::from_str(&content).map_err(|e| decode(e.to_string()))?;
        match document.get_mut(RUNTIME_KEY).map(Value::take) {
            Some(runtime) => serde_json::from_value(runtime).map_err(|e| decode(e.to_string())),
            None => Ok(ResultLog::new()),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
