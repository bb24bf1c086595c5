//! Schema loader with registry caching

use crate::model::TypeExpr;
use crate::registry::SchemaRegistry;
use crate::{Error, Result};
use doctype_value::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Decode a YAML document into a raw value
///
/// # Errors
///
/// Returns an error when the text is not valid YAML or contains a mapping
/// with non-string keys.
pub fn raw_from_yaml(yaml: &str) -> Result<Value> {
    let raw: serde_yaml::Value = serde_yaml::from_str(yaml)
        .map_err(|e| Error::InvalidFormat(format!("YAML parse error: {e}")))?;
    Ok(Value::try_from(raw)?)
}

/// Decode a JSON document into a raw value
///
/// # Errors
///
/// Returns an error when the text is not valid JSON.
pub fn raw_from_json(json: &str) -> Result<Value> {
    let raw: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| Error::InvalidFormat(format!("JSON parse error: {e}")))?;
    Ok(Value::from(raw))
}

/// Loader for schema files with search paths and registry caching
///
/// The loader performs the structural decode only. Callers that want the
/// self-hosted meta-schema gate should pass the raw value from
/// [`raw_from_yaml`]/[`raw_from_json`] through the validation crate's
/// `validate_schema` instead.
pub struct SchemaLoader {
    registry: Arc<SchemaRegistry>,
    schema_paths: Vec<PathBuf>,
}

impl SchemaLoader {
    /// Create a new schema loader with the given search paths
    pub fn new(schema_paths: Vec<PathBuf>) -> Self {
        Self {
            registry: Arc::new(SchemaRegistry::new()),
            schema_paths,
        }
    }

    /// Create a new schema loader with a pre-configured registry
    pub fn with_registry(registry: Arc<SchemaRegistry>, schema_paths: Vec<PathBuf>) -> Self {
        Self {
            registry,
            schema_paths,
        }
    }

    /// Load a schema by name
    ///
    /// First checks the registry, then searches the configured paths for
    /// `<name>.yaml`, `<name>.yml`, or `<name>.json`.
    ///
    /// # Errors
    ///
    /// Returns an error when no file is found, the file cannot be decoded,
    /// or its content is not a well-shaped type expression.
    pub fn load(&self, name: &str) -> Result<Arc<TypeExpr>> {
        if let Some(cached) = self.registry.get(name) {
            debug!("cache hit for schema: {}", name);
            return Ok(cached);
        }

        trace!("cache miss for schema: {}", name);

        let schema = Arc::new(self.load_from_disk(name)?);
        self.registry.register(name, Arc::clone(&schema));

        Ok(schema)
    }

    /// Load a schema from a specific file path
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or decoded.
    pub fn load_from_file(&self, path: &Path) -> Result<TypeExpr> {
        trace!("loading schema from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;

        if path
            .extension()
            .map(|e| e == "yaml" || e == "yml")
            .unwrap_or(false)
        {
            self.load_from_yaml(&content)
        } else {
            self.load_from_json(&content)
        }
    }

    /// Load a schema from a YAML string
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not valid YAML or not a
    /// well-shaped type expression.
    pub fn load_from_yaml(&self, yaml: &str) -> Result<TypeExpr> {
        TypeExpr::from_value(&raw_from_yaml(yaml)?)
    }

    /// Load a schema from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not valid JSON or not a
    /// well-shaped type expression.
    pub fn load_from_json(&self, json: &str) -> Result<TypeExpr> {
        TypeExpr::from_value(&raw_from_json(json)?)
    }

    /// Add a search path for schema files
    pub fn add_path(&mut self, path: PathBuf) {
        self.schema_paths.push(path);
    }

    /// Get the registry backing this loader
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    fn load_from_disk(&self, name: &str) -> Result<TypeExpr> {
        for path in &self.schema_paths {
            for extension in ["yaml", "yml", "json"] {
                let file_path = path.join(format!("{name}.{extension}"));
                if file_path.exists() {
                    trace!("found schema file: {:?}", file_path);
                    return self.load_from_file(&file_path);
                }
            }
        }

        Err(Error::NotFound(format!(
            "schema '{}' not found in search paths: {:?}",
            name, self.schema_paths
        )))
    }
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new(vec![PathBuf::from(".")])
    }
}
