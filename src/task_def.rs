#![allow(clippy::module_name_repetitions)]
//! Task definition document: a loosely-typed JSON tree with a typed view over
//! `containerDefinitions[*].{name,image,environment}` only.
//!
//! Every other field passes through untouched and keeps its original key order
//! (serde_json is built with `preserve_order`).

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::env_lines::{parse_env_lines, EnvPair};
use crate::errors::RenderError;

const CONTAINER_DEFINITIONS: &str = "containerDefinitions";

#[derive(Debug, Clone, PartialEq)]
pub struct TaskDefinition {
    root: Value,
}

impl TaskDefinition {
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Parse a document from text; `origin` is only used in the error message.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, RenderError> {
        serde_json::from_str(text)
            .map(Self::from_value)
            .map_err(|e| RenderError::InvalidDocument {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })
    }

    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let text = fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
        Self::parse(&text, path)
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Pretty-print with 2-space indentation and no trailing newline.
    pub fn render(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// Borrow the first container whose `name` exactly equals `name`.
    pub fn container_mut(&mut self, name: &str) -> Result<ContainerDefinition<'_>, RenderError> {
        let containers = self
            .root
            .get_mut(CONTAINER_DEFINITIONS)
            .and_then(Value::as_array_mut)
            .ok_or(RenderError::InvalidDocumentShape)?;
        containers
            .iter_mut()
            .filter_map(Value::as_object_mut)
            .find(|c| c.get("name").and_then(Value::as_str) == Some(name))
            .map(|entry| ContainerDefinition { entry })
            .ok_or_else(|| RenderError::ContainerNotFound(name.to_string()))
    }
}

/// Mutable view over one entry of `containerDefinitions`.
#[derive(Debug)]
pub struct ContainerDefinition<'a> {
    entry: &'a mut Map<String, Value>,
}

impl ContainerDefinition<'_> {
    pub fn set_image(&mut self, image: &str) {
        self.entry
            .insert("image".to_string(), Value::String(image.to_string()));
    }

    /// Fold overrides into `environment`: overwrite the first same-name entry in
    /// place, otherwise append. Entries not named by any override are untouched.
    /// An empty override list leaves the container exactly as it was.
    pub fn apply_overrides(&mut self, overrides: &[EnvPair]) -> Result<(), RenderError> {
        if overrides.is_empty() {
            return Ok(());
        }
        let env = self
            .entry
            .entry("environment")
            .or_insert_with(|| Value::Array(Vec::new()));
        if !env.is_array() {
            *env = Value::Array(Vec::new());
        }
        let Value::Array(list) = env else {
            return Ok(());
        };
        for pair in overrides {
            let existing = list
                .iter_mut()
                .filter_map(Value::as_object_mut)
                .find(|e| e.get("name").and_then(Value::as_str) == Some(pair.name.as_str()));
            match existing {
                Some(entry) => {
                    entry.insert("value".to_string(), Value::String(pair.value.clone()));
                }
                None => list.push(serde_json::to_value(pair)?),
            }
        }
        Ok(())
    }
}

/// What to change in a task definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeRequest {
    pub container_name: String,
    pub image: String,
    /// Applied in order, before `inline_env`.
    pub env_files: Vec<PathBuf>,
    pub inline_env: Option<String>,
}

/// Read and parse every override source: files in listed order, then inline text.
pub fn collect_overrides(req: &MergeRequest) -> Result<Vec<EnvPair>, RenderError> {
    let mut vars = Vec::new();
    for path in &req.env_files {
        if !path.exists() {
            return Err(RenderError::EnvironmentFileNotFound(
                path.display().to_string(),
            ));
        }
        let text = fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
        let parsed = parse_env_lines(&text)?;
        debug!(file = %path.display(), count = parsed.len(), "parsed environment file");
        vars.extend(parsed);
    }
    if let Some(inline) = req.inline_env.as_deref().filter(|s| !s.is_empty()) {
        let parsed = parse_env_lines(inline)?;
        debug!(count = parsed.len(), "parsed inline environment variables");
        vars.extend(parsed);
    }
    Ok(vars)
}

/// Set the container image and merge environment overrides, returning the updated document.
#[instrument(level = "debug", skip(doc, req), fields(container = %req.container_name), err)]
pub fn merge(mut doc: TaskDefinition, req: &MergeRequest) -> Result<TaskDefinition, RenderError> {
    {
        let mut container = doc.container_mut(&req.container_name)?;
        container.set_image(&req.image);
        let overrides = collect_overrides(req)?;
        debug!(overrides = overrides.len(), "applying environment overrides");
        container.apply_overrides(&overrides)?;
    }
    Ok(doc)
}
