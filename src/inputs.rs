#![allow(clippy::module_name_repetitions)]
//! Named action inputs.
//!
//! Inputs follow the runner convention: `task-definition` is read from
//! `INPUT_TASK-DEFINITION` (spaces become `_`, the name is uppercased, hyphens stay).
//! Values are trimmed; an empty value counts as not supplied.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use crate::errors::RenderError;

pub const TASK_DEFINITION: &str = "task-definition";
pub const CONTAINER_NAME: &str = "container-name";
pub const IMAGE: &str = "image";
pub const ENVIRONMENT_VARIABLES: &str = "environment-variables";
pub const ENVIRONMENT_FILES: &str = "environment-files";

/// A source of raw named string inputs.
pub trait Inputs {
    fn raw(&self, name: &str) -> Option<String>;

    /// Trimmed value; `Ok(None)` for an optional input that is absent or empty.
    fn get_input(&self, name: &str, required: bool) -> Result<Option<String>, RenderError> {
        let value = self
            .raw(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        if required && value.is_none() {
            return Err(RenderError::MissingInput(name.to_string()));
        }
        Ok(value)
    }

    fn get_required(&self, name: &str) -> Result<String, RenderError> {
        self.get_input(name, true)?
            .ok_or_else(|| RenderError::MissingInput(name.to_string()))
    }
}

pub fn input_env_key(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_ascii_uppercase())
}

/// Inputs read from the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvInputs;

impl Inputs for EnvInputs {
    fn raw(&self, name: &str) -> Option<String> {
        env::var(input_env_key(name)).ok()
    }
}

/// Inputs held in memory (CLI flags, tests).
#[derive(Debug, Default, Clone)]
pub struct MapInputs {
    values: HashMap<String, String>,
}

impl MapInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl Inputs for MapInputs {
    fn raw(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Consult `primary` first and fall back to `fallback` for inputs it does not supply.
#[derive(Debug, Clone)]
pub struct Layered<A, B> {
    pub primary: A,
    pub fallback: B,
}

impl<A: Inputs, B: Inputs> Inputs for Layered<A, B> {
    fn raw(&self, name: &str) -> Option<String> {
        self.primary
            .raw(name)
            .or_else(|| self.fallback.raw(name))
    }
}

/// The typed set of inputs a render needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInputs {
    pub task_definition: String,
    pub container_name: String,
    pub image: String,
    pub environment_variables: Option<String>,
    pub environment_files: Vec<PathBuf>,
}

impl ActionInputs {
    pub fn read(inputs: &impl Inputs) -> Result<Self, RenderError> {
        let task_definition = inputs.get_required(TASK_DEFINITION)?;
        let container_name = inputs.get_required(CONTAINER_NAME)?;
        let image = inputs.get_required(IMAGE)?;
        let environment_variables = inputs.get_input(ENVIRONMENT_VARIABLES, false)?;
        let environment_files = inputs
            .get_input(ENVIRONMENT_FILES, false)?
            .map(|list| split_path_list(&list))
            .unwrap_or_default();
        Ok(Self {
            task_definition,
            container_name,
            image,
            environment_variables,
            environment_files,
        })
    }
}

/// One path per line; lines are trimmed and blanks skipped.
pub fn split_path_list(text: &str) -> Vec<PathBuf> {
    text.split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(PathBuf::from)
        .collect()
}
