//! One render: inputs → merge → write → output.
//!
//! Nothing externally visible happens until the merged document has been
//! serialized: the rendered file is created exactly once, after which the
//! `task-definition` output is emitted.

use std::fs;
use std::path::PathBuf;

use tracing::{info, instrument};

use crate::config::RunConfig;
use crate::errors::RenderError;
use crate::inputs::{ActionInputs, Inputs, TASK_DEFINITION};
use crate::outputs::{write_rendered, OutputSink};
use crate::task_def::{merge, MergeRequest, TaskDefinition};

impl ActionInputs {
    pub fn merge_request(&self) -> MergeRequest {
        MergeRequest {
            container_name: self.container_name.clone(),
            image: self.image.clone(),
            env_files: self.environment_files.clone(),
            inline_env: self.environment_variables.clone(),
        }
    }
}

/// Load, merge and serialize without touching the filesystem beyond reads.
pub fn render_task_definition(
    inputs: &ActionInputs,
    config: &RunConfig,
) -> Result<String, RenderError> {
    let path = config.resolve_task_definition(&inputs.task_definition);
    if !path.exists() {
        return Err(RenderError::TaskDefinitionNotFound(
            inputs.task_definition.clone(),
        ));
    }
    let doc = TaskDefinition::load(&path)?;
    merge(doc, &inputs.merge_request())?.render()
}

/// Render and publish; returns the path of the written file.
#[instrument(level = "debug", skip_all, err)]
pub fn run(
    inputs: &impl Inputs,
    config: &RunConfig,
    sink: &mut impl OutputSink,
) -> Result<PathBuf, RenderError> {
    let inputs = ActionInputs::read(inputs)?;
    let rendered = render_task_definition(&inputs, config)?;
    let path = write_rendered(&config.temp_dir, &rendered)?;
    info!(path = %path.display(), container = %inputs.container_name, "wrote task definition");
    if let Err(e) = sink.set_output(TASK_DEFINITION, &path.display().to_string()) {
        // Unpublished renders must not outlive the run.
        let _ = fs::remove_file(&path);
        return Err(e);
    }
    Ok(path)
}

/// `run`, reporting any failure through the sink. Returns the process exit code.
pub fn run_action(inputs: &impl Inputs, config: &RunConfig, sink: &mut impl OutputSink) -> u8 {
    match run(inputs, config, sink) {
        Ok(_) => 0,
        Err(e) => {
            sink.set_failed(&e.to_string());
            1
        }
    }
}
