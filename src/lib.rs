//! taskdef-render: set a container's image in a task definition and merge
//! environment overrides into it, writing the result to a new file.
//!
//! Overrides come from environment files (in listed order) and then from inline
//! `NAME=value` lines; for a given name the last occurrence wins.

pub mod color;
pub mod config;
pub mod env_lines;
pub mod errors;
pub mod inputs;
pub mod outputs;
pub mod run;
pub mod task_def;
pub mod telemetry;

pub use color::{color_enabled_stderr, log_stderr, set_color_mode, ColorMode, Tone};
pub use config::RunConfig;
pub use env_lines::{parse_env_lines, EnvPair};
pub use errors::RenderError;
pub use inputs::{ActionInputs, EnvInputs, Inputs, Layered, MapInputs};
pub use outputs::{write_rendered, CommandFileSink, MemorySink, OutputSink};
pub use run::{render_task_definition, run, run_action};
pub use task_def::{collect_overrides, merge, ContainerDefinition, MergeRequest, TaskDefinition};
pub use telemetry::init_tracing;
