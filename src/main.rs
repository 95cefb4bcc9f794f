use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use taskdef_render::inputs::{
    CONTAINER_NAME, ENVIRONMENT_FILES, ENVIRONMENT_VARIABLES, IMAGE, TASK_DEFINITION,
};
use taskdef_render::{
    color_enabled_stderr, init_tracing, log_stderr, run_action, set_color_mode, ColorMode,
    CommandFileSink, EnvInputs, Layered, MapInputs, RunConfig, Tone,
};

#[derive(Parser, Debug)]
#[command(
    name = "taskdef-render",
    version,
    about = "Insert a container image and environment overrides into a task definition file."
)]
struct Cli {
    /// Task definition file (absolute, or relative to the workspace). Default: INPUT_TASK-DEFINITION
    #[arg(long = "task-definition")]
    task_definition: Option<String>,

    /// Container to update. Default: INPUT_CONTAINER-NAME
    #[arg(long = "container-name")]
    container_name: Option<String>,

    /// Image reference to set on the container. Default: INPUT_IMAGE
    #[arg(long)]
    image: Option<String>,

    /// Newline-separated NAME=value pairs, applied after files. Default: INPUT_ENVIRONMENT-VARIABLES
    #[arg(long = "environment-variables")]
    environment_variables: Option<String>,

    /// Newline-separated environment file paths, applied in order. Default: INPUT_ENVIRONMENT-FILES
    #[arg(long = "environment-files")]
    environment_files: Option<String>,

    /// Workspace root for relative task definition paths. Default: GITHUB_WORKSPACE or cwd
    #[arg(long)]
    workspace: Option<PathBuf>,

    /// Directory receiving the rendered file (created if missing). Default: RUNNER_TEMP or system temp
    #[arg(long = "temp-dir")]
    temp_dir: Option<PathBuf>,

    /// Output command file. Default: GITHUB_OUTPUT; stdout commands when unset
    #[arg(long = "output-file")]
    output_file: Option<PathBuf>,

    /// Colorize stderr: auto|always|never
    #[arg(long, value_enum)]
    color: Option<ColorMode>,

    /// Print debug logs to stderr
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn flag_inputs(&self) -> MapInputs {
        let mut m = MapInputs::new();
        let flags = [
            (TASK_DEFINITION, &self.task_definition),
            (CONTAINER_NAME, &self.container_name),
            (IMAGE, &self.image),
            (ENVIRONMENT_VARIABLES, &self.environment_variables),
            (ENVIRONMENT_FILES, &self.environment_files),
        ];
        for (name, value) in flags {
            if let Some(v) = value {
                m.set(name, v.clone());
            }
        }
        m
    }

    fn run_config(&self) -> Result<RunConfig> {
        let mut cfg = RunConfig::from_env();
        if let Some(ws) = &self.workspace {
            cfg.workspace = ws.clone();
        }
        if let Some(dir) = &self.temp_dir {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create temp dir {}", dir.display()))?;
            cfg.temp_dir = dir.clone();
        }
        if let Some(out) = &self.output_file {
            cfg.output_file = Some(out.clone());
        }
        Ok(cfg)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Some(mode) = cli.color {
        set_color_mode(mode);
    }
    init_tracing(cli.verbose);
    let use_err = color_enabled_stderr();

    let cfg = match cli.run_config() {
        Ok(c) => c,
        Err(e) => {
            log_stderr(use_err, Tone::Error, &format!("taskdef-render: {e:#}"));
            return ExitCode::from(1);
        }
    };

    let inputs = Layered {
        primary: cli.flag_inputs(),
        fallback: EnvInputs,
    };
    if cfg.output_file.is_none() && cli.verbose {
        log_stderr(
            use_err,
            Tone::Warn,
            "taskdef-render: GITHUB_OUTPUT not set; printing ::set-output to stdout",
        );
    }
    let mut sink = CommandFileSink::stdout(cfg.output_file.clone());
    let code = run_action(&inputs, &cfg, &mut sink);
    if code == 0 && cli.verbose {
        log_stderr(use_err, Tone::Info, "taskdef-render: task definition rendered.");
    }
    ExitCode::from(code)
}
