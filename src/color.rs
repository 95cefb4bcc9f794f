//! Colorized stderr one-liners. Stdout carries workflow commands and is never painted.

use clap::ValueEnum;
use once_cell::sync::OnceCell;

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

static COLOR_MODE: OnceCell<ColorMode> = OnceCell::new();

pub fn set_color_mode(mode: ColorMode) {
    let _ = COLOR_MODE.set(mode);
}

/// `--color` wins over `TASKDEF_RENDER_COLOR`; `NO_COLOR` turns color off regardless.
pub fn color_enabled_stderr() -> bool {
    let env_mode = std::env::var("TASKDEF_RENDER_COLOR")
        .ok()
        .and_then(|v| ColorMode::from_str(v.trim(), true).ok());
    enabled(
        COLOR_MODE.get().copied().or(env_mode),
        std::env::var_os("NO_COLOR").is_some(),
        atty::is(atty::Stream::Stderr),
    )
}

fn enabled(mode: Option<ColorMode>, no_color: bool, is_tty: bool) -> bool {
    if no_color {
        return false;
    }
    match mode {
        Some(ColorMode::Always) => true,
        Some(ColorMode::Never) => false,
        Some(ColorMode::Auto) | None => is_tty,
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Tone {
    Info,
    Warn,
    Error,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Info => "\x1b[36;1m",
            Tone::Warn => "\x1b[33m",
            Tone::Error => "\x1b[31;1m",
        }
    }
}

fn styled(use_color: bool, tone: Tone, msg: &str) -> String {
    if use_color {
        format!("{}{msg}\x1b[0m", tone.ansi())
    } else {
        msg.to_string()
    }
}

pub fn log_stderr(use_color: bool, tone: Tone, msg: &str) {
    eprintln!("{}", styled(use_color, tone, msg));
}
