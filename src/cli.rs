use crate::prompt::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// batchyank – pick files level by level, yank a tree and code blocks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root to explore (defaults to CWD)
    #[arg(value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Produce this output without asking first.
    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<OutputMode>,

    /// Where selections are remembered between runs.
    #[arg(long, env = "BATCHYANK_STATE", value_name = "FILE")]
    pub state_file: Option<PathBuf>,

    /// Print the result only; leave the clipboard alone
    #[arg(long)]
    pub no_copy: bool,

    /// Hide entries matched by .gitignore/.ignore files in the prompts
    #[arg(long)]
    pub gitignore: bool,

    #[arg(long, short, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}
