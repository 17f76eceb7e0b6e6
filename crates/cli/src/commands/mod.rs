use clap::Subcommand;
use genesis_core::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;

pub mod run;

use thiserror::Error;

/// Errors that can occur while running the reorder.
#[derive(Debug, Error)]
pub enum RunError {
    /// Reading or writing a file failed.
    #[error("file error on '{}': {source}", path.display())]
    File {
        /// The path being read or written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// An input file is not the expected JSON shape.
    #[error("could not parse '{}': {source}", path.display())]
    Input {
        /// The input file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The configuration file is not valid.
    #[error("invalid config '{}': {source}", path.display())]
    Config {
        /// The config file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The pipeline rejected the data or failed a check.
    #[error(transparent)]
    Pipeline(#[from] genesis_core::Error),
}

impl RunError {
    /// Process status for this failure: 1 for IO and configuration, 2 for bad input data,
    /// 3 for a broken invariant, 4 for a token-id collision.
    pub fn code(&self) -> u8 {
        match self {
            RunError::File { .. } | RunError::Config { .. } | RunError::Serialize(_) => 1,
            RunError::Input { .. } => 2,
            RunError::Pipeline(e) => match e.kind() {
                ErrorKind::Upstream => 2,
                ErrorKind::Invariant => 3,
                ErrorKind::Collision => 4,
            },
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// CLI subcommands.
#[derive(Subcommand)]
pub enum Cmd {
    /// Reorder the metadata with the block hash and write every checkpoint.
    Run(run::RunArgs),
}

/// Trait for executing CLI subcommands.
pub trait Command {
    /// Executes the subcommand.
    fn execute(self) -> Result<(), RunError>;
}

impl Command for Cmd {
    fn execute(self) -> Result<(), RunError> {
        match self {
            Cmd::Run(args) => args.execute(),
        }
    }
}
