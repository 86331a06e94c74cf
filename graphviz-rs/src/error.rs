use crate::backend::{CommandLine, ExitCode};
use derive_more::{Display, Error, From};

#[derive(Debug, Display, Error, From)]
pub enum GraphvizError {
    /// The Graphviz binary could not be located on the search path.
    #[display(fmt = "failed to execute {}, make sure the Graphviz executables are on your PATH", command)]
    #[from(ignore)]
    ExecutableNotFound { command: CommandLine },
    #[display(fmt = "{} returned {}: {:?}", command, code, output)]
    #[from(ignore)]
    ProcessFailed {
        command: CommandLine,
        code: ExitCode,
        output: String,
    },
    #[display(fmt = "cannot parse {} output: {:?}", command, output)]
    #[from(ignore)]
    VersionParse { command: CommandLine, output: String },
    #[display(fmt = "{} output is not ASCII", command)]
    #[from(ignore)]
    Decode { command: CommandLine },
    #[display(fmt = "unknown engine: {:?}", _0)]
    #[from(ignore)]
    UnknownEngine(#[error(not(source))] String),
    #[display(fmt = "unknown format: {:?}", _0)]
    #[from(ignore)]
    UnknownFormat(#[error(not(source))] String),
    Io {
        source: std::io::Error,
    },
}

pub type GraphvizResult<T> = Result<T, GraphvizError>;
