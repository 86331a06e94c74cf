//! Running the Graphviz executables.

use crate::error::{GraphvizError, GraphvizResult};
use crate::parameters::{Engine, Format};
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use tracing::trace;

pub const DOT_BINARY: &str = "dot";

/// A program together with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new<I, S>(program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandLine {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Display for CommandLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", self.program.display()))?;
        if !self.args.is_empty() {
            f.write_fmt(format_args!(" {}", self.args.iter().join(" ")))?;
        }
        Ok(())
    }
}

/// Exit code of a finished process, `None` when it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub Option<i32>);

impl Display for ExitCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(code) => f.write_fmt(format_args!("non-zero exit status {}", code)),
            None => f.write_str("no exit status (terminated by signal)"),
        }
    }
}

/// Captured output of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    /// stdout followed by stderr.
    pub fn combined(&self) -> Vec<u8> {
        let mut combined = Vec::with_capacity(self.stdout.len() + self.stderr.len());
        combined.extend_from_slice(&self.stdout);
        combined.extend_from_slice(&self.stderr);
        combined
    }
}

/// Launches external commands.
///
/// Implementations return `Ok` only when the command ran and exited successfully. A program
/// that cannot be located is reported as [`GraphvizError::ExecutableNotFound`], a failing exit
/// status as [`GraphvizError::ProcessFailed`].
pub trait ProcessRunner {
    fn run(&self, command: &CommandLine, input: Option<&[u8]>) -> GraphvizResult<ProcessOutput>;
}

/// [`ProcessRunner`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CommandLine, input: Option<&[u8]>) -> GraphvizResult<ProcessOutput> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => GraphvizError::ExecutableNotFound {
                    command: command.clone(),
                },
                _ => err.into(),
            })?;

        let (written, output) = match (input, child.stdin.take()) {
            (Some(input), Some(mut stdin)) => thread::scope(|scope| {
                // the writer owns stdin, dropping it closes the pipe
                let writer = scope.spawn(move || stdin.write_all(input));
                let output = child.wait_with_output();
                let written = writer
                    .join()
                    .unwrap_or_else(|_| Err(io::Error::new(ErrorKind::Other, "stdin writer panicked")));
                (written, output)
            }),
            _ => (Ok(()), child.wait_with_output()),
        };
        let output = output?;
        trace!(%command, status = %output.status, "process finished");

        if !output.status.success() {
            let mut combined = output.stdout;
            combined.extend_from_slice(&output.stderr);
            return Err(GraphvizError::ProcessFailed {
                command: command.clone(),
                code: ExitCode(output.status.code()),
                output: String::from_utf8_lossy(&combined).into_owned(),
            });
        }
        // a child that exits successfully without reading all of its input is not an error
        match written {
            Err(err) if err.kind() != ErrorKind::BrokenPipe => return Err(err.into()),
            _ => {}
        }

        Ok(ProcessOutput {
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Which `dot` binary to invoke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotCommand {
    binary: PathBuf,
}

impl Default for DotCommand {
    fn default() -> Self {
        DotCommand {
            binary: PathBuf::from(DOT_BINARY),
        }
    }
}

impl DotCommand {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        DotCommand { binary: binary.into() }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// `dot -V`
    pub fn version_command(&self) -> CommandLine {
        CommandLine::new(&self.binary, ["-V"])
    }

    /// `dot -K<engine> -T<format>`, reading the source from stdin.
    pub fn render_command(&self, engine: Engine, format: &Format) -> CommandLine {
        CommandLine::new(&self.binary, [format!("-K{}", engine), format!("-T{}", format)])
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command_line() {
        let cmd = DotCommand::default().render_command(Engine::Neato, &Format::new("svg").unwrap());
        assert_eq!(cmd.to_string(), "dot -Kneato -Tsvg");
        assert_eq!(DotCommand::new("/opt/graphviz/bin/dot").version_command().to_string(), "/opt/graphviz/bin/dot -V");
        assert_eq!(CommandLine::new("dot", Vec::<String>::new()).to_string(), "dot");
    }

    #[test]
    fn test_combined_output() {
        let output = ProcessOutput {
            stdout: b"out ".to_vec(),
            stderr: b"err".to_vec(),
        };
        assert_eq!(output.combined(), b"out err");
    }

    #[test]
    fn test_missing_executable() {
        let cmd = CommandLine::new("graphviz-rs-no-such-binary", ["-V"]);
        match SystemRunner.run(&cmd, None) {
            Err(GraphvizError::ExecutableNotFound { command }) => assert_eq!(command, cmd),
            other => panic!("expected ExecutableNotFound, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit() {
        let cmd = CommandLine::new("sh", ["-c", "echo broken >&2; exit 3"]);
        match SystemRunner.run(&cmd, None) {
            Err(GraphvizError::ProcessFailed { command, code, output }) => {
                assert_eq!(command, cmd);
                assert_eq!(code, ExitCode(Some(3)));
                assert_eq!(output, "broken\n");
            }
            other => panic!("expected ProcessFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_unread_stdin_keeps_output() {
        let cmd = CommandLine::new("sh", ["-c", "echo ok"]);
        let input = vec![b'x'; 4 * 1024 * 1024];
        let output = SystemRunner.run(&cmd, Some(&input)).expect("unread input is not an error");
        assert_eq!(output.stdout, b"ok\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_stdin_is_forwarded() {
        let cmd = CommandLine::new("cat", Vec::<String>::new());
        let output = SystemRunner.run(&cmd, Some(b"digraph { a -> b }\n")).expect("cat failed");
        assert_eq!(output.stdout, b"digraph { a -> b }\n");
        assert!(output.stderr.is_empty());
    }
}
