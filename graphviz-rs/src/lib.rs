//! Hold DOT sources and drive the "dot" binary from the ["graphviz"](https://graphviz.org/download/) toolset.
//!
//! Layout and rendering are left entirely to Graphviz, this crate only talks to the installed executables:
//! it asks them for their version and pipes DOT sources through them.

mod backend;
mod base;
mod error;
mod parameters;
mod source;
mod version;

pub use backend::{CommandLine, DotCommand, ExitCode, ProcessOutput, ProcessRunner, SystemRunner, DOT_BINARY};
pub use base::{fmt_lines, Copyable, DotSource, LineIterable, Lines, RenderParams};
pub use error::{GraphvizError, GraphvizResult};
pub use parameters::{Engine, Format, DEFAULT_ENCODING, DEFAULT_FORMAT, FORMATS};
pub use source::{Source, SourceParams};
pub use version::{get_installed_version, parse_version, parse_version_output, version, Version};
