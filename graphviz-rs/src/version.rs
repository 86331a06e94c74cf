//! Version number of the installed Graphviz, as reported by `dot -V`.

use crate::backend::{CommandLine, DotCommand, ProcessRunner, SystemRunner};
use crate::error::{GraphvizError, GraphvizResult};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{Display, Formatter};
use tracing::debug;

lazy_static! {
    // graphviz version <major>.<minor>[.<patch>[~dev.<YYYYmmdd>.<HHMM> | .<build>]]
    static ref VERSION_PATTERN: Regex = Regex::new(
        r"(?x)
        graphviz\x20version
        \x20+
        ([0-9]+)\.([0-9]+)
        (?:\.([0-9]+)
            (?:
                ~dev\.[0-9]{8}\.[0-9]{4}
                |
                \.([0-9]+)
            )?
        )?
        \x20
        "
    )
    .unwrap();
}

/// Two, three or four component version number.
///
/// Orders like a tuple of its components, so `2.40 < 2.40.0 < 2.40.0.1 < 2.41`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: Option<u64>,
    build: Option<u64>,
}

impl Version {
    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    pub fn build(&self) -> Option<u64> {
        self.build
    }

    /// Returns `None` unless there are 2, 3 or 4 components.
    pub fn from_components(components: &[u64]) -> Option<Self> {
        match *components {
            [major, minor] => Some(Version {
                major,
                minor,
                patch: None,
                build: None,
            }),
            [major, minor, patch] => Some(Version {
                major,
                minor,
                patch: Some(patch),
                build: None,
            }),
            [major, minor, patch, build] => Some(Version {
                major,
                minor,
                patch: Some(patch),
                build: Some(build),
            }),
            _ => None,
        }
    }

    pub fn components(&self) -> Vec<u64> {
        [Some(self.major), Some(self.minor), self.patch, self.build]
            .iter()
            .map_while(|c| *c)
            .collect()
    }
}

impl From<(u64, u64)> for Version {
    fn from((major, minor): (u64, u64)) -> Self {
        Version {
            major,
            minor,
            patch: None,
            build: None,
        }
    }
}

impl From<(u64, u64, u64)> for Version {
    fn from((major, minor, patch): (u64, u64, u64)) -> Self {
        Version {
            major,
            minor,
            patch: Some(patch),
            build: None,
        }
    }
}

impl From<(u64, u64, u64, u64)> for Version {
    fn from((major, minor, patch, build): (u64, u64, u64, u64)) -> Self {
        Version {
            major,
            minor,
            patch: Some(patch),
            build: Some(build),
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.components().iter().join("."))
    }
}

/// Parse the output of `dot -V`.
///
/// Errors are attributed to the default `dot -V` command line, use [`parse_version_output`]
/// when the output came from another binary.
/// ```rust
/// use graphviz_rs::{parse_version, Version};
///
/// let version = parse_version("dot - graphviz version 2.44.1 (20200629.0846)\n").unwrap();
/// assert_eq!(version, Version::from((2, 44, 1)));
/// ```
pub fn parse_version(raw_output: &str) -> GraphvizResult<Version> {
    parse_version_output(&DotCommand::default().version_command(), raw_output)
}

/// Parse the output of `command`, which is expected to be a `dot -V` invocation.
///
/// The `~dev.<YYYYmmdd>.<HHMM>` suffix of development builds is ignored. Only the first
/// `graphviz version` match is considered: if one of its components does not fit in a `u64`
/// this fails with [`GraphvizError::VersionParse`], even when a later match would parse.
pub fn parse_version_output(command: &CommandLine, raw_output: &str) -> GraphvizResult<Version> {
    let parse_error = || GraphvizError::VersionParse {
        command: command.clone(),
        output: raw_output.to_string(),
    };

    let caps = VERSION_PATTERN.captures(raw_output).ok_or_else(parse_error)?;
    let components: Vec<u64> = caps
        .iter()
        .skip(1)
        .map_while(|group| group)
        .map(|group| group.as_str().parse::<u64>().map_err(|_| parse_error()))
        .try_collect()?;

    Version::from_components(&components).ok_or_else(parse_error)
}

/// Run `dot -V` through `runner` and parse what it prints.
pub fn get_installed_version<R>(runner: &R, dot: &DotCommand) -> GraphvizResult<Version>
where
    R: ProcessRunner + ?Sized,
{
    let command = dot.version_command();
    debug!("run {}", command);
    let output = runner.run(&command, None)?.combined();

    if !output.is_ascii() {
        return Err(GraphvizError::Decode { command });
    }
    let text = String::from_utf8(output).map_err(|_| GraphvizError::Decode {
        command: command.clone(),
    })?;

    parse_version_output(&command, &text)
}

/// Version of the `dot` binary found on the `PATH`.
/// ```rust,no_run
/// let version = graphviz_rs::version().expect("Graphviz is not installed");
/// println!("{}", version);
/// ```
pub fn version() -> GraphvizResult<Version> {
    get_installed_version(&SystemRunner, &DotCommand::default())
}
