use crate::backend::{DotCommand, ProcessRunner};
use crate::base::{fmt_lines, Copyable, DotSource, LineIterable, Lines, RenderParams};
use crate::error::GraphvizResult;
use crate::parameters::{Engine, Format};
use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use tracing::debug;

/// Verbatim DOT source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    source: String,
    render: RenderParams,
}

/// Everything a [`Source`] is constructed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceParams {
    pub source: String,
    pub render: RenderParams,
}

impl Source {
    pub fn new(source: impl Into<String>) -> Self {
        Source {
            source: source.into(),
            render: RenderParams::default(),
        }
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.render.format = Some(format);
        self
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.render.engine = Some(engine);
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.render.encoding = Some(encoding.into());
        self
    }

    pub fn set_format(&mut self, format: Format) {
        self.render.format = Some(format);
    }

    pub fn set_engine(&mut self, engine: Engine) {
        self.render.engine = Some(engine);
    }

    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.render.encoding = Some(encoding.into());
    }

    pub fn format(&self) -> Format {
        self.render.format()
    }

    pub fn engine(&self) -> Engine {
        self.render.engine()
    }

    pub fn encoding(&self) -> &str {
        self.render.encoding()
    }

    pub fn render_params(&self) -> &RenderParams {
        &self.render
    }

    /// Render through `dot -K<engine> -T<format>` and return what it writes to stdout.
    /// Usage:
    /// ```rust,no_run
    /// use graphviz_rs::{DotCommand, Format, Source, SystemRunner};
    ///
    /// let source = Source::new("digraph { a -> b }").with_format(Format::new("svg").unwrap());
    /// let svg = source.pipe(&SystemRunner, &DotCommand::default()).expect("can not render");
    /// ```
    pub fn pipe<R>(&self, runner: &R, dot: &DotCommand) -> GraphvizResult<Vec<u8>>
    where
        R: ProcessRunner + ?Sized,
    {
        let command = dot.render_command(self.engine(), &self.format());
        debug!("run {}", command);
        let output = runner.run(&command, Some(self.source().as_bytes()))?;
        Ok(output.stdout)
    }
}

impl LineIterable for Source {
    fn lines(&self) -> Lines<'_> {
        Box::new(self.source.split_inclusive('\n').map(|line| {
            if line.ends_with('\n') {
                Cow::Borrowed(line)
            } else {
                Cow::Owned(format!("{}\n", line))
            }
        }))
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fmt_lines(self, f)
    }
}

impl Copyable for Source {
    type Params = SourceParams;

    fn params(&self) -> Self::Params {
        SourceParams {
            source: self.source.clone(),
            render: self.render.clone(),
        }
    }

    fn from_params(params: Self::Params) -> Self {
        Source {
            source: params.source,
            render: params.render,
        }
    }
}
