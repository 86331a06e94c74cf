//! Capabilities of everything that is a DOT source.

use crate::parameters::{Engine, Format, DEFAULT_ENCODING};
use std::borrow::Cow;
use std::fmt::Formatter;

pub type Lines<'a> = Box<dyn Iterator<Item = Cow<'a, str>> + 'a>;

/// Yields the DOT source line by line, every line ending with `'\n'`.
///
/// Each call to [`LineIterable::lines`] starts a new iteration from the first line.
pub trait LineIterable {
    fn lines(&self) -> Lines<'_>;
}

/// The DOT source as a single string.
pub trait DotSource: LineIterable {
    fn source(&self) -> String {
        self.lines().collect()
    }
}

impl<T: LineIterable + ?Sized> DotSource for T {}

/// Writes all lines of `doc`, for use in `Display` implementations.
pub fn fmt_lines<T: LineIterable + ?Sized>(doc: &T, f: &mut Formatter<'_>) -> std::fmt::Result {
    doc.lines().try_for_each(|line| f.write_str(&line))
}

/// Construction from an explicit set of parameters.
///
/// `copy` builds a new value from `params` alone, state that is not part of
/// [`Copyable::Params`] starts out fresh in the copy.
pub trait Copyable: Sized {
    type Params;

    fn params(&self) -> Self::Params;
    fn from_params(params: Self::Params) -> Self;

    fn copy(&self) -> Self {
        Self::from_params(self.params())
    }
}

/// The rendering parameters shared by all sources. Unset values fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderParams {
    pub format: Option<Format>,
    pub engine: Option<Engine>,
    pub encoding: Option<String>,
}

impl RenderParams {
    pub fn format(&self) -> Format {
        self.format.clone().unwrap_or_default()
    }

    pub fn engine(&self) -> Engine {
        self.engine.unwrap_or_default()
    }

    pub fn encoding(&self) -> &str {
        self.encoding.as_deref().unwrap_or(DEFAULT_ENCODING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fmt::Display;

    /// Numbered statements, counting how often they were listed.
    struct Statements {
        count: usize,
        render: RenderParams,
        listed: Cell<usize>,
    }

    impl LineIterable for Statements {
        fn lines(&self) -> Lines<'_> {
            self.listed.set(self.listed.get() + 1);
            Box::new((0..self.count).map(|i| Cow::Owned(format!("  n{} -> n{}\n", i, i + 1))))
        }
    }

    impl Display for Statements {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            fmt_lines(self, f)
        }
    }

    impl Copyable for Statements {
        type Params = (usize, RenderParams);

        fn params(&self) -> Self::Params {
            (self.count, self.render.clone())
        }

        fn from_params((count, render): Self::Params) -> Self {
            Statements {
                count,
                render,
                listed: Cell::new(0),
            }
        }
    }

    fn statements(render: RenderParams) -> Statements {
        Statements::from_params((3, render))
    }

    #[test]
    fn test_source_joins_lines() {
        let doc = statements(RenderParams::default());
        let lines: Vec<_> = doc.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| line.ends_with('\n')));
        assert_eq!(doc.source(), "  n0 -> n1\n  n1 -> n2\n  n2 -> n3\n");
        assert_eq!(doc.to_string(), doc.source());
    }

    #[test]
    fn test_lines_restart() {
        let doc = statements(RenderParams::default());
        assert_eq!(doc.lines().count(), 3);
        assert_eq!(doc.lines().count(), 3);
    }

    #[test]
    fn test_copy_keeps_declared_params() {
        let original = statements(RenderParams {
            format: Some(Format::new("svg").unwrap()),
            engine: Some(Engine::Neato),
            encoding: None,
        });
        assert!(!original.source().is_empty());

        let mut copy = original.copy();
        // undeclared state is not propagated
        assert_eq!(original.listed.get(), 1);
        assert_eq!(copy.listed.get(), 0);
        assert_eq!(copy.render, original.render);
        assert_eq!(copy.render.encoding, None);
        assert_eq!(copy.to_string(), original.to_string());

        copy.render.engine = Some(Engine::Circo);
        copy.render.encoding = Some("latin1".to_string());
        assert_eq!(original.render.engine, Some(Engine::Neato));
        assert_eq!(original.render.encoding, None);
    }

    #[test]
    fn test_render_defaults() {
        let render = RenderParams::default();
        assert_eq!(render.format().as_str(), "pdf");
        assert_eq!(render.engine(), Engine::Dot);
        assert_eq!(render.encoding(), "utf-8");
    }
}
