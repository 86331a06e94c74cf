use crate::error::GraphvizError;
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Output formats known to `dot -T`.
pub const FORMATS: &[&str] = &[
    "bmp", "canon", "dot", "gv", "xdot", "xdot1.2", "xdot1.4", "cgimage", "cmap", "eps", "exr", "fig", "gd", "gd2",
    "gif", "gtk", "ico", "imap", "cmapx", "imap_np", "cmapx_np", "ismap", "jp2", "jpg", "jpeg", "jpe", "json", "json0",
    "dot_json", "xdot_json", "pct", "pict", "pdf", "pic", "plain", "plain-ext", "png", "pov", "ps", "ps2", "psd",
    "sgi", "svg", "svgz", "tga", "tif", "tiff", "tk", "vml", "vmlz", "vrml", "wbmp", "webp", "xlib", "x11",
];

pub const DEFAULT_FORMAT: &str = "pdf";

pub const DEFAULT_ENCODING: &str = "utf-8";

/// Layout engine, passed to the renderer as `-K<engine>`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Engine {
    Dot,
    Neato,
    Twopi,
    Circo,
    Fdp,
    Osage,
    Patchwork,
    Sfdp,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::Dot
    }
}

impl Display for Engine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Engine::Dot => f.write_str("dot"),
            Engine::Neato => f.write_str("neato"),
            Engine::Twopi => f.write_str("twopi"),
            Engine::Circo => f.write_str("circo"),
            Engine::Fdp => f.write_str("fdp"),
            Engine::Osage => f.write_str("osage"),
            Engine::Patchwork => f.write_str("patchwork"),
            Engine::Sfdp => f.write_str("sfdp"),
        }
    }
}

impl TryFrom<&str> for Engine {
    type Error = GraphvizError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "dot" => Ok(Engine::Dot),
            "neato" => Ok(Engine::Neato),
            "twopi" => Ok(Engine::Twopi),
            "circo" => Ok(Engine::Circo),
            "fdp" => Ok(Engine::Fdp),
            "osage" => Ok(Engine::Osage),
            "patchwork" => Ok(Engine::Patchwork),
            "sfdp" => Ok(Engine::Sfdp),
            _ => Err(GraphvizError::UnknownEngine(value.to_string())),
        }
    }
}

impl FromStr for Engine {
    type Err = GraphvizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Engine::try_from(s)
    }
}

/// Output format, passed to the renderer as `-T<format>`. Always one of [`FORMATS`].
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Format(String);

impl Format {
    pub fn new(format: &str) -> Result<Self, GraphvizError> {
        Format::try_from(format)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Format {
    fn default() -> Self {
        Format(DEFAULT_FORMAT.to_string())
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Format {
    type Error = GraphvizError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_ascii_lowercase();
        if FORMATS.contains(&lower.as_str()) {
            Ok(Format(lower))
        } else {
            Err(GraphvizError::UnknownFormat(value.to_string()))
        }
    }
}

impl FromStr for Format {
    type Err = GraphvizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::try_from(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_names() {
        assert_eq!("neato".parse::<Engine>().unwrap(), Engine::Neato);
        assert_eq!(Engine::try_from("SFDP").unwrap(), Engine::Sfdp);
        assert_eq!(Engine::Patchwork.to_string(), "patchwork");
        assert_eq!(Engine::default(), Engine::Dot);
        assert!(matches!(
            "spring".parse::<Engine>(),
            Err(GraphvizError::UnknownEngine(name)) if name == "spring"
        ));
    }

    #[test]
    fn test_format_names() {
        assert_eq!(Format::new("SVG").unwrap().as_str(), "svg");
        assert_eq!(Format::new("plain-ext").unwrap().to_string(), "plain-ext");
        assert_eq!(Format::default().as_str(), DEFAULT_FORMAT);
        let err = Format::new("docx").unwrap_err();
        assert_eq!(err.to_string(), r#"unknown format: "docx""#);
    }
}
