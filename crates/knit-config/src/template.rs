//! Output filename templates such as `[name].[contenthash:8].js`.
//!
//! A template is literal text mixed with bracketed placeholders. Parsing is
//! strict: an unknown placeholder is an error rather than literal text, so a
//! typo like `[contentHash]` is caught when the configuration is loaded instead
//! of producing oddly named files at build time. A placeholder can be written
//! literally by escaping it as `[\name\]`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest hash prefix a placeholder may request.
pub const MAX_HASH_LENGTH: usize = 64;

/// Placeholders understood in filename templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// Bundle name (entry name, chunk name, or asset file stem)
    Name,
    /// Chunk or module id
    Id,
    /// Hash of the emitted content
    ContentHash,
    /// Hash of the chunk
    ChunkHash,
    /// Hash of the whole compilation
    FullHash,
    /// Compilation hash for chunks, content hash for assets
    Hash,
    /// Extension of the source file, with leading dot
    Ext,
    /// Query string of the source request, with leading `?`
    Query,
    /// Full source file path without query
    File,
    /// Directory of the source file, with trailing slash
    Path,
    /// File name with extension
    Base,
}

impl Placeholder {
    pub const ALL: [Placeholder; 11] = [
        Placeholder::Name,
        Placeholder::Id,
        Placeholder::ContentHash,
        Placeholder::ChunkHash,
        Placeholder::FullHash,
        Placeholder::Hash,
        Placeholder::Ext,
        Placeholder::Query,
        Placeholder::File,
        Placeholder::Path,
        Placeholder::Base,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Placeholder::Name => "name",
            Placeholder::Id => "id",
            Placeholder::ContentHash => "contenthash",
            Placeholder::ChunkHash => "chunkhash",
            Placeholder::FullHash => "fullhash",
            Placeholder::Hash => "hash",
            Placeholder::Ext => "ext",
            Placeholder::Query => "query",
            Placeholder::File => "file",
            Placeholder::Path => "path",
            Placeholder::Base => "base",
        }
    }

    /// Whether the placeholder accepts a `:length` suffix.
    pub fn is_hash(self) -> bool {
        matches!(
            self,
            Placeholder::ContentHash | Placeholder::ChunkHash | Placeholder::FullHash | Placeholder::Hash
        )
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder {
        kind: Placeholder,
        length: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template is empty")]
    Empty,

    #[error("template must be relative to the output directory")]
    Absolute,

    #[error("template must not leave the output directory ('..' segment)")]
    EscapesOutput,

    #[error("unknown placeholder [{0}]")]
    UnknownPlaceholder(String),

    #[error("unclosed '[' at offset {0}")]
    Unclosed(usize),

    #[error("unexpected ']' at offset {0}")]
    Unopened(usize),

    #[error("placeholder [{0}] does not take a length")]
    LengthNotAllowed(String),

    #[error("invalid hash length '{0}'")]
    InvalidLength(String),

    #[error("hash length {0} is out of range (1 to {MAX_HASH_LENGTH})")]
    LengthOutOfRange(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("no value available for placeholder {0}")]
    MissingValue(Placeholder),
}

/// A parsed filename template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FilenameTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl FilenameTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        if source.trim().is_empty() {
            return Err(TemplateError::Empty);
        }
        if source.starts_with('/') || source.starts_with('\\') || Path::new(source).is_absolute() {
            return Err(TemplateError::Absolute);
        }
        if source.split(['/', '\\']).any(|part| part == "..") {
            return Err(TemplateError::EscapesOutput);
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(pos) = rest.find(['[', ']']) {
            literal.push_str(&rest[..pos]);
            let at = offset + pos;

            if rest[pos..].starts_with(']') {
                return Err(TemplateError::Unopened(at));
            }

            // `[\name\]` is the literal text `[name]`
            if rest[pos..].starts_with("[\\") {
                // the closing `\]` cannot share the backslash that opened the escape
                let close = rest[pos + 2..]
                    .find("\\]")
                    .map(|i| i + 2)
                    .ok_or(TemplateError::Unclosed(at))?;
                literal.push('[');
                literal.push_str(&rest[pos + 2..pos + close]);
                literal.push(']');
                let consumed = pos + close + 2;
                rest = &rest[consumed..];
                offset += consumed;
                continue;
            }

            let close = rest[pos + 1..]
                .find(['[', ']'])
                .filter(|&i| rest[pos + 1 + i..].starts_with(']'))
                .ok_or(TemplateError::Unclosed(at))?;
            let inner = &rest[pos + 1..pos + 1 + close];

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(parse_placeholder(inner)?);

            let consumed = pos + close + 2;
            rest = &rest[consumed..];
            offset += consumed;
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder { kind, .. } => Some(*kind),
            Segment::Literal(_) => None,
        })
    }

    pub fn contains(&self, placeholder: Placeholder) -> bool {
        self.placeholders().any(|p| p == placeholder)
    }

    /// Whether two different chunks can never render to the same name.
    pub fn is_unique_per_chunk(&self) -> bool {
        self.placeholders().any(|p| {
            matches!(
                p,
                Placeholder::Name | Placeholder::Id | Placeholder::ContentHash | Placeholder::ChunkHash
            )
        })
    }

    /// Whether two different assets can never render to the same name.
    pub fn is_unique_per_asset(&self) -> bool {
        self.placeholders().any(|p| {
            matches!(
                p,
                Placeholder::Name
                    | Placeholder::Hash
                    | Placeholder::ContentHash
                    | Placeholder::File
                    | Placeholder::Base
            )
        })
    }

    /// Whether the rendered name changes when the content changes.
    pub fn is_content_addressed(&self) -> bool {
        self.placeholders()
            .any(|p| matches!(p, Placeholder::ContentHash | Placeholder::ChunkHash))
    }

    pub fn render(&self, data: &PathData) -> Result<String, RenderError> {
        let mut out = String::with_capacity(self.source.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { kind, length } => {
                    let value = data.value(*kind).ok_or(RenderError::MissingValue(*kind))?;
                    match length {
                        Some(len) if kind.is_hash() => {
                            out.extend(value.chars().take(*len));
                        }
                        _ => out.push_str(&value),
                    }
                }
            }
        }
        Ok(out)
    }
}

fn parse_placeholder(inner: &str) -> Result<Segment, TemplateError> {
    let (name, length) = match inner.split_once(':') {
        Some((name, length)) => (name, Some(length)),
        None => (inner, None),
    };

    let kind = Placeholder::from_name(name)
        .ok_or_else(|| TemplateError::UnknownPlaceholder(inner.to_string()))?;

    let length = match length {
        None => None,
        Some(_) if !kind.is_hash() => {
            return Err(TemplateError::LengthNotAllowed(name.to_string()));
        }
        Some(raw) => {
            let len: usize = raw
                .parse()
                .map_err(|_| TemplateError::InvalidLength(raw.to_string()))?;
            if len == 0 || len > MAX_HASH_LENGTH {
                return Err(TemplateError::LengthOutOfRange(len));
            }
            Some(len)
        }
    };

    Ok(Segment::Placeholder { kind, length })
}

impl FromStr for FilenameTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FilenameTemplate {
    type Error = TemplateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FilenameTemplate> for String {
    fn from(value: FilenameTemplate) -> Self {
        value.source
    }
}

impl fmt::Display for FilenameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Values substituted into a template when the build engine names a file.
#[derive(Debug, Clone, Default)]
pub struct PathData {
    pub name: Option<String>,
    pub id: Option<String>,
    pub content_hash: Option<String>,
    pub chunk_hash: Option<String>,
    pub full_hash: Option<String>,
    /// Source request of an asset, e.g. `src/logo.png?v=2`
    pub file: Option<String>,
}

impl PathData {
    pub fn chunk(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn asset(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            ..Self::default()
        }
    }

    pub fn with_content_hash(mut self, hash: impl Into<String>) -> Self {
        self.content_hash = Some(hash.into());
        self
    }

    pub fn with_chunk_hash(mut self, hash: impl Into<String>) -> Self {
        self.chunk_hash = Some(hash.into());
        self
    }

    pub fn with_full_hash(mut self, hash: impl Into<String>) -> Self {
        self.full_hash = Some(hash.into());
        self
    }

    fn value(&self, placeholder: Placeholder) -> Option<String> {
        let file = self.file.as_deref().map(FileParts::split);
        match placeholder {
            Placeholder::Name => self
                .name
                .clone()
                .or_else(|| file.map(|f| f.stem.to_string())),
            Placeholder::Id => self.id.clone(),
            Placeholder::ContentHash => self.content_hash.clone(),
            Placeholder::ChunkHash => self.chunk_hash.clone(),
            Placeholder::FullHash => self.full_hash.clone(),
            Placeholder::Hash => self
                .full_hash
                .clone()
                .or_else(|| self.content_hash.clone()),
            Placeholder::Ext => file.map(|f| f.ext.to_string()),
            Placeholder::Query => file.map(|f| f.query.to_string()),
            Placeholder::File => file.map(|f| f.path.to_string()),
            Placeholder::Path => file.map(|f| f.dir.to_string()),
            Placeholder::Base => file.map(|f| f.base.to_string()),
        }
    }
}

struct FileParts<'a> {
    path: &'a str,
    dir: &'a str,
    base: &'a str,
    stem: &'a str,
    ext: &'a str,
    query: &'a str,
}

impl<'a> FileParts<'a> {
    fn split(file: &'a str) -> Self {
        let (path, query) = match file.find('?') {
            Some(i) => file.split_at(i),
            None => (file, ""),
        };
        let (dir, base) = match path.rfind('/') {
            Some(i) => path.split_at(i + 1),
            None => ("", path),
        };
        let (stem, ext) = match base.rfind('.') {
            Some(i) if i > 0 => base.split_at(i),
            _ => (base, ""),
        };
        Self {
            path,
            dir,
            base,
            stem,
            ext,
            query,
        }
    }
}
