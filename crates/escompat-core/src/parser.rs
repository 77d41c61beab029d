//! Parser module for JavaScript/TypeScript source code
//!
//! Integrates with SWC for parsing source files into an AST and maps SWC byte
//! positions back to offsets, lines and columns of the original source.

use std::sync::OnceLock;

use swc_common::sync::Lrc;
use swc_common::{BytePos, FileName, SourceMap, Spanned};
use swc_ecma_ast::{ModuleItem, Script};
use swc_ecma_parser::{EsSyntax, Syntax, TsSyntax, parse_file_as_module, parse_file_as_script};

pub use swc_ecma_ast::{EsVersion, Module};

use crate::records::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    TypeScript,
    Jsx,
    Tsx,
}

pub fn detect_language(filename: &str) -> Language {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    match ext.as_str() {
        "ts" | "mts" | "cts" => Language::TypeScript,
        "tsx" => Language::Tsx,
        "jsx" => Language::Jsx,
        _ => Language::JavaScript,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({line}:{column})")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

#[derive(Debug)]
pub struct ParseResult {
    pub module: Option<Module>,
    pub errors: Vec<ParseError>,
    /// SWC position of the first byte of the source.
    pub start_pos: u32,
}

impl ParseResult {
    pub fn is_ok(&self) -> bool {
        self.module.is_some() && self.errors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub filename: String,
    pub language: Language,
    pub line_count: usize,
}

pub struct ParsedFile {
    source: String,
    metadata: FileMetadata,
    ast_module: Option<Module>,
    errors: Vec<ParseError>,
    start_pos: u32,
    line_starts: OnceLock<Vec<usize>>,
}

impl std::fmt::Debug for ParsedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedFile")
            .field("metadata", &self.metadata)
            .field("has_module", &self.ast_module.is_some())
            .field("error_count", &self.errors.len())
            .finish()
    }
}

impl ParsedFile {
    pub fn from_source(filename: &str, source: &str) -> Self {
        let language = detect_language(filename);
        let parser = Parser::for_file(filename);
        let parse_result = parser.parse_module_recovering(source);

        let line_count = if source.is_empty() {
            0
        } else {
            source.lines().count()
        };

        Self {
            source: source.to_string(),
            metadata: FileMetadata {
                filename: filename.to_string(),
                language,
                line_count,
            },
            ast_module: parse_result.module,
            errors: parse_result.errors,
            start_pos: parse_result.start_pos,
            line_starts: OnceLock::new(),
        }
    }

    pub fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    pub fn module(&self) -> Option<&Module> {
        self.ast_module.as_ref()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Converts an SWC position into a byte offset into [`Self::source`].
    pub fn offset_of(&self, pos: BytePos) -> usize {
        let offset = pos.0.saturating_sub(self.start_pos) as usize;
        offset.min(self.source.len())
    }

    /// One-based line and zero-based character column of a byte offset.
    pub fn position_of(&self, offset: usize) -> Position {
        let starts = self.line_starts.get_or_init(|| self.build_line_starts());
        let index = match starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = starts.get(index).copied().unwrap_or(0);
        let column = self
            .source
            .get(line_start..offset.min(self.source.len()))
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset.saturating_sub(line_start));

        Position {
            line: index + 1,
            column,
        }
    }

    fn build_line_starts(&self) -> Vec<usize> {
        let mut starts = vec![0];
        starts.extend(
            self.source
                .char_indices()
                .filter(|(_, c)| *c == '\n')
                .map(|(i, _)| i + 1),
        );
        starts
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParserBuilder {
    jsx: bool,
    typescript: bool,
    decorators: bool,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jsx(mut self, enabled: bool) -> Self {
        self.jsx = enabled;
        self
    }

    pub fn typescript(mut self, enabled: bool) -> Self {
        self.typescript = enabled;
        self
    }

    pub fn decorators(mut self, enabled: bool) -> Self {
        self.decorators = enabled;
        self
    }

    pub fn build(self) -> Parser {
        let syntax = if self.typescript {
            Syntax::Typescript(TsSyntax {
                tsx: self.jsx,
                decorators: self.decorators,
                ..Default::default()
            })
        } else {
            Syntax::Es(EsSyntax {
                jsx: self.jsx,
                decorators: self.decorators,
                ..Default::default()
            })
        };

        Parser { syntax }
    }
}

#[derive(Debug, Clone)]
pub struct Parser {
    syntax: Syntax,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            syntax: Syntax::Es(Default::default()),
        }
    }

    pub fn for_file(filename: &str) -> Self {
        match detect_language(filename) {
            Language::JavaScript => Self::new(),
            Language::TypeScript => Self::builder().typescript(true).decorators(true).build(),
            Language::Jsx => Self::builder().jsx(true).build(),
            Language::Tsx => Self::builder()
                .typescript(true)
                .jsx(true)
                .decorators(true)
                .build(),
        }
    }

    pub fn builder() -> ParserBuilder {
        ParserBuilder::new()
    }

    /// Parses `code` as a module, falling back to a sloppy-mode script when
    /// the module goal reports diagnostics. The module diagnostics are kept
    /// when both goals fail.
    pub fn parse_module_recovering(&self, code: &str) -> ParseResult {
        let source_map: Lrc<SourceMap> = Default::default();
        let fm = source_map
            .new_source_file(FileName::Custom("input.js".into()).into(), code.to_string());
        let start_pos = fm.start_pos.0;

        let to_parse_error = |e: &swc_ecma_parser::error::Error| {
            let loc = source_map.lookup_char_pos(e.span().lo);
            ParseError {
                line: loc.line,
                column: loc.col_display,
                message: e.kind().msg().to_string(),
            }
        };

        let mut recovered = Vec::new();
        let result = parse_file_as_module(
            &fm,
            self.syntax,
            EsVersion::latest(),
            None,
            &mut recovered,
        );
        let mut errors: Vec<ParseError> = recovered.iter().map(to_parse_error).collect();
        let module = match result {
            Ok(module) => Some(module),
            Err(e) => {
                errors.push(to_parse_error(&e));
                None
            }
        };

        if errors.is_empty() {
            return ParseResult {
                module,
                errors,
                start_pos,
            };
        }

        let mut script_recovered = Vec::new();
        let script = parse_file_as_script(
            &fm,
            self.syntax,
            EsVersion::latest(),
            None,
            &mut script_recovered,
        );
        match script {
            Ok(script) if script_recovered.is_empty() => {
                tracing::trace!("module parse failed, parsed as script");
                ParseResult {
                    module: Some(script_as_module(script)),
                    errors: Vec::new(),
                    start_pos,
                }
            }
            _ => ParseResult {
                module,
                errors,
                start_pos,
            },
        }
    }
}

fn script_as_module(script: Script) -> Module {
    Module {
        span: script.span,
        body: script.body.into_iter().map(ModuleItem::Stmt).collect(),
        shebang: script.shebang,
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
