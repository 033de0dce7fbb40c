//! File processing API for rad scripts
//!
//! A processing spec names a stage (`token` or `ast`) and an output format,
//! written together as a format string such as `token-simple` or
//! `ast-treeviz`. [`process_source`] runs a script through the front end up
//! to that stage and renders the result.
//!
//! # Sample Sources
//!
//! The `rad_sources` module gives tests access to the curated scripts under
//! `samples/`. Tests that exercise several constructs together should read a
//! sample instead of embedding a copy of it.
//!
//! ## Example Usage
//!
//! ```rust
//! use rad_syntax::rad::processor::rad_sources::RadSources;
//!
//! let content = RadSources::get_string("010-expressions.rad").unwrap();
//! let tree = RadSources::get_processed("030-control-flow.rad", "ast-treeviz").unwrap();
//! assert!(tree.contains("While"));
//! # assert!(!content.is_empty());
//! ```

use crate::rad::error::ParseError;
use crate::rad::formats::{FormatError, FormatRegistry};
use crate::rad::lexer::{lexemes_with_options, Lexeme, Token};
use crate::rad::parser::{parse_source_with_options, ParseOptions};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// What the front end runs up to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Treeviz,
    Yaml,
    Source,
}

impl OutputFormat {
    fn name(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Source => "source",
        }
    }
}

/// A stage and an output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-json"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let Some((stage, format)) = format_str.split_once('-') else {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        };

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "treeviz" => OutputFormat::Treeviz,
            "yaml" => OutputFormat::Yaml,
            "source" => OutputFormat::Source,
            _ => return Err(ProcessingError::InvalidFormat(format_str.to_string())),
        };

        let spec = ProcessingSpec { stage, format };
        if !Self::available_specs().contains(&spec) {
            return Err(ProcessingError::InvalidFormatType(format!(
                "{} format does not apply to the {} stage",
                format.name(),
                spec.stage_name()
            )));
        }
        Ok(spec)
    }

    /// Every supported stage/format combination
    pub fn available_specs() -> Vec<ProcessingSpec> {
        let token = |format| ProcessingSpec {
            stage: ProcessingStage::Token,
            format,
        };
        let ast = |format| ProcessingSpec {
            stage: ProcessingStage::Ast,
            format,
        };
        vec![
            token(OutputFormat::Simple),
            token(OutputFormat::Json),
            ast(OutputFormat::Treeviz),
            ast(OutputFormat::Json),
            ast(OutputFormat::Yaml),
            ast(OutputFormat::Source),
        ]
    }

    fn stage_name(&self) -> &'static str {
        match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
        }
    }

    pub fn format_string(&self) -> String {
        format!("{}-{}", self.stage_name(), self.format.name())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessingError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Run a script through the front end and render the requested stage
pub fn process_source(
    content: &str,
    spec: &ProcessingSpec,
    options: &ParseOptions,
) -> Result<String, ProcessingError> {
    debug!(format = %spec.format_string(), bytes = content.len(), "processing source");
    match spec.stage {
        ProcessingStage::Token => {
            let lexemes = lexemes_with_options(content, options)?;
            format_tokens(&lexemes, spec.format)
        }
        ProcessingStage::Ast => {
            let file = parse_source_with_options(content, options)?;
            let registry = FormatRegistry::with_defaults();
            Ok(registry.serialize(&file, spec.format.name())?)
        }
    }
}

/// Read a script from disk and process it
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    options: &ParseOptions,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(ProcessingError::FileNotFound(file_path.display().to_string()));
    }

    let content = fs::read_to_string(file_path)
        .map_err(|e| ProcessingError::Io(format!("Failed to read {}: {e}", file_path.display())))?;
    process_source(&content, spec, options)
}

/// Format tokens according to the specified format
fn format_tokens(lexemes: &[Lexeme], format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            let mut line_start = true;
            for lexeme in lexemes {
                if !line_start {
                    result.push(' ');
                }
                result.push_str(&lexeme.token.to_string());
                line_start = matches!(lexeme.token, Token::Newline);
                if line_start {
                    result.push('\n');
                }
            }
            Ok(result)
        }
        OutputFormat::Json => serde_json::to_string_pretty(lexemes)
            .map_err(|e| ProcessingError::Io(format!("Failed to serialize tokens: {e}"))),
        other => Err(ProcessingError::InvalidFormatType(format!(
            "{} format only works with the ast stage",
            other.name()
        ))),
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::format_string)
        .collect()
}

/// Sample sources module for accessing the curated rad scripts
pub mod rad_sources {
    use super::*;

    /// Available sample files
    pub const AVAILABLE_SAMPLES: &[&str] = &[
        "010-expressions.rad",
        "020-strings.rad",
        "030-control-flow.rad",
        "040-functions.rad",
        "050-switch-defer.rad",
        "060-domain-blocks.rad",
        "070-error-handling.rad",
    ];

    #[derive(Debug, Clone, PartialEq)]
    pub enum SampleFormat {
        /// Raw string content
        String,
        /// Processed content using the specified format string
        Processed(String),
    }

    /// Main interface for accessing rad sample files
    pub struct RadSources;

    impl RadSources {
        fn samples_dir() -> &'static str {
            concat!(env!("CARGO_MANIFEST_DIR"), "/samples")
        }

        fn sample_path(filename: &str) -> String {
            format!("{}/{}", Self::samples_dir(), filename)
        }

        fn validate_sample(filename: &str) -> Result<(), ProcessingError> {
            if !AVAILABLE_SAMPLES.contains(&filename) {
                return Err(ProcessingError::FileNotFound(format!(
                    "Sample '{filename}' is not available. Available samples: {AVAILABLE_SAMPLES:?}"
                )));
            }
            Ok(())
        }

        pub fn get_sample(filename: &str, format: SampleFormat) -> Result<String, ProcessingError> {
            Self::validate_sample(filename)?;
            let path = Self::sample_path(filename);

            match format {
                SampleFormat::String => fs::read_to_string(&path)
                    .map_err(|e| ProcessingError::Io(format!("Failed to read {path}: {e}"))),
                SampleFormat::Processed(format_str) => {
                    let spec = ProcessingSpec::from_string(&format_str)?;
                    process_file(&path, &spec, &ParseOptions::default())
                }
            }
        }

        pub fn get_string(filename: &str) -> Result<String, ProcessingError> {
            Self::get_sample(filename, SampleFormat::String)
        }

        pub fn get_processed(filename: &str, format: &str) -> Result<String, ProcessingError> {
            Self::get_sample(filename, SampleFormat::Processed(format.to_string()))
        }

        pub fn list_samples() -> Vec<&'static str> {
            AVAILABLE_SAMPLES.to_vec()
        }

        pub fn get_sample_info(filename: &str) -> Result<SampleInfo, ProcessingError> {
            let content = Self::get_string(filename)?;

            Ok(SampleInfo {
                filename: filename.to_string(),
                line_count: content.lines().count(),
                char_count: content.chars().count(),
                description: Self::extract_description(&content),
            })
        }

        /// The text of a leading `//` comment line
        fn extract_description(content: &str) -> Option<String> {
            let first_line = content.lines().next()?;
            first_line
                .trim()
                .strip_prefix("//")
                .map(|text| text.trim().to_string())
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct SampleInfo {
        pub filename: String,
        pub line_count: usize,
        pub char_count: usize,
        pub description: Option<String>,
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_spec_parsing() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Token);
        assert_eq!(spec.format, OutputFormat::Simple);

        let spec = ProcessingSpec::from_string("ast-yaml").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Ast);
        assert_eq!(spec.format, OutputFormat::Yaml);

        assert!(matches!(
            ProcessingSpec::from_string("invalid"),
            Err(ProcessingError::InvalidFormat(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("token-invalid"),
            Err(ProcessingError::InvalidFormat(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("invalid-simple"),
            Err(ProcessingError::InvalidStage(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("token-treeviz"),
            Err(ProcessingError::InvalidFormatType(_))
        ));
    }

    #[test]
    fn test_token_simple_output() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        let output = process_source("x = 1\n", &spec, &ParseOptions::default()).unwrap();
        assert_eq!(output, "identifier `x` `=` integer `1` newline\nend of input");
    }

    #[test]
    fn test_token_json_output() {
        let spec = ProcessingSpec::from_string("token-json").unwrap();
        let output = process_source("x\n", &spec, &ParseOptions::default()).unwrap();
        assert!(output.contains("\"Identifier\""));
        assert!(output.contains("\"line\": 1"));
    }

    #[test]
    fn test_parse_errors_propagate() {
        let spec = ProcessingSpec::from_string("ast-treeviz").unwrap();
        let err = process_source("if x\n", &spec, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ProcessingError::Parse(_)));
        assert_eq!(
            err.to_string(),
            "1:5: syntax error in if statement: expected `:`, found newline"
        );
    }

    #[test]
    fn test_missing_file() {
        let spec = ProcessingSpec::from_string("ast-json").unwrap();
        let err = process_file("does/not/exist.rad", &spec, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ProcessingError::FileNotFound(_)));
    }

    #[test]
    fn test_available_formats() {
        assert_eq!(
            available_formats(),
            vec![
                "token-simple",
                "token-json",
                "ast-treeviz",
                "ast-json",
                "ast-yaml",
                "ast-source"
            ]
        );
    }
}
