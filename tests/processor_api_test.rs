//! Tests for the rad processor API

use rad_syntax::rad::parser::ParseOptions;
use rad_syntax::rad::processor::rad_sources::RadSources;
use rad_syntax::rad::processor::{
    available_formats, process_file, process_source, OutputFormat, ProcessingError,
    ProcessingSpec, ProcessingStage,
};
use std::fs;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_specs() {
        let specs = ProcessingSpec::available_specs();
        assert_eq!(specs.len(), 6);

        let token_stage = specs
            .iter()
            .filter(|s| s.stage == ProcessingStage::Token)
            .count();
        assert_eq!(token_stage, 2);

        assert!(specs
            .iter()
            .any(|s| s.stage == ProcessingStage::Ast && s.format == OutputFormat::Source));
    }

    #[test]
    fn test_every_format_string_round_trips() {
        for format in available_formats() {
            let spec = ProcessingSpec::from_string(&format).unwrap();
            assert_eq!(spec.format_string(), format);
        }
    }

    #[test]
    fn test_process_file_from_disk() {
        let dir = std::env::temp_dir().join("rad_syntax_processor_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("script.rad");
        fs::write(&path, "for x in xs:\n    print(x)\n").unwrap();

        let spec = ProcessingSpec::from_string("ast-treeviz").unwrap();
        let output = process_file(&path, &spec, &ParseOptions::default()).unwrap();
        assert!(output.starts_with("└─ For: x"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_nesting_limit_comes_from_options() {
        let spec = ProcessingSpec::from_string("ast-json").unwrap();
        let options = ParseOptions {
            max_nesting_depth: 2,
            ..ParseOptions::default()
        };
        let err = process_source("x = ((((1))))\n", &spec, &options).unwrap_err();
        match err {
            ProcessingError::Parse(parse_error) => assert!(parse_error.is_syntax()),
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_tab_width_comes_from_options() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        let source = "if a:\n\tx = 1\n        y = 2\n";
        let narrow = ParseOptions {
            tab_width: 4,
            ..ParseOptions::default()
        };
        let wide = ParseOptions {
            tab_width: 8,
            ..ParseOptions::default()
        };
        assert!(process_source(source, &spec, &narrow).is_err());
        assert!(process_source(source, &spec, &wide).is_ok());
    }

    #[test]
    fn test_source_format_is_canonical() {
        let source = RadSources::get_string("030-control-flow.rad").unwrap();
        let spec = ProcessingSpec::from_string("ast-source").unwrap();
        let canonical = process_source(&source, &spec, &ParseOptions::default()).unwrap();

        let again = process_source(&canonical, &spec, &ParseOptions::default()).unwrap();
        assert_eq!(canonical, again);
        assert!(!canonical.contains("//"));
    }

    #[test]
    fn test_samples_list() {
        let samples = RadSources::list_samples();
        assert_eq!(samples.len(), 7);
        for sample in samples {
            let info = RadSources::get_sample_info(sample).unwrap();
            assert!(info.description.is_some(), "{sample} needs a leading comment");
        }
    }
}
