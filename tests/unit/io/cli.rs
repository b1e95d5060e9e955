//! Tests for command-line parsing and settings resolution

#[cfg(test)]
mod tests {
    use clap::Parser;
    use sitescout::PipelineError;
    use sitescout::io::cli::{Cli, PipelineRunner};
    use sitescout::io::configuration::{
        DEFAULT_ENDPOINT, DEFAULT_FIGURE_PATH, DEFAULT_INPUT_PATH, DEFAULT_MODEL,
        DEFAULT_RASTER_PATH, DEFAULT_RASTER_URL, DEFAULT_REPORT_PATH, Settings,
    };
    use std::path::PathBuf;
    use std::time::Duration;

    // Tests every path and endpoint falls back to its default
    // Verified by changing a default_value attribute
    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["sitescout", "--api-key", "k"]);

        assert_eq!(cli.input, PathBuf::from(DEFAULT_INPUT_PATH));
        assert_eq!(cli.report, PathBuf::from(DEFAULT_REPORT_PATH));
        assert_eq!(cli.raster, PathBuf::from(DEFAULT_RASTER_PATH));
        assert_eq!(cli.figure, PathBuf::from(DEFAULT_FIGURE_PATH));
        assert_eq!(cli.raster_url, DEFAULT_RASTER_URL);
        assert_eq!(cli.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cli.model, DEFAULT_MODEL);
        assert_eq!(cli.timeout_secs, None);
        assert!(!cli.quiet);
    }

    // Tests overrides reach the resolved settings
    // Verified by dropping the timeout conversion
    #[test]
    fn test_settings_from_cli_overrides() {
        let cli = Cli::parse_from([
            "sitescout",
            "--input",
            "notes/diary.txt",
            "--figure",
            "out/nir.png",
            "--model",
            "gpt-4.1",
            "--api-key",
            "secret",
            "-t",
            "30",
            "-q",
        ]);

        let settings = Settings::from_cli(&cli).unwrap();
        assert_eq!(settings.input_path, PathBuf::from("notes/diary.txt"));
        assert_eq!(settings.figure_path, PathBuf::from("out/nir.png"));
        assert_eq!(settings.model, "gpt-4.1");
        assert_eq!(settings.api_key, "secret");
        assert_eq!(settings.timeout, Some(Duration::from_secs(30)));
        assert!(settings.quiet);
    }

    // Tests a missing credential refuses to start instead of using a fallback key
    // Verified by substituting a literal key when none is given
    #[test]
    fn test_missing_credential_is_hard_failure() {
        let mut cli = Cli::parse_from(["sitescout"]);
        cli.api_key = None;

        let result = Settings::from_cli(&cli);
        assert!(matches!(
            result,
            Err(PipelineError::MissingCredential { variable: "OPENAI_API_KEY" })
        ));

        cli.api_key = Some("   ".to_string());
        assert!(matches!(
            PipelineRunner::new(&cli),
            Err(PipelineError::MissingCredential { .. })
        ));
    }

    // Tests validation rejects an empty model name
    // Verified by removing the model check
    #[test]
    fn test_empty_model_rejected() {
        let cli = Cli::parse_from(["sitescout", "--api-key", "k", "--model", ""]);

        let result = Settings::from_cli(&cli);
        assert!(matches!(
            result,
            Err(PipelineError::InvalidParameter { parameter: "model", .. })
        ));
    }

    // Tests the runner exposes the resolved settings
    // Verified by constructing settings with defaults instead of the CLI
    #[test]
    fn test_pipeline_runner_new() {
        let cli = Cli::parse_from(["sitescout", "--api-key", "k", "--raster", "x.tif"]);
        let runner = PipelineRunner::new(&cli).unwrap();

        assert_eq!(runner.settings().raster_path, PathBuf::from("x.tif"));
    }
}
