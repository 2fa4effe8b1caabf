use traineval_cli::config::{CURRENT_VERSION, ReportConfig, load_config, parse_config};
use traineval_cli::error::ConfigError;
use traineval_export::encoding::EncodingPolicy;

#[test]
fn empty_object_gives_defaults() {
    let config = parse_config("{}").unwrap();
    assert_eq!(config, ReportConfig::default());
    assert_eq!(config.sheet_name, "Summary");
    assert_eq!(config.page_capacity.get(), 16);
    assert_eq!(config.aggregation.skip_leading_rows, 1);
    assert_eq!(config.questions.ratings.len(), 6);
    assert_eq!(config.questions.open_text.len(), 2);
}

#[test]
fn partial_sections_keep_their_other_defaults() {
    let config = parse_config(
        r#"{
            "page_capacity": 10,
            "encoding": "strict",
            "aggregation": { "skip_leading_rows": 0 },
            "chart": { "width_px": 1000 },
            "styles": { "body_size": 10.0 }
        }"#,
    )
    .unwrap();

    assert_eq!(config.page_capacity.get(), 10);
    assert_eq!(config.encoding, EncodingPolicy::Strict);
    assert_eq!(config.aggregation.skip_leading_rows, 0);
    assert_eq!(config.chart.width_px, 1000);
    assert_eq!(config.chart.height_px, 400);
    assert_eq!(config.styles.body_size, 10.0);
    assert_eq!(config.styles.body_line_mm, 8.0);
}

#[test]
fn zero_page_capacity_is_rejected() {
    let result = parse_config(r#"{ "page_capacity": 0 }"#);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn newer_config_version_is_rejected() {
    let json = format!(r#"{{ "config_version": {} }}"#, CURRENT_VERSION + 1);
    match parse_config(&json) {
        Err(ConfigError::UnsupportedVersion { found, supported }) => {
            assert_eq!(found, u64::from(CURRENT_VERSION) + 1);
            assert_eq!(supported, CURRENT_VERSION);
        }
        other => panic!("expected version error, got {other:?}"),
    }
}

#[test]
fn load_config_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(&path, r#"{ "title": "Avaliação da formação" }"#).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.title, "Avaliação da formação");
}

#[test]
fn missing_config_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_config(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}
