use super::*;

#[test]
fn parses_search_command() {
    let cli = Cli::try_parse_from([
        "wayfind", "search", "--query", "brewery", "--lat", "12.97", "--lon", "77.59",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Search {
            query,
            lat,
            lon,
            json,
        } => {
            assert_eq!(query, "brewery");
            assert!((lat - 12.97).abs() < f64::EPSILON);
            assert!((lon - 77.59).abs() < f64::EPSILON);
            assert!(!json);
        }
        other => panic!("expected Search, got {other:?}"),
    }
}

#[test]
fn search_accepts_negative_coordinates_and_json_flag() {
    let cli = Cli::try_parse_from([
        "wayfind", "search", "--query", "gym", "--lat", "-33.86", "--lon", "-151.2", "--json",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Search { lat, json: true, .. } if lat < 0.0
    ));
}

#[test]
fn search_requires_query() {
    let result = Cli::try_parse_from(["wayfind", "search", "--lat", "1", "--lon", "2"]);
    assert!(result.is_err());
}

#[test]
fn parses_locate_command() {
    let cli = Cli::try_parse_from(["wayfind", "locate", "--lat", "12.97", "--lon", "77.59"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Locate { .. }));
}

#[test]
fn parses_parse_command_from_stdin() {
    let cli = Cli::try_parse_from(["wayfind", "parse", "-"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Parse { ref input } if input == &PathBuf::from("-")
    ));
}

#[test]
fn parses_export_command_with_all_options() {
    let cli = Cli::try_parse_from([
        "wayfind",
        "export",
        "plan.md",
        "--format",
        "ics",
        "--date",
        "2026-03-14",
        "--output",
        "plan.ics",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Export {
            input,
            format,
            date,
            output,
        } => {
            assert_eq!(input, PathBuf::from("plan.md"));
            assert_eq!(format, ExportFormat::Ics);
            assert_eq!(date, NaiveDate::from_ymd_opt(2026, 3, 14));
            assert_eq!(output, Some(PathBuf::from("plan.ics")));
        }
        other => panic!("expected Export, got {other:?}"),
    }
}

#[test]
fn export_defaults_date_and_output_to_none() {
    let cli = Cli::try_parse_from(["wayfind", "export", "plan.md", "--format", "text"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Export {
            format: ExportFormat::Text,
            date: None,
            output: None,
            ..
        }
    ));
}

#[test]
fn export_rejects_unknown_format() {
    let result = Cli::try_parse_from(["wayfind", "export", "plan.md", "--format", "pdf"]);
    assert!(result.is_err());
}

#[test]
fn export_rejects_malformed_date() {
    let result = Cli::try_parse_from([
        "wayfind", "export", "plan.md", "--format", "ics", "--date", "14/03/2026",
    ]);
    assert!(result.is_err());
}

fn app_config(env: Environment) -> AppConfig {
    AppConfig {
        env,
        log_level: "warn,wayfind_places=debug".to_owned(),
        places_api_key: None,
        places_base_url: "http://localhost".to_owned(),
        places_request_timeout_secs: 5,
        places_user_agent: "ua".to_owned(),
        places_max_retries: 0,
        places_retry_backoff_base_ms: 1,
        dense_radius_km: 7.0,
        sparse_radius_km: 30.0,
        similarity_threshold: 0.8,
        detail_concurrency: 1,
    }
}

#[test]
fn log_settings_fall_back_without_config() {
    assert_eq!(log_settings(None), ("info", true));
}

#[test]
fn log_settings_follow_config_level_and_environment() {
    let development = app_config(Environment::Development);
    assert_eq!(
        log_settings(Some(&development)),
        ("warn,wayfind_places=debug", true)
    );

    let production = app_config(Environment::Production);
    assert_eq!(
        log_settings(Some(&production)),
        ("warn,wayfind_places=debug", false)
    );
}
