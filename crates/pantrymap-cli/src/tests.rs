use std::path::PathBuf;

use pantrymap_core::{AppConfig, Coordinate, Environment, PantryStatus, SortKey, StatusFilter};

use super::*;
use crate::admin::{confirm, run_delete, DELETE_PROMPT, SOCIAL_LINKS};
use crate::view::run_pipeline;

fn offline_config() -> AppConfig {
    AppConfig {
        base_url: None,
        env: Environment::Test,
        log_level: "info".to_string(),
        request_timeout_secs: 5,
        user_agent: "pantrymap-test/0.1".to_string(),
        geolocation_timeout_ms: 100,
        views_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/views.yaml"),
        view: "default".to_string(),
    }
}

#[test]
fn list_defaults_have_no_overrides() {
    let cli = Cli::try_parse_from(["pantrymap", "list"]).expect("expected valid cli args");
    assert!(cli.view.is_none());

    let Commands::List { pipeline, html } = cli.command else {
        panic!("expected list command");
    };
    assert!(!html);
    assert!(pipeline.near.is_none());
    assert!(pipeline.radius.is_none());
    assert!(pipeline.status.is_none());
    assert!(pipeline.sort.is_none());
    assert!(pipeline.data.is_none());
}

#[test]
fn list_parses_filters() {
    let cli = Cli::try_parse_from([
        "pantrymap",
        "list",
        "--near",
        "36.1627,-86.7816",
        "--radius",
        "5",
        "--status",
        "full",
        "--sort",
        "name",
        "--html",
    ])
    .expect("expected valid cli args");

    let Commands::List { pipeline, html } = cli.command else {
        panic!("expected list command");
    };
    assert!(html);
    assert_eq!(pipeline.near, Some(Coordinate::new(36.1627, -86.7816)));
    assert_eq!(pipeline.radius, Some(5.0));
    assert_eq!(pipeline.status, Some(StatusFilter::Only(PantryStatus::Full)));
    assert_eq!(pipeline.sort, Some(SortKey::Name));
}

#[test]
fn near_accepts_negative_latitude() {
    let cli = Cli::try_parse_from(["pantrymap", "map", "--near", "-33.87,151.21"])
        .expect("expected valid cli args");
    let Commands::Map { pipeline } = cli.command else {
        panic!("expected map command");
    };
    assert_eq!(pipeline.near, Some(Coordinate::new(-33.87, 151.21)));
}

#[test]
fn invalid_near_is_rejected() {
    assert!(Cli::try_parse_from(["pantrymap", "list", "--near", "north"]).is_err());
    assert!(Cli::try_parse_from(["pantrymap", "list", "--near", "95,0"]).is_err());
}

#[test]
fn unknown_sort_is_rejected() {
    assert!(Cli::try_parse_from(["pantrymap", "list", "--sort", "popularity"]).is_err());
}

#[test]
fn global_view_flag_after_subcommand() {
    let cli = Cli::try_parse_from(["pantrymap", "list", "--view", "nashville"])
        .expect("expected valid cli args");
    assert_eq!(cli.view.as_deref(), Some("nashville"));
}

#[test]
fn data_file_flag() {
    let cli = Cli::try_parse_from(["pantrymap", "map", "--data", "pantries.json"])
        .expect("expected valid cli args");
    let Commands::Map { pipeline } = cli.command else {
        panic!("expected map command");
    };
    assert_eq!(
        pipeline.data.as_deref(),
        Some(std::path::Path::new("pantries.json"))
    );
}

#[test]
fn delete_requires_id() {
    assert!(Cli::try_parse_from(["pantrymap", "delete"]).is_err());

    let cli = Cli::try_parse_from(["pantrymap", "delete", "42", "--yes"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Delete { id: 42, yes: true }));
}

#[test]
fn links_command() {
    let cli = Cli::try_parse_from(["pantrymap", "links"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Links));
    assert_eq!(
        SOCIAL_LINKS[0].1,
        "https://www.facebook.com/reportthatpantry"
    );
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["pantrymap"]).is_err());
}

#[test]
fn confirm_accepts_yes() {
    let mut output = Vec::new();
    let confirmed = confirm(&mut "Yes\n".as_bytes(), &mut output).unwrap();
    assert!(confirmed);
    let prompt = String::from_utf8(output).unwrap();
    assert!(prompt.starts_with(DELETE_PROMPT));
}

#[test]
fn confirm_declines_by_default() {
    let mut output = Vec::new();
    assert!(!confirm(&mut "\n".as_bytes(), &mut output).unwrap());
    assert!(!confirm(&mut "nope\n".as_bytes(), &mut output).unwrap());
    assert!(!confirm(&mut "".as_bytes(), &mut output).unwrap());
}

#[tokio::test]
async fn data_file_pipeline_needs_no_backend_url() {
    let path = std::env::temp_dir().join(format!("pantrymap-cli-{}-data.json", std::process::id()));
    std::fs::write(
        &path,
        r#"[{"id": 9, "name": "Offline", "latitude": 36.1, "longitude": -86.7, "fullness": 50}]"#,
    )
    .unwrap();

    let cli = Cli::try_parse_from(["pantrymap", "list", "--data", path.to_str().unwrap()])
        .expect("expected valid cli args");
    let Commands::List { pipeline, .. } = cli.command else {
        panic!("expected list command");
    };
    let view = run_pipeline(&offline_config(), "default", &pipeline).await;
    std::fs::remove_file(&path).ok();

    let view = view.expect("pipeline should run from a data file");
    assert_eq!(view.state().list.results_count(), 1);
}

#[tokio::test]
async fn backend_commands_report_missing_base_url() {
    let cli = Cli::try_parse_from(["pantrymap", "list"]).expect("expected valid cli args");
    let Commands::List { pipeline, .. } = cli.command else {
        panic!("expected list command");
    };
    let Err(err) = run_pipeline(&offline_config(), "default", &pipeline).await else {
        panic!("expected missing base url error");
    };
    assert!(err.to_string().contains("PANTRYMAP_BASE_URL"), "got: {err}");

    let err = run_delete(&offline_config(), 1, true).await.unwrap_err();
    assert!(err.to_string().contains("PANTRYMAP_BASE_URL"), "got: {err}");
}
