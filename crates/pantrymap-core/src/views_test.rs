use super::*;
use crate::filter::{SortKey, StatusFilter};
use crate::pantry::PantryStatus;

fn parse(yaml: &str) -> ViewsFile {
    serde_yaml::from_str(yaml).expect("valid yaml")
}

#[test]
fn partial_preset_fills_defaults() {
    let file = parse(
        r"
views:
  - name: nashville
    default_center: { lat: 36.1627, lng: -86.7816 }
    default_zoom: 10
    marker_style: pin
    status_filter_enabled: false
",
    );
    validate_views(&file).unwrap();
    let view = &file.views[0];
    assert_eq!(view.name, "nashville");
    assert_eq!(view.default_zoom, 10);
    assert_eq!(view.marker_style, MarkerStyle::Pin);
    assert!(!view.status_filter_enabled);
    assert_eq!(view.max_fit_zoom, 10);
    assert_eq!(view.filter, FilterState::default());
}

#[test]
fn preset_filter_overrides() {
    let file = parse(
        r"
views:
  - name: triage
    filter:
      radius_miles: 25
      status: empty
      sort: updated
",
    );
    validate_views(&file).unwrap();
    let filter = file.views[0].filter;
    assert!((filter.radius_miles - 25.0).abs() < f64::EPSILON);
    assert_eq!(filter.status, StatusFilter::Only(PantryStatus::Empty));
    assert_eq!(filter.sort, SortKey::Updated);
}

#[test]
fn rejects_duplicate_names() {
    let file = parse(
        r"
views:
  - name: a
  - name: a
",
    );
    let err = validate_views(&file).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate")));
}

#[test]
fn rejects_blank_name() {
    let file = parse(
        r#"
views:
  - name: "  "
"#,
    );
    assert!(matches!(
        validate_views(&file),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn rejects_zoom_out_of_range() {
    let file = parse(
        r"
views:
  - name: deep
    focus_zoom: 30
",
    );
    let err = validate_views(&file).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("focus_zoom")));
}

#[test]
fn rejects_negative_radius() {
    let file = parse(
        r"
views:
  - name: odd
    filter:
      radius_miles: -1
",
    );
    assert!(matches!(
        validate_views(&file),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn rejects_invalid_center() {
    let file = parse(
        r"
views:
  - name: nowhere
    default_center: { lat: 120.0, lng: 0.0 }
",
    );
    assert!(matches!(
        validate_views(&file),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn pick_view_falls_back_to_builtin_default() {
    let view = pick_view(ViewsFile::default(), DEFAULT_VIEW_NAME).unwrap();
    assert_eq!(view, ViewPreset::default());
}

#[test]
fn pick_view_unknown_name_errors() {
    let err = pick_view(ViewsFile::default(), "atlantis").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownView(ref n) if n == "atlantis"));
}

#[test]
fn resolve_view_without_file_uses_default() {
    let view = resolve_view(Path::new("/nonexistent/pantrymap/views.yaml"), "default").unwrap();
    assert_eq!(view.default_zoom, 4);
}

#[test]
fn load_views_reports_missing_file() {
    let err = load_views(Path::new("/nonexistent/pantrymap/views.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::ViewsFileIo { .. }));
}

#[test]
fn shipped_views_file_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .expect("crate sits two levels below the workspace root")
        .join("config")
        .join("views.yaml");
    assert!(path.exists(), "views.yaml missing at {path:?}");

    let nashville = resolve_view(&path, "nashville").unwrap();
    assert_eq!(nashville.marker_style, MarkerStyle::Pin);
    assert!(!nashville.status_filter_enabled);
    assert_eq!(nashville.filter.sort, SortKey::Name);
    assert_eq!(nashville.filter.status, StatusFilter::All);
    assert_eq!(nashville.max_fit_zoom, 10);

    let default = resolve_view(&path, "default").unwrap();
    assert_eq!(default, ViewPreset::default());
}
