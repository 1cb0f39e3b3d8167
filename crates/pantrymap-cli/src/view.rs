//! `list` and `map` command handlers.
//!
//! Both run the same pipeline as the web page: load pantries and locate the
//! user concurrently, then apply the filters. The map is a
//! [`RecordingSurface`], so `map` prints the operations a real map would
//! receive.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use pantrymap_client::PantryClient;
use pantrymap_core::{AppConfig, Coordinate, SortKey, StatusFilter};
use pantrymap_view::{JsonFileSource, PantryView, RecordingSurface, StaticLocation};

#[derive(Debug, Args)]
pub struct PipelineArgs {
    /// Your location as LAT,LNG (e.g. 36.1627,-86.7816)
    #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
    pub near: Option<Coordinate>,
    /// Search radius in miles
    #[arg(long, value_name = "MILES")]
    pub radius: Option<f64>,
    /// Only show pantries with this status (all, full, low, empty, unknown)
    #[arg(long)]
    pub status: Option<StatusFilter>,
    /// Sort order (distance, name, updated, status)
    #[arg(long)]
    pub sort: Option<SortKey>,
    /// Read pantries from a saved JSON response instead of the backend
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,
}

/// Print the pantry list as text or HTML, followed by the result count.
///
/// # Errors
///
/// Returns an error if the view preset cannot be resolved or the backend
/// client cannot be built. A failed data load is shown as the list's error
/// state, not returned.
pub(crate) async fn run_list(
    config: &AppConfig,
    view_name: &str,
    args: &PipelineArgs,
    html: bool,
) -> anyhow::Result<()> {
    let view = run_pipeline(config, view_name, args).await?;
    let list = &view.state().list;

    if html {
        println!("{}", list.to_html().into_string());
    } else {
        print!("{}", list.to_text());
    }
    println!("{} results", list.results_count());
    Ok(())
}

/// Print the recorded map operations as pretty JSON.
///
/// # Errors
///
/// Returns an error if the pipeline cannot be set up or the operations fail
/// to serialize.
pub(crate) async fn run_map(
    config: &AppConfig,
    view_name: &str,
    args: &PipelineArgs,
) -> anyhow::Result<()> {
    let view = run_pipeline(config, view_name, args).await?;
    let surface = view.into_surface();
    println!("{}", serde_json::to_string_pretty(surface.ops())?);
    Ok(())
}

pub(crate) async fn run_pipeline(
    config: &AppConfig,
    view_name: &str,
    args: &PipelineArgs,
) -> anyhow::Result<PantryView<RecordingSurface>> {
    let preset = pantrymap_core::resolve_view(&config.views_path, view_name)?;
    tracing::debug!(view = %preset.name, "resolved view preset");

    let mut view = PantryView::new(RecordingSurface::new(), preset);
    apply_filters(&mut view, args);

    let timeout = Duration::from_millis(config.geolocation_timeout_ms);
    // A terminal has no positioning service, so the page-load locate fails
    // silently; `--near` stands in for the "near me" button.
    let page_load = StaticLocation::from_option(None);

    match &args.data {
        Some(path) => {
            let source = JsonFileSource::new(path);
            view.run_initial(&source, &page_load, timeout).await;
        }
        None => {
            let client = PantryClient::new(
                config.require_base_url()?,
                config.request_timeout_secs,
                &config.user_agent,
            )
            .map_err(|e| anyhow::anyhow!("failed to build pantry client: {e}"))?;
            view.run_initial(&client, &page_load, timeout).await;
        }
    }

    if let Some(near) = args.near {
        if let Some(notice) = view.find_near_me(&StaticLocation::at(near), timeout).await {
            eprintln!("{}: {}", notice.title, notice.message);
        }
    }

    Ok(view)
}

fn apply_filters(view: &mut PantryView<RecordingSurface>, args: &PipelineArgs) {
    if let Some(radius) = args.radius {
        view.set_radius(radius);
    }
    if let Some(status) = args.status {
        if !view.set_status_filter(status) {
            tracing::warn!(
                view = %view.preset().name,
                "this view has no status filter; ignoring --status"
            );
        }
    }
    if let Some(sort) = args.sort {
        view.set_sort(sort);
    }
}
