mod admin;
mod view;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::view::PipelineArgs;

#[derive(Debug, Parser)]
#[command(name = "pantrymap")]
#[command(about = "Find nearby food pantries and their stock levels")]
struct Cli {
    /// View preset to use (overrides `PANTRYMAP_VIEW`)
    #[arg(long, global = true)]
    view: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the pantry list
    List {
        #[command(flatten)]
        pipeline: PipelineArgs,
        /// Render the list as an HTML fragment
        #[arg(long)]
        html: bool,
    },
    /// Print the map operations the current view would perform, as JSON
    Map {
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Delete a pantry location
    Delete {
        /// Location id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Print the social media links
    Links,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = pantrymap_core::load_app_config()?;
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let view_name = cli.view.as_deref().unwrap_or(&config.view);
    tracing::debug!(env = %config.env, view = view_name, "starting pantrymap");

    match cli.command {
        Commands::List { pipeline, html } => {
            view::run_list(&config, view_name, &pipeline, html).await?;
        }
        Commands::Map { pipeline } => view::run_map(&config, view_name, &pipeline).await?,
        Commands::Delete { id, yes } => admin::run_delete(&config, id, yes).await?,
        Commands::Links => admin::print_links(),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
