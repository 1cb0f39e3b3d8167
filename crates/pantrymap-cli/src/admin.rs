//! `delete` and `links` command handlers.

use std::io::{BufRead, Write};

use pantrymap_client::PantryClient;
use pantrymap_core::AppConfig;

pub(crate) const DELETE_PROMPT: &str = "Are you sure you want to delete this address?";

pub(crate) const SOCIAL_LINKS: [(&str, &str); 2] = [
    ("Facebook", "https://www.facebook.com/reportthatpantry"),
    ("Instagram", "https://www.instagram.com"),
];

/// Delete a location after confirmation, then print where to navigate.
///
/// A failed delete is logged and reported, not returned as an error.
///
/// # Errors
///
/// Returns an error if the backend URL is unset, the prompt cannot be read,
/// or the client cannot be built.
pub(crate) async fn run_delete(config: &AppConfig, id: i64, yes: bool) -> anyhow::Result<()> {
    let base_url = config.require_base_url()?;
    if !yes {
        let stdin = std::io::stdin();
        let confirmed = confirm(&mut stdin.lock(), &mut std::io::stdout())?;
        if !confirmed {
            println!("cancelled");
            return Ok(());
        }
    }

    let client = PantryClient::new(
        base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build pantry client: {e}"))?;

    match client.delete_location(id).await {
        Ok(target) => println!("{target}"),
        Err(e) => {
            tracing::error!(location_id = id, error = %e, "failed to delete location");
            eprintln!("error: failed to delete location {id}: {e}");
        }
    }

    Ok(())
}

pub(crate) fn print_links() {
    for (name, url) in SOCIAL_LINKS {
        println!("{name}: {url}");
    }
}

/// Ask the delete question and read a yes/no answer. Anything other than
/// `y` or `yes` declines.
pub(crate) fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> std::io::Result<bool> {
    write!(output, "{DELETE_PROMPT} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
