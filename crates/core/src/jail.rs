//! AppJail CLI wrappers
//!
//! Jail-level operations, distinct from the project-level director
//! commands: individual jails can be started, stopped, restarted, destroyed
//! and inspected regardless of which project composed them.

use crate::errors::Result;
use crate::exec::{self, ProcOutput, StderrMode};
use indexmap::IndexMap;
use tracing::instrument;

/// Start a jail
#[instrument(level = "debug")]
pub async fn start(jail: &str) -> Result<ProcOutput> {
    let out = exec::run(
        exec::argv(&["appjail", "start", "--", jail]),
        None,
        StderrMode::Merge,
    )
    .await?;
    Ok(out)
}

/// Stop a jail
#[instrument(level = "debug")]
pub async fn stop(jail: &str) -> Result<ProcOutput> {
    let out = exec::run(
        exec::argv(&["appjail", "stop", "--", jail]),
        None,
        StderrMode::Merge,
    )
    .await?;
    Ok(out)
}

/// Restart a jail
#[instrument(level = "debug")]
pub async fn restart(jail: &str) -> Result<ProcOutput> {
    let out = exec::run(
        exec::argv(&["appjail", "restart", jail]),
        None,
        StderrMode::Merge,
    )
    .await?;
    Ok(out)
}

/// Destroy a jail, recursively and by force
#[instrument(level = "debug")]
pub async fn destroy(jail: &str) -> Result<ProcOutput> {
    let out = exec::run(
        exec::argv(&["appjail", "jail", "destroy", "-Rf", jail]),
        None,
        StderrMode::Merge,
    )
    .await?;
    Ok(out)
}

/// Query a jail's status; only the exit code carries meaning (0 = running)
#[instrument(level = "debug")]
pub async fn status(jail: &str) -> Result<i32> {
    let out = exec::run(
        exec::argv(&["appjail", "status", "-q", jail]),
        None,
        StderrMode::Discard,
    )
    .await?;
    Ok(out.code)
}

/// List jail names
#[instrument(level = "debug")]
pub async fn list() -> Result<Vec<String>> {
    let out = exec::run(
        exec::argv(&["appjail", "jail", "list", "-eHIpt", "name"]),
        None,
        StderrMode::Discard,
    )
    .await?;
    Ok(out.output.lines().map(|s| s.to_string()).collect())
}

/// Read a single jail attribute, trimmed
#[instrument(level = "debug")]
pub async fn get_attr(jail: &str, attr: &str) -> Result<String> {
    let out = exec::run(
        exec::argv(&["appjail", "jail", "get", jail, attr]),
        None,
        StderrMode::Discard,
    )
    .await?;
    Ok(out.output.trim().to_string())
}

/// Collect the requested attributes of one jail; empty values are omitted
pub async fn get_jail(jail: &str, keywords: &[&str]) -> Result<IndexMap<String, String>> {
    let mut attrs = IndexMap::new();

    for keyword in keywords {
        let value = if *keyword == "name" {
            jail.to_string()
        } else {
            get_attr(jail, keyword).await?
        };

        if value.is_empty() {
            continue;
        }

        attrs.insert(keyword.to_string(), value);
    }

    Ok(attrs)
}

/// Build an attribute table for every jail
#[instrument(level = "debug", skip(keywords))]
pub async fn get_jails(keywords: &[&str]) -> Result<Vec<IndexMap<String, String>>> {
    let jails = list().await?;

    let mut table = Vec::with_capacity(jails.len());
    for jail in &jails {
        table.push(get_jail(jail, keywords).await?);
    }

    Ok(table)
}
