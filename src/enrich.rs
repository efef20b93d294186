//! Repository visibility and enrichment pipeline.
//!
//! Each repository README may carry a JSON block inside its first HTML
//! comment:
//!
//! ```text
//! <!--{"visible":"true","tags":["rust"]}-->
//! # My project
//! ```
//!
//! A repository is showcased only when that block parses and its `visible`
//! key is the string `"true"`. Showcased repositories get the download URL of
//! their `favimage.png` attached as `coverImage`.
//!
//! Per-repository failures never fail the batch. The leaf lookups log and
//! return `None`; a lookup task that dies is logged and counts as hidden.
//! Only a failed listing propagates out of [`projects`].

use std::num::NonZeroUsize;
use std::sync::{Arc, LazyLock};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::error::Result;
use crate::hosting::Hosting;
use crate::model::{EnrichedRepository, Metadata, Readme, Repository, VisibilityCheck};

/// Path of the cover image inside each repository.
pub const COVER_IMAGE_PATH: &str = "favimage.png";

/// First HTML comment, non-greedy, spanning newlines.
static METADATA_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--(.*?)-->").expect("valid regex")
});

// ── Leaf operations ───────────────────────────────────────────────────────────

/// Download URL of the repository's cover image, if it has one.
pub async fn cover_image<H: Hosting>(hosting: &H, repo: &str) -> Option<String> {
    match hosting.file(repo, COVER_IMAGE_PATH).await {
        Ok(file) => file.download_url,
        Err(e) => {
            warn!(repo, error = %e, "no cover image");
            None
        }
    }
}

/// Visibility metadata embedded in the repository's README.
pub async fn metadata<H: Hosting>(hosting: &H, repo: &str) -> Option<Metadata> {
    let readme = match hosting.readme(repo).await {
        Ok(readme) => readme,
        Err(e) => {
            warn!(repo, error = %e, "failed to fetch README");
            return None;
        }
    };

    let text = match decode_readme(&readme) {
        Ok(text) => text,
        Err(e) => {
            warn!(repo, error = %e, "failed to decode README");
            return None;
        }
    };

    extract_metadata(&text)
}

/// Decodes the base64 README body into text.
///
/// The hosting API wraps the encoded body every 60 characters, so whitespace
/// is stripped first. Invalid UTF-8 is replaced rather than rejected.
pub fn decode_readme(readme: &Readme) -> Result<String> {
    let compact: Vec<u8> = readme.content
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parses the trimmed body of the first `<!-- ... -->` comment in `text`.
///
/// Later comments are never consulted, even when the first one is not JSON.
pub fn extract_metadata(text: &str) -> Option<Metadata> {
    let Some(caps) = METADATA_COMMENT.captures(text) else {
        debug!("no metadata found");
        return None;
    };

    match serde_json::from_str::<Value>(caps[1].trim()) {
        Ok(value) => Some(Metadata(value)),
        Err(e) => {
            warn!(error = %e, "malformed metadata comment");
            None
        }
    }
}

// ── Batch ─────────────────────────────────────────────────────────────────────

/// Keeps the repositories whose metadata marks them visible, in input order,
/// each with its cover image attached.
///
/// One task per repository runs the metadata and cover-image lookups
/// together. At most `limit` tasks talk to the hosting API at once.
pub async fn filter_visible<H: Hosting>(
    hosting: Arc<H>,
    repos: Vec<Repository>,
    limit: NonZeroUsize,
) -> Vec<EnrichedRepository> {
    let permits = Arc::new(Semaphore::new(limit.get()));

    let tasks: Vec<_> = repos.into_iter()
        .map(|repo| {
            let hosting = Arc::clone(&hosting);
            let permits = Arc::clone(&permits);
            let name = repo.name().to_owned();
            let span = info_span!("visibility", repo = %name);

            let handle = tokio::spawn(
                async move {
                    let Ok(_permit) = permits.acquire().await else {
                        return (false, None);
                    };
                    let (metadata, cover_image) = tokio::join!(
                        metadata(&*hosting, &name),
                        cover_image(&*hosting, &name),
                    );
                    (metadata.is_some_and(|m| m.is_visible()), cover_image)
                }
                .instrument(span),
            );
            (repo, handle)
        })
        .collect();

    let mut checks = Vec::with_capacity(tasks.len());
    for (repo, handle) in tasks {
        let check = match handle.await {
            Ok((visible, cover_image)) => VisibilityCheck { repository: repo, visible, cover_image },
            Err(e) => {
                error!(repo = repo.name(), "visibility check failed: {e}");
                VisibilityCheck::hidden(repo)
            }
        };
        checks.push(check);
    }

    checks.into_iter().filter_map(VisibilityCheck::into_enriched).collect()
}

/// Lists the account's repositories and returns the showcased ones.
///
/// A listing failure is returned before any per-repository call is made.
pub async fn projects<H: Hosting>(
    hosting: Arc<H>,
    limit: NonZeroUsize,
) -> Result<Vec<EnrichedRepository>> {
    let repos = hosting.list_repos().await?;
    let listed = repos.len();

    let visible = filter_visible(hosting, repos, limit).await;
    info!(listed, visible = visible.len(), "projects filtered");
    Ok(visible)
}
