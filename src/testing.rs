//! In-memory [`Hosting`] used by the pipeline and handler tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::hosting::Hosting;
use crate::model::{ContentFile, Readme, Repository};

#[derive(Default)]
pub(crate) struct FakeHosting {
    user: Option<Value>,
    html: HashMap<String, Value>,
    repos: Option<Vec<Repository>>,
    readmes: HashMap<String, String>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    images: HashMap<String, String>,
    latency: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

fn not_found(what: &str) -> Error {
    Error::Status { status: 404, url: format!("fake://{what}") }
}

impl FakeHosting {
    pub(crate) fn with_user(mut self, user: Value) -> Self {
        self.user = Some(user);
        self
    }

    pub(crate) fn with_readme_html(mut self, repo: &str, html: Value) -> Self {
        self.html.insert(repo.to_owned(), html);
        self
    }

    pub(crate) fn with_repos(mut self, repos: Vec<Repository>) -> Self {
        self.repos = Some(repos);
        self
    }

    /// README whose decoded text is `text`.
    pub(crate) fn with_readme(self, repo: &str, text: &str) -> Self {
        let encoded = STANDARD.encode(text);
        self.with_raw_readme(repo, &encoded)
    }

    /// README whose transport content is `content`, as-is.
    pub(crate) fn with_raw_readme(mut self, repo: &str, content: &str) -> Self {
        self.readmes.insert(repo.to_owned(), content.to_owned());
        self
    }

    pub(crate) fn with_failing_readme(mut self, repo: &str) -> Self {
        self.failing.insert(repo.to_owned());
        self
    }

    pub(crate) fn with_panicking_readme(mut self, repo: &str) -> Self {
        self.panicking.insert(repo.to_owned());
        self
    }

    pub(crate) fn with_image(mut self, repo: &str, url: &str) -> Self {
        self.images.insert(repo.to_owned(), url.to_owned());
        self
    }

    /// Every README fetch sleeps briefly so concurrent fetches overlap.
    pub(crate) fn with_latency(mut self) -> Self {
        self.latency = Some(Duration::from_millis(20));
        self
    }

    /// Calls made for individual repositories (README and file lookups).
    pub(crate) fn repository_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of README fetches observed running at once.
    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl Hosting for FakeHosting {
    async fn user(&self) -> Result<Value> {
        self.user.clone().ok_or_else(|| not_found("user"))
    }

    async fn readme_html(&self, repo: &str) -> Result<Value> {
        self.html.get(repo).cloned().ok_or_else(|| not_found(repo))
    }

    async fn list_repos(&self) -> Result<Vec<Repository>> {
        self.repos.clone().ok_or(Error::Status { status: 500, url: "fake://repos".into() })
    }

    async fn readme(&self, repo: &str) -> Result<Readme> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panicking.contains(repo) {
            panic!("README lookup for {repo} blew up");
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(repo) {
            return Err(Error::Status { status: 502, url: format!("fake://{repo}/readme") });
        }
        let content = self.readmes.get(repo).ok_or_else(|| not_found(repo))?;
        Ok(Readme { content: content.clone() })
    }

    async fn file(&self, repo: &str, _path: &str) -> Result<ContentFile> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let url = self.images.get(repo).ok_or_else(|| not_found(repo))?;
        Ok(ContentFile { download_url: Some(url.clone()) })
    }

    fn account(&self) -> &str {
        "octocat"
    }
}
