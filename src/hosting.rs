//! The seam between this service and the source-control hosting API.
//!
//! [`GitHub`](crate::GitHub) is the production implementation. The
//! enrichment pipeline and the handlers only see this trait.

use std::future::Future;

use serde_json::Value;

use crate::error::Result;
use crate::model::{ContentFile, Readme, Repository};

/// Read-only access to one fixed account on a hosting API.
///
/// Implementations are shared across concurrent requests without locking.
pub trait Hosting: Send + Sync + 'static {
    /// The account's public profile.
    fn user(&self) -> impl Future<Output = Result<Value>> + Send;

    /// README of `repo`, rendered to HTML by the hosting API.
    fn readme_html(&self, repo: &str) -> impl Future<Output = Result<Value>> + Send;

    /// Every repository owned by the account, in upstream order.
    fn list_repos(&self) -> impl Future<Output = Result<Vec<Repository>>> + Send;

    /// README of `repo` in its encoded transport form.
    fn readme(&self, repo: &str) -> impl Future<Output = Result<Readme>> + Send;

    /// Content metadata for the file at `path` in `repo`.
    fn file(&self, repo: &str, path: &str) -> impl Future<Output = Result<ContentFile>> + Send;

    /// The account name all calls are scoped to.
    fn account(&self) -> &str;
}
