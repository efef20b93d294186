//! Records exchanged with the hosting API and republished to clients.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Output key carrying the derived cover-image location.
pub const COVER_IMAGE_KEY: &str = "coverImage";

/// A repository as listed by the hosting API.
///
/// The upstream record is kept whole, in upstream key order. Only `name` is
/// interpreted, and it must be present as a string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Repository {
    fields: Map<String, Value>,
}

impl Repository {
    pub fn named(name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("name".into(), Value::String(name.into()));
        Self { fields }
    }

    /// Adds or replaces an upstream field. `name` cannot be replaced.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if key != "name" {
            self.fields.insert(key, value);
        }
        self
    }

    pub fn name(&self) -> &str {
        self.fields.get("name").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl TryFrom<Map<String, Value>> for Repository {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        match fields.get("name") {
            Some(Value::String(_)) => Ok(Self { fields }),
            Some(_) => Err("repository `name` is not a string".into()),
            None => Err("repository has no `name`".into()),
        }
    }
}

impl From<Repository> for Map<String, Value> {
    fn from(repo: Repository) -> Self {
        repo.fields
    }
}

/// A visible repository with its cover image attached.
///
/// Serialises as the upstream record plus `coverImage`, which is omitted when
/// the repository has no cover image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnrichedRepository {
    #[serde(flatten)]
    pub repository: Repository,
    #[serde(rename = "coverImage", skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl EnrichedRepository {
    pub fn new(mut repository: Repository, cover_image: Option<String>) -> Self {
        // The derived key always wins over an upstream field of the same name.
        repository.fields.remove(COVER_IMAGE_KEY);
        Self { repository, cover_image }
    }
}

/// JSON embedded in a repository README that controls how it is shown.
///
/// Any shape parses; only a top-level `visible` key is interpreted.
#[derive(Clone, Debug, PartialEq)]
pub struct Metadata(pub Value);

impl Metadata {
    /// True only for the JSON *string* `"true"`. A boolean `true` does not count.
    pub fn is_visible(&self) -> bool {
        self.0.get("visible").and_then(Value::as_str) == Some("true")
    }
}

/// Outcome of evaluating one repository, consumed right after filtering.
#[derive(Debug)]
pub struct VisibilityCheck {
    pub repository: Repository,
    pub visible: bool,
    pub cover_image: Option<String>,
}

impl VisibilityCheck {
    /// A check for a repository whose evaluation failed outright.
    pub fn hidden(repository: Repository) -> Self {
        Self { repository, visible: false, cover_image: None }
    }

    /// The enriched record, if this repository is to be shown.
    pub fn into_enriched(self) -> Option<EnrichedRepository> {
        self.visible.then(|| EnrichedRepository::new(self.repository, self.cover_image))
    }
}

/// README resource as returned in the API's JSON representation.
#[derive(Clone, Debug, Deserialize)]
pub struct Readme {
    /// Base64 with embedded line breaks.
    pub content: String,
}

/// Content metadata for a single file in a repository.
#[derive(Clone, Debug, Deserialize)]
pub struct ContentFile {
    #[serde(default)]
    pub download_url: Option<String>,
}
