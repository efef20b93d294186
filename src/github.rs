//! GitHub REST client scoped to one account.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::hosting::Hosting;
use crate::model::{ContentFile, Readme, Repository};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// REST API version every request pins.
const API_VERSION: &str = "2022-11-28";

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const HTML_MEDIA_TYPE: &str = "application/vnd.github.html+json";

/// Repositories requested per listing call. Only the first page is read.
const REPOS_PER_PAGE: &str = "100";

const USER_AGENT: &str = concat!("repofolio/", env!("CARGO_PKG_VERSION"));

/// GitHub client for a fixed account.
///
/// Calls carry no timeout, no retries and no rate-limit handling.
#[derive(Clone, Debug)]
pub struct GitHub {
    client: Client,
    base: Url,
    account: String,
    token: Option<String>,
}

impl GitHub {
    /// Builds a client against `api_url` (normally [`DEFAULT_API_URL`]).
    ///
    /// `token` is sent as a bearer credential when present.
    pub fn new(api_url: &str, account: impl Into<String>, token: Option<String>) -> Result<Self> {
        let base = Url::parse(api_url)
            .map_err(|e| Error::Config(format!("invalid API URL `{api_url}`: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("API URL `{api_url}` cannot carry a path")));
        }

        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self { client, base, account: account.into(), token })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends a GET and fails on any non-success status.
    async fn get(&self, url: Url, accept: &str) -> Result<reqwest::Response> {
        let mut req = self.client
            .get(url)
            .header(ACCEPT, accept)
            .header("x-github-api-version", API_VERSION);
        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let res = req.send().await?;
        let status = res.status();
        debug!(url = %res.url(), status = status.as_u16(), "github response");
        if !status.is_success() {
            return Err(Error::Status { status: status.as_u16(), url: res.url().to_string() });
        }
        Ok(res)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        Ok(self.get(url, JSON_MEDIA_TYPE).await?.json().await?)
    }
}

impl Hosting for GitHub {
    #[instrument(skip(self), fields(account = %self.account))]
    async fn user(&self) -> Result<Value> {
        self.get_json(self.url(&["users", self.account.as_str()])).await
    }

    /// HTML renderings usually come back as `text/html`; those are wrapped
    /// into a JSON string. A JSON answer is passed through unchanged.
    #[instrument(skip(self), fields(account = %self.account))]
    async fn readme_html(&self, repo: &str) -> Result<Value> {
        let url = self.url(&["repos", self.account.as_str(), repo, "readme"]);
        let res = self.get(url, HTML_MEDIA_TYPE).await?;

        let is_json = res.headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("json"));
        if is_json {
            Ok(res.json().await?)
        } else {
            Ok(Value::String(res.text().await?))
        }
    }

    #[instrument(skip(self), fields(account = %self.account))]
    async fn list_repos(&self) -> Result<Vec<Repository>> {
        let mut url = self.url(&["users", self.account.as_str(), "repos"]);
        url.query_pairs_mut().append_pair("per_page", REPOS_PER_PAGE);
        self.get_json(url).await
    }

    async fn readme(&self, repo: &str) -> Result<Readme> {
        self.get_json(self.url(&["repos", self.account.as_str(), repo, "readme"])).await
    }

    async fn file(&self, repo: &str, path: &str) -> Result<ContentFile> {
        let mut segments = vec!["repos", self.account.as_str(), repo, "contents"];
        segments.extend(path.split('/'));
        self.get_json(self.url(&segments)).await
    }

    fn account(&self) -> &str {
        &self.account
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer, token: Option<&str>) -> GitHub {
        GitHub::new(&server.uri(), "octocat", token.map(str::to_owned)).unwrap()
    }

    #[test]
    fn rejects_unparseable_api_url() {
        let err = GitHub::new("not a url", "octocat", None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn url_keeps_base_path_prefix() {
        let gh = GitHub::new("https://ghe.example/api/v3", "octocat", None).unwrap();
        assert_eq!(
            gh.url(&["users", "octocat"]).as_str(),
            "https://ghe.example/api/v3/users/octocat"
        );
    }

    #[tokio::test]
    async fn user_sends_version_and_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .and(header("x-github-api-version", "2022-11-28"))
            .and(header("authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": "octocat" })))
            .expect(1)
            .mount(&server)
            .await;

        let user = client(&server, Some("s3cret")).user().await.unwrap();
        assert_eq!(user["login"], "octocat");
    }

    #[tokio::test]
    async fn list_repos_requests_full_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "a", "stargazers_count": 1 },
                { "name": "b", "stargazers_count": 2 },
            ])))
            .mount(&server)
            .await;

        let repos = client(&server, None).list_repos().await.unwrap();
        let names: Vec<_> = repos.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(repos[1].get("stargazers_count"), Some(&json!(2)));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/blog/contents/favimage.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server, None).file("blog", "favimage.png").await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 404, .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn readme_html_wraps_html_body_as_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/octocat/readme"))
            .and(header("accept", "application/vnd.github.html+json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=utf-8")
                    .set_body_string("<h1>Hi</h1>"),
            )
            .mount(&server)
            .await;

        let readme = client(&server, None).readme_html("octocat").await.unwrap();
        assert_eq!(readme, json!("<h1>Hi</h1>"));
    }

    #[tokio::test]
    async fn readme_html_passes_json_answer_through() {
        let rendered = json!({ "name": "README.md", "html": "<h1>Hi</h1>", "size": 11 });
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/blog/readme"))
            .and(header("accept", "application/vnd.github.html+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&rendered))
            .mount(&server)
            .await;

        let readme = client(&server, None).readme_html("blog").await.unwrap();
        assert_eq!(readme, rendered);
    }

    #[tokio::test]
    async fn readme_returns_encoded_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/blog/readme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "README.md",
                "content": "aGk=\n",
                "encoding": "base64",
            })))
            .mount(&server)
            .await;

        let readme = client(&server, None).readme("blog").await.unwrap();
        assert_eq!(readme.content, "aGk=\n");
    }
}
