//! Package index client: one method per remote procedure.
//!
//! Every method forwards its arguments positionally to the procedure of
//! the same name and returns what came back. Defaults match the index's
//! optional arguments (`show_hidden` and `with_ids` false, search operator
//! `and`).

use std::time::Duration;

use tracing::debug;
use url::Url;

use pypinfo_core::error::PypiError;
use pypinfo_core::types::{
    BrowseEntry, ChangelogEntry, FileDownloads, FromValue, PackageRole, ReleaseData, ReleaseFile,
    SearchHit, SearchOperator, SearchSpec, UserPackage, Value,
};

use crate::transport::{HttpTransport, Transport};
use crate::RegistryResult;

/// Well-known XML-RPC endpoint of the Python package index
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/pypi";

/// Connection settings for the HTTP transport
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// XML-RPC endpoint
    pub index_url: String,
    /// User-Agent header sent with every call
    pub user_agent: String,
    /// Whole-request timeout; `None` leaves reqwest's default (no timeout)
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            user_agent: format!("pypinfo/{}", env!("CARGO_PKG_VERSION")),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Point the client at another endpoint
    pub fn with_index_url(mut self, index_url: &str) -> RegistryResult<Self> {
        self.index_url = index_url.to_string();
        self.endpoint()?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Parsed endpoint; only http and https are accepted
    pub(crate) fn endpoint(&self) -> RegistryResult<Url> {
        let url = Url::parse(&self.index_url).map_err(|e| PypiError::InvalidUrl {
            url: self.index_url.clone(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(PypiError::InvalidUrl {
                url: self.index_url.clone(),
                reason: format!("unsupported scheme '{}'", scheme),
            }),
        }
    }
}

/// Client for the index's XML-RPC metadata interface
#[derive(Debug, Clone)]
pub struct PypiClient<T = HttpTransport> {
    transport: T,
}

impl PypiClient<HttpTransport> {
    /// Create a client for the well-known index endpoint
    pub fn new() -> RegistryResult<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a client with custom connection settings
    pub fn with_config(config: &ClientConfig) -> RegistryResult<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> PypiClient<T> {
    /// Create a client over any transport
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue one call and read the documented shape out of the result
    async fn call<R: FromValue>(&self, method: &str, params: Vec<Value>) -> RegistryResult<R> {
        debug!("Calling {} with {} params", method, params.len());
        let value = self.transport.call(method, params).await?;
        R::from_value(value).map_err(|e| PypiError::malformed(method, e.to_string()))
    }

    /// Names of every package registered with the index.
    ///
    /// Unordered and very large (hundreds of thousands of names).
    pub async fn list_packages(&self) -> RegistryResult<Vec<String>> {
        self.call("list_packages", Vec::new()).await
    }

    /// Version strings of a package's releases.
    ///
    /// Hidden releases are only included when `show_hidden` is true.
    pub async fn package_releases(
        &self,
        package_name: &str,
        show_hidden: bool,
    ) -> RegistryResult<Vec<String>> {
        self.call(
            "package_releases",
            vec![Value::from(package_name), Value::from(show_hidden)],
        )
        .await
    }

    /// Users holding a role on a package
    pub async fn package_roles(&self, package_name: &str) -> RegistryResult<Vec<PackageRole>> {
        self.call("package_roles", vec![Value::from(package_name)]).await
    }

    /// Packages a user holds a role on
    pub async fn user_packages(&self, user: &str) -> RegistryResult<Vec<UserPackage>> {
        self.call("user_packages", vec![Value::from(user)]).await
    }

    /// Download count per file of a release
    pub async fn release_downloads(
        &self,
        package_name: &str,
        version: &str,
    ) -> RegistryResult<Vec<FileDownloads>> {
        self.call(
            "release_downloads",
            vec![Value::from(package_name), Value::from(version)],
        )
        .await
    }

    /// Distributed files of a release
    pub async fn release_urls(
        &self,
        package_name: &str,
        version: &str,
    ) -> RegistryResult<Vec<ReleaseFile>> {
        self.call(
            "release_urls",
            vec![Value::from(package_name), Value::from(version)],
        )
        .await
    }

    /// Metadata of a release; empty if the release does not exist
    pub async fn release_data(
        &self,
        package_name: &str,
        version: &str,
    ) -> RegistryResult<ReleaseData> {
        self.call(
            "release_data",
            vec![Value::from(package_name), Value::from(version)],
        )
        .await
    }

    /// Search releases; `SearchOperator::default()` is `and`
    pub async fn search(
        &self,
        spec: &SearchSpec,
        operator: SearchOperator,
    ) -> RegistryResult<Vec<SearchHit>> {
        self.call(
            "search",
            vec![spec.to_value(), Value::from(operator.as_str())],
        )
        .await
    }

    /// Releases tagged with every one of `classifiers`
    pub async fn browse<S: AsRef<str>>(
        &self,
        classifiers: &[S],
    ) -> RegistryResult<Vec<BrowseEntry>> {
        let classifiers: Vec<Value> = classifiers
            .iter()
            .map(|classifier| Value::from(classifier.as_ref()))
            .collect();
        self.call("browse", vec![Value::Array(classifiers)]).await
    }

    /// Events since `since` (UTC epoch seconds), oldest first.
    ///
    /// Entries carry a serial id only when `with_ids` is true.
    pub async fn changelog(
        &self,
        since: i64,
        with_ids: bool,
    ) -> RegistryResult<Vec<ChangelogEntry>> {
        self.call("changelog", vec![Value::from(since), Value::from(with_ids)])
            .await
    }

    /// Serial id of the most recent event
    pub async fn changelog_last_serial(&self) -> RegistryResult<i64> {
        self.call("changelog_last_serial", Vec::new()).await
    }

    /// Events after the one identified by `since_serial`
    pub async fn changelog_since_serial(
        &self,
        since_serial: i64,
    ) -> RegistryResult<Vec<ChangelogEntry>> {
        self.call("changelog_since_serial", vec![Value::from(since_serial)])
            .await
    }
}
