//! Authenticated page fetching

use crate::credential::Credential;
use crate::error::AocError;
use reqwest::Method;
use tracing::debug;

/// Default site root
pub const DEFAULT_BASE_URL: &str = "https://adventofcode.com";

/// Issues authenticated requests against the puzzle site
///
/// Every request carries `Cookie: session=<credential>`. A non-success status
/// is reported as `AocError::Transport` and the body is discarded.
///
/// # Example
///
/// ```no_run
/// use aoc_session::{Credential, PageFetcher};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = PageFetcher::new(Credential::new("your_session_cookie"))?;
/// let input = fetcher.get("2024/day/1/input")?;
/// println!("Input length: {} bytes", input.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct PageFetcher {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
    credential: Credential,
}

impl PageFetcher {
    /// Create a fetcher for the default site with rustls-tls and no redirects
    ///
    /// # Errors
    ///
    /// Returns `AocError::ClientInit` if the HTTP client cannot be initialized.
    pub fn new(credential: Credential) -> Result<Self, AocError> {
        Self::builder().build(credential)
    }

    /// Create a builder for configuring the fetcher
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aoc_session::{Credential, PageFetcher};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let fetcher = PageFetcher::builder()
    ///     .base_url("http://localhost:1234")?
    ///     .build(Credential::new("test"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> PageFetcherBuilder {
        PageFetcherBuilder::new()
    }

    /// Send one request and return the body text
    ///
    /// `path` is relative to the base URL, e.g. `"2024/day/1/input"`. When
    /// `form` is given it is sent URL-encoded as
    /// `application/x-www-form-urlencoded`.
    ///
    /// # Errors
    ///
    /// * `AocError::Request` - Network error
    /// * `AocError::Transport` - Non-success status
    /// * `AocError::Encoding` - Body could not be decoded
    pub fn fetch(
        &self,
        method: Method,
        path: &str,
        form: Option<&[(&str, String)]>,
    ) -> Result<String, AocError> {
        let url = self.url_for(path)?;
        let cookie_header = self.credential.cookie_header()?;

        let mut request = self
            .client
            .request(method.clone(), url)
            .header("Cookie", cookie_header);
        if let Some(form) = form {
            request = request.form(form);
        }

        let response = request.send()?;
        let status = response.status();
        debug!(%method, path, %status, "fetched page");

        if !status.is_success() {
            return Err(AocError::Transport { status });
        }

        response.text().map_err(|_| AocError::Encoding)
    }

    /// `GET` a page
    pub fn get(&self, path: &str) -> Result<String, AocError> {
        self.fetch(Method::GET, path, None)
    }

    /// `POST` a URL-encoded form
    pub fn post_form(&self, path: &str, form: &[(&str, String)]) -> Result<String, AocError> {
        self.fetch(Method::POST, path, Some(form))
    }

    /// Construct URL using path segments
    fn url_for(&self, path: &str) -> Result<reqwest::Url, AocError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AocError::ClientInit("Cannot modify base URL path".to_string()))?
            .clear()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }
}

/// Builder for configuring a [`PageFetcher`]
///
/// The redirect policy is always forced to `Policy::none()`, so an expired
/// session (redirected to the landing page) surfaces as a transport error.
///
/// # Example
///
/// ```no_run
/// use aoc_session::{Credential, PageFetcher};
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = PageFetcher::builder()
///     .base_url("http://localhost:1234")?
///     .client_builder(
///         reqwest::blocking::Client::builder()
///             .timeout(Duration::from_secs(10))
///     )
///     .build(Credential::new("test"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct PageFetcherBuilder {
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl PageFetcherBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL, e.g. a mock server
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, AocError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set a custom HTTP client builder (timeouts, proxies, ...)
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the fetcher around `credential`
    ///
    /// # Errors
    ///
    /// Returns `AocError::ClientInit` if the HTTP client cannot be initialized.
    pub fn build(self, credential: Credential) -> Result<PageFetcher, AocError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| AocError::ClientInit(e.to_string()))?,
        };

        let builder = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls());

        let client = builder
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AocError::ClientInit(e.to_string()))?;

        Ok(PageFetcher {
            client,
            base_url,
            credential,
        })
    }
}
