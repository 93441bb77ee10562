//! Main Alpha Vantage API client
use crate::request::Request;

/// Query endpoint used by every Alpha Vantage function.
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// HTTP client used when none is supplied: `reqwest::Client` with the `reqwest`
/// feature, otherwise [`HyperClient`](crate::request::HyperClient).
#[cfg(feature = "reqwest")]
pub type DefaultClient = reqwest::Client;

/// HTTP client used when none is supplied: `reqwest::Client` with the `reqwest`
/// feature, otherwise [`HyperClient`](crate::request::HyperClient).
#[cfg(all(feature = "hyper", not(feature = "reqwest")))]
pub type DefaultClient = crate::request::HyperClient;

/// The Alpha Vantage API client.
///
/// Holds the HTTP transport, the API key and the query endpoint. Any type that
/// implements [`Request`] can be plugged in with [`with_client`](Self::with_client).
#[derive(Debug, Clone)]
pub struct AlphaVantage<Client: Request = DefaultClient> {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl<Client: Request> AlphaVantage<Client> {
    /// Create a client whose API key comes from `ALPHAVANTAGE_API_KEY`.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`](crate::Error::MissingApiKey) if the variable is unset.
    #[cfg(feature = "dotenvy")]
    pub fn new() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let api_key =
            std::env::var(crate::config::API_KEY_VAR).map_err(|_| crate::Error::MissingApiKey)?;

        Ok(Self::unauthenticated().with_key(api_key))
    }

    /// Create a client with no API key. Set one with [`with_key`](Self::with_key).
    #[cfg(not(feature = "dotenvy"))]
    pub fn new() -> Self {
        Self::unauthenticated()
    }

    fn unauthenticated() -> Self {
        Self {
            client: Client::new(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Sets the HTTP client for this instance.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Set the API key for this instance.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use alphav_fundamentals::AlphaVantage;
    ///
    /// let client = AlphaVantage::default().with_key("my_api_key");
    /// ```
    pub fn with_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Point the client at a different query endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Get the API key for this instance.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Query endpoint requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl<Client: Request> Default for AlphaVantage<Client> {
    /// A client with no API key, talking to [`DEFAULT_BASE_URL`].
    fn default() -> Self {
        Self::unauthenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_client_has_no_key() {
        let client: AlphaVantage = AlphaVantage::default();
        assert_eq!(client.api_key(), None);
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn builder_sets_key_and_endpoint() {
        let client: AlphaVantage = AlphaVantage::default()
            .with_key("demo")
            .with_base_url("http://localhost:9000/query");
        assert_eq!(client.api_key(), Some("demo"));
        assert_eq!(client.base_url(), "http://localhost:9000/query");
    }
}
