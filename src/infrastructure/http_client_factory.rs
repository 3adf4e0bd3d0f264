use reqwest::Client;
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the HTTP client used for prediction requests.
    ///
    /// No retry middleware and no request timeout: a request resolves when
    /// the service answers or the transport fails.
    pub fn create_client() -> Client {
        Client::builder()
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("stockdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}
