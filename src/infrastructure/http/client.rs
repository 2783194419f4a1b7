//! Shared request plumbing for the backend APIs.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::error::AppError;

/// One configured backend: a labelled base URL plus a [`reqwest::Client`]
/// carrying the standard request timeout.
///
/// Failures are split the way the batch drivers need them: transport errors
/// become [`AppError::Connectivity`], non-2xx responses become
/// [`AppError::ApiStatus`] and undecodable bodies become
/// [`AppError::ApiBody`].
#[derive(Debug, Clone)]
pub struct HttpApi {
    name: &'static str,
    base: Url,
    client: Client,
    health_timeout: Duration,
}

impl HttpApi {
    /// Builds a client for `base` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if the base URL does not parse or the
    /// underlying client cannot be constructed.
    pub fn new(
        name: &'static str,
        base: &str,
        timeout: Duration,
        health_timeout: Duration,
    ) -> Result<Self, AppError> {
        let base = Url::parse(base).map_err(|e| {
            AppError::config(format!("invalid {name} API base URL '{base}': {e}"))
        })?;
        if base.cannot_be_a_base() {
            return Err(AppError::config(format!(
                "{name} API base URL '{base}' cannot carry path segments"
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            name,
            base,
            client,
            health_timeout,
        })
    }

    /// Label used in error messages ("main" or "tournament").
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Base URL this client was configured with.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Extends the base URL with extra path segments.
    ///
    /// Keeps any path already on the base and percent-encodes each new
    /// segment, so course names with spaces survive the trip.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                AppError::config(format!(
                    "{} API base URL '{}' cannot carry path segments",
                    self.name, self.base
                ))
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    /// `GET` an endpoint and decode its JSON body.
    pub async fn get_json<T>(&self, segments: &[&str]) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::connectivity(self.name, url.as_str(), e))?;
        self.decode(response, "GET", url).await
    }

    /// `POST` a JSON body to an endpoint and decode the JSON response.
    pub async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!("POST {url}");
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::connectivity(self.name, url.as_str(), e))?;
        self.decode(response, "POST", url).await
    }

    /// Probes `GET {base}/health` with the short health timeout.
    ///
    /// An unhealthy or unreachable backend is reported as
    /// [`AppError::Connectivity`] so batch runs abort before producing
    /// partial output.
    pub async fn health(&self) -> Result<(), AppError> {
        let url = self.endpoint(&["health"])?;
        debug!("GET {url} (health probe)");
        let response = self
            .client
            .get(url.clone())
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(|e| AppError::connectivity(self.name, url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::connectivity(
                self.name,
                url.as_str(),
                format!("health probe returned HTTP {status}"),
            ));
        }
        Ok(())
    }

    async fn decode<T>(
        &self,
        response: reqwest::Response,
        method: &'static str,
        url: Url,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            // Surface whatever the backend said before discarding the body.
            let body = response.text().await.unwrap_or_default();
            if !body.is_empty() {
                error!(
                    "{} API rejected {} {}: {}",
                    self.name,
                    method,
                    url,
                    body.trim()
                );
            }
            return Err(AppError::api_status(
                self.name,
                method,
                url.as_str(),
                status.as_u16(),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::api_body(self.name, url.as_str(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpApi {
        HttpApi::new(
            "main",
            base,
            Duration::from_secs(10),
            Duration::from_secs(5),
        )
        .expect("base URL should be accepted")
    }

    #[test]
    fn endpoint_extends_base_path() {
        let api = api("http://localhost:8001");
        let url = api.endpoint(&["courses"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8001/courses");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let api = api("http://localhost:8001/");
        let url = api.endpoint(&["teams"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8001/teams");
    }

    #[test]
    fn endpoint_keeps_existing_base_path() {
        let api = api("http://localhost:8002/tournament");
        let url = api.endpoint(&["update-leaderboard"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8002/tournament/update-leaderboard"
        );
    }

    #[test]
    fn endpoint_percent_encodes_segments() {
        let api = api("http://localhost:8001");
        let url = api.endpoint(&["courses", "Black Course", "holes"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8001/courses/Black%20Course/holes"
        );
    }

    #[test]
    fn rejects_unparseable_base() {
        let err = HttpApi::new(
            "main",
            "not a url",
            Duration::from_secs(10),
            Duration::from_secs(5),
        )
        .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn rejects_base_without_path_support() {
        let err = HttpApi::new(
            "tournament",
            "mailto:ops@example.com",
            Duration::from_secs(10),
            Duration::from_secs(5),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
