//! HTTP client for the listing backend's `/houses` resource.

use std::time::Duration;

use estate_core::{Listing, ListingPayload};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::session::Session;
use crate::types::ListingPage;

/// Client for the listing backend.
///
/// Every request carries `Authorization: Bearer <token>` when the shared
/// [`Session`] holds one. A 401 clears the session before the error is
/// returned.
pub struct ListingClient {
    client: Client,
    base_url: Url,
    session: Session,
}

impl ListingClient {
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`ApiError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, session: Session) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("estate/0.1 (listing-admin)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Fetches one page of listings, optionally filtered by a search string.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]; every variant except `NotFound` can occur.
    pub async fn list(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<ListingPage, ApiError> {
        let mut url = self.url("houses");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("size", &size.to_string());
            pairs.append_pair("search", search.unwrap_or_default());
        }
        let response = self.send(self.request(Method::GET, url.clone()), None).await?;
        Self::parse(response, &url).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] on 404, otherwise see [`ApiError`].
    pub async fn get(&self, id: i64) -> Result<Listing, ApiError> {
        let url = self.url(&format!("houses/{id}"));
        let response = self
            .send(self.request(Method::GET, url.clone()), Some(id))
            .await?;
        Self::parse(response, &url).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn create(&self, payload: &ListingPayload) -> Result<Listing, ApiError> {
        let url = self.url("houses");
        let request = self.request(Method::POST, url.clone()).json(payload);
        let response = self.send(request, None).await?;
        tracing::info!("listing created");
        Self::parse(response, &url).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] on 404, otherwise see [`ApiError`].
    pub async fn update(&self, id: i64, payload: &ListingPayload) -> Result<Listing, ApiError> {
        let url = self.url(&format!("houses/{id}"));
        let request = self.request(Method::PUT, url.clone()).json(payload);
        let response = self.send(request, Some(id)).await?;
        tracing::info!(listing_id = id, "listing updated");
        Self::parse(response, &url).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] on 404, otherwise see [`ApiError`].
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("houses/{id}"));
        self.send(self.request(Method::DELETE, url), Some(id))
            .await?;
        tracing::info!(listing_id = id, "listing deleted");
        Ok(())
    }

    fn url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("{}{}", self.base_url.path(), path));
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.client.request(method, url);
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and maps non-2xx statuses onto [`ApiError`].
    async fn send(&self, request: RequestBuilder, id: Option<i64>) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("backend rejected session token; clearing it");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(ApiError::NotFound(id));
            }
        }

        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(response: Response, url: &Url) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_under_base_path() {
        let client = ListingClient::new("http://localhost:8080/api/", 10, Session::anonymous())
            .expect("client construction should not fail");
        assert_eq!(
            client.url("houses/3").as_str(),
            "http://localhost:8080/api/houses/3"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = ListingClient::new("not a url", 10, Session::anonymous());
        assert!(matches!(result, Err(ApiError::InvalidBaseUrl { .. })));
    }
}
