//! Administrative district hierarchy endpoint.

use estate_core::RegionNode;

use crate::client::AmapClient;
use crate::error::AmapError;
use crate::types::DistrictResponse;

/// Root keyword for the whole country.
const COUNTRY_KEYWORD: &str = "中国";

/// Province, city and district levels below the country node.
const SUBDISTRICT_DEPTH: &str = "3";

impl AmapClient {
    /// Fetches the province → city → district hierarchy for the whole country.
    ///
    /// Returns the children of the country node, converted to [`RegionNode`]s
    /// in provider order. An empty vector means the country node had no
    /// provinces; callers decide whether that is worth reporting.
    ///
    /// # Errors
    ///
    /// - [`AmapError::ApiError`] if the API returns a non-success status.
    /// - [`AmapError::EmptyResult`] if the top-level district list is empty.
    /// - [`AmapError::Http`] on network failure or non-2xx HTTP status.
    /// - [`AmapError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn fetch_district_tree(&self) -> Result<Vec<RegionNode>, AmapError> {
        let url = self.build_url(
            "v3/config/district",
            &[
                ("keywords", COUNTRY_KEYWORD),
                ("subdistrict", SUBDISTRICT_DEPTH),
            ],
        );
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        let response: DistrictResponse =
            serde_json::from_value(body).map_err(|e| AmapError::Deserialize {
                context: format!("district(keywords={COUNTRY_KEYWORD})"),
                source: e,
            })?;

        let Some(country) = response.districts.into_iter().next() else {
            return Err(AmapError::EmptyResult(format!(
                "district(keywords={COUNTRY_KEYWORD})"
            )));
        };

        tracing::debug!(
            root = %country.name,
            provinces = country.districts.len(),
            "fetched district hierarchy"
        );

        Ok(country.districts.into_iter().map(RegionNode::from).collect())
    }
}
