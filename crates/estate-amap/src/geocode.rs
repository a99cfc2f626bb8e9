//! Forward geocoding endpoint.

use estate_core::Coordinate;

use crate::client::AmapClient;
use crate::error::AmapError;
use crate::types::GeocodeResponse;

impl AmapClient {
    /// Resolves a free-form address to candidate coordinates, best first.
    ///
    /// `city` scopes the search; `全国` searches nationwide. A success status
    /// with zero candidates yields an empty vector.
    ///
    /// # Errors
    ///
    /// - [`AmapError::ApiError`] if the API returns a non-success status.
    /// - [`AmapError::InvalidLocation`] if candidates were returned but none
    ///   has a `"lng,lat"` location. Unusable candidates next to usable ones
    ///   are skipped.
    /// - [`AmapError::Http`] on network failure or non-2xx HTTP status.
    /// - [`AmapError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn geocode(&self, address: &str, city: &str) -> Result<Vec<Coordinate>, AmapError> {
        let url = self.build_url("v3/geocode/geo", &[("address", address), ("city", city)]);
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        let response: GeocodeResponse =
            serde_json::from_value(body).map_err(|e| AmapError::Deserialize {
                context: format!("geocode(address={address})"),
                source: e,
            })?;

        let mut coordinates = Vec::with_capacity(response.geocodes.len());
        let mut first_rejected = None;
        for (index, candidate) in response.geocodes.iter().enumerate() {
            let parsed = match candidate.location.as_str() {
                Some(raw) => parse_location(raw),
                None => Err(AmapError::InvalidLocation(candidate.location.to_string())),
            };
            match parsed {
                Ok(coordinate) => coordinates.push(coordinate),
                Err(e) => {
                    tracing::warn!(%address, index, error = %e, "skipping unusable geocode candidate");
                    first_rejected.get_or_insert(e);
                }
            }
        }

        match first_rejected {
            Some(e) if coordinates.is_empty() => Err(e),
            _ => Ok(coordinates),
        }
    }
}

/// Parses AMap's `"lng,lat"` location string.
///
/// # Errors
///
/// Returns [`AmapError::InvalidLocation`] unless the input is exactly two
/// comma-separated floats.
pub fn parse_location(raw: &str) -> Result<Coordinate, AmapError> {
    let invalid = || AmapError::InvalidLocation(raw.to_string());
    let (lng, lat) = raw.split_once(',').ok_or_else(invalid)?;
    let longitude = lng.trim().parse::<f64>().map_err(|_| invalid())?;
    let latitude = lat.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok(Coordinate::new(longitude, latitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_location_reads_longitude_first() {
        let c = parse_location("121.544379,31.221517").unwrap();
        assert!((c.longitude - 121.544_379).abs() < f64::EPSILON);
        assert!((c.latitude - 31.221_517).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_location_rejects_garbage() {
        assert!(matches!(
            parse_location("121.5"),
            Err(AmapError::InvalidLocation(_))
        ));
        assert!(matches!(
            parse_location("east,north"),
            Err(AmapError::InvalidLocation(_))
        ));
        assert!(parse_location("1,2,3").is_err());
    }
}
