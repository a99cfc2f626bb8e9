use estate_amap::AmapError;
use thiserror::Error;

/// Failure of an external provider: region hierarchy, geocoder, or map SDK.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider could not be reached, or refused to load.
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    /// The provider answered, but without usable data.
    #[error("provider returned no usable data: {0}")]
    EmptyOrMalformed(String),
}

impl From<AmapError> for ProviderError {
    fn from(err: AmapError) -> Self {
        match err {
            AmapError::Http(e) => ProviderError::Unreachable(e.to_string()),
            other => ProviderError::EmptyOrMalformed(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum LocationError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("region selector is still loading")]
    SelectorLoading,

    #[error("{province}/{city}/{district} is not a path in the region hierarchy")]
    InvalidSelection {
        province: String,
        city: String,
        district: String,
    },

    #[error("listing submission failed: {0}")]
    Submit(#[from] estate_api::ApiError),
}
