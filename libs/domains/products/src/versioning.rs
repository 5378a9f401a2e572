//! API version negotiation for the products endpoints.

use std::fmt;
use std::str::FromStr;

use axum::{
    extract::FromRequestParts,
    http::{HeaderName, HeaderValue, Method, request::Parts},
    response::Response,
};
use axum_extra::extract::Query;
use axum_helpers::API_VERSION_HEADER;
use serde::Deserialize;

use crate::error::ProductError;
use crate::query::ProductScope;

/// Query parameter carrying the requested version
pub const API_VERSION_PARAM: &str = "api-version";

/// Response header listing every version this API serves
pub const SUPPORTED_VERSIONS_HEADER: &str = "api-supported-versions";

pub const SUPPORTED_VERSIONS: &str = "1.0, 2.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersion {
    #[default]
    V1,
    V2,
}

impl ApiVersion {
    /// Base collection the listing starts from
    pub fn scope(self) -> ProductScope {
        match self {
            ApiVersion::V1 => ProductScope::All,
            ApiVersion::V2 => ProductScope::AvailableOnly,
        }
    }

    /// HTTP method that triggers batch delete
    pub fn batch_delete_method(self) -> Method {
        match self {
            ApiVersion::V1 => Method::DELETE,
            ApiVersion::V2 => Method::POST,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiVersion::V1 => write!(f, "1.0"),
            ApiVersion::V2 => write!(f, "2.0"),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "1.0" => Ok(ApiVersion::V1),
            "2" | "2.0" => Ok(ApiVersion::V2),
            other => Err(ProductError::UnsupportedVersion(other.to_string())),
        }
    }
}

#[derive(Deserialize)]
struct VersionParam {
    #[serde(rename = "api-version", default)]
    api_version: Vec<String>,
}

/// Every repeated `api-version` value must name the same version
fn agreed_version(values: &[String]) -> Result<Option<ApiVersion>, ProductError> {
    let mut agreed = None;
    for raw in values {
        let version: ApiVersion = raw.parse()?;
        match agreed {
            Some(seen) if seen != version => {
                return Err(ProductError::UnsupportedVersion(values.join(", ")));
            }
            _ => agreed = Some(version),
        }
    }
    Ok(agreed)
}

/// Resolves the version from `?api-version=`, then the `X-API-Version`
/// header, defaulting to 1.0.
impl<S> FromRequestParts<S> for ApiVersion
where
    S: Send + Sync,
{
    type Rejection = ProductError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(param) = Query::<VersionParam>::from_request_parts(parts, state)
            .await
            .map_err(|e| ProductError::UnsupportedVersion(e.body_text()))?;

        if let Some(version) = agreed_version(&param.api_version)? {
            return Ok(version);
        }

        match parts.headers.get(API_VERSION_HEADER) {
            Some(value) => value
                .to_str()
                .map_err(|_| ProductError::UnsupportedVersion("<non-ascii>".to_string()))?
                .parse(),
            None => Ok(ApiVersion::default()),
        }
    }
}

/// Adds the supported-versions header to every products response
pub async fn report_api_versions(mut response: Response) -> Response {
    response.headers_mut().insert(
        HeaderName::from_static(SUPPORTED_VERSIONS_HEADER),
        HeaderValue::from_static(SUPPORTED_VERSIONS),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn resolve(request: Request<()>) -> Result<ApiVersion, ProductError> {
        let (mut parts, _) = request.into_parts();
        ApiVersion::from_request_parts(&mut parts, &()).await
    }

    #[test]
    fn test_parse_accepted_spellings() {
        assert_eq!("1".parse::<ApiVersion>().unwrap(), ApiVersion::V1);
        assert_eq!("1.0".parse::<ApiVersion>().unwrap(), ApiVersion::V1);
        assert_eq!("2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
        assert_eq!("2.0".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
        assert!("3.0".parse::<ApiVersion>().is_err());
        assert!("".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_version_semantics() {
        assert_eq!(ApiVersion::V1.scope(), ProductScope::All);
        assert_eq!(ApiVersion::V2.scope(), ProductScope::AvailableOnly);
        assert_eq!(ApiVersion::V1.batch_delete_method(), Method::DELETE);
        assert_eq!(ApiVersion::V2.batch_delete_method(), Method::POST);
        assert_eq!(ApiVersion::V2.to_string(), "2.0");
    }

    #[tokio::test]
    async fn test_defaults_to_v1() {
        let request = Request::builder().uri("/products?page=2").body(()).unwrap();
        assert_eq!(resolve(request).await.unwrap(), ApiVersion::V1);
    }

    #[tokio::test]
    async fn test_reads_query_parameter() {
        let request = Request::builder()
            .uri("/products?api-version=2.0")
            .body(())
            .unwrap();
        assert_eq!(resolve(request).await.unwrap(), ApiVersion::V2);
    }

    #[tokio::test]
    async fn test_falls_back_to_header() {
        let request = Request::builder()
            .uri("/products")
            .header("X-API-Version", "2")
            .body(())
            .unwrap();
        assert_eq!(resolve(request).await.unwrap(), ApiVersion::V2);
    }

    #[tokio::test]
    async fn test_query_wins_over_header() {
        let request = Request::builder()
            .uri("/products?api-version=1")
            .header("X-API-Version", "2")
            .body(())
            .unwrap();
        assert_eq!(resolve(request).await.unwrap(), ApiVersion::V1);
    }

    #[tokio::test]
    async fn test_repeated_query_parameter_must_agree() {
        let request = Request::builder()
            .uri("/products?api-version=2&api-version=2.0")
            .body(())
            .unwrap();
        assert_eq!(resolve(request).await.unwrap(), ApiVersion::V2);

        let request = Request::builder()
            .uri("/products?api-version=2&api-version=1")
            .header("X-API-Version", "2")
            .body(())
            .unwrap();
        assert!(matches!(
            resolve(request).await,
            Err(ProductError::UnsupportedVersion(v)) if v == "2, 1"
        ));
    }

    #[tokio::test]
    async fn test_unknown_version_is_rejected() {
        let request = Request::builder()
            .uri("/products?api-version=9.9")
            .body(())
            .unwrap();
        assert!(matches!(
            resolve(request).await,
            Err(ProductError::UnsupportedVersion(v)) if v == "9.9"
        ));
    }
}
