use filmhorizon_models::{MovieDetail, MoviePage};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::error::CatalogError;

/// Connection parameters shared by every catalog call.
#[derive(Debug, Clone)]
pub struct ApiContext {
    pub base_url: String,
    pub api_key: String,
    pub language: String,
}

/// Error body returned by the catalog (`{"status_code": 7, "status_message": "..."}`)
#[derive(Debug, Deserialize)]
struct TmdbErrorBody {
    #[serde(default)]
    status_message: Option<String>,
}

fn build_url(ctx: &ApiContext, path: &str, params: &[(&str, String)]) -> Result<Url, CatalogError> {
    let base = format!("{}/{}", ctx.base_url.trim_end_matches('/'), path.trim_start_matches('/'));
    let mut query: Vec<(&str, String)> = vec![("api_key", ctx.api_key.clone())];
    query.extend(params.iter().cloned());
    Url::parse_with_params(&base, &query).map_err(|e| CatalogError::InvalidUrl(e.to_string()))
}

pub fn popular_url(ctx: &ApiContext, page: u32) -> Result<Url, CatalogError> {
    build_url(
        ctx,
        "movie/popular",
        &[("language", ctx.language.clone()), ("page", page.to_string())],
    )
}

pub fn search_url(ctx: &ApiContext, query: &str, page: u32) -> Result<Url, CatalogError> {
    build_url(
        ctx,
        "search/movie",
        &[("query", query.to_string()), ("page", page.to_string())],
    )
}

pub fn detail_url(ctx: &ApiContext, id: u64) -> Result<Url, CatalogError> {
    build_url(
        ctx,
        &format!("movie/{}", id),
        &[("append_to_response", "credits".to_string())],
    )
}

async fn get_text(client: &Client, url: Url, not_found_id: Option<u64>) -> Result<String, CatalogError> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    Err(status_error(status, body, not_found_id))
}

/// Map a non-success response to a [`CatalogError`].
///
/// 401 is always an invalid key. 404 only means `NotFound` for detail lookups;
/// anything else keeps the catalog's `status_message`, or the raw body when it
/// is not JSON.
fn status_error(status: StatusCode, body: String, not_found_id: Option<u64>) -> CatalogError {
    match (status, not_found_id) {
        (StatusCode::UNAUTHORIZED, _) => CatalogError::InvalidApiKey,
        (StatusCode::NOT_FOUND, Some(id)) => CatalogError::NotFound(id),
        _ => {
            let message = serde_json::from_str::<TmdbErrorBody>(&body)
                .ok()
                .and_then(|b| b.status_message)
                .unwrap_or(body);
            CatalogError::Status {
                status: status.as_u16(),
                message,
            }
        }
    }
}

/// Fetch one page of popular movies
pub async fn get_popular(client: &Client, ctx: &ApiContext, page: u32) -> Result<MoviePage, CatalogError> {
    let url = popular_url(ctx, page)?;
    debug!(operation = "catalog_popular", page, "Fetching popular movies");
    let body = get_text(client, url, None).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Search movies by title
pub async fn search_movies(
    client: &Client,
    ctx: &ApiContext,
    query: &str,
    page: u32,
) -> Result<MoviePage, CatalogError> {
    let url = search_url(ctx, query, page)?;
    debug!(operation = "catalog_search", query, page, "Searching movies");
    let body = get_text(client, url, None).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Fetch a movie with its credits appended
pub async fn get_movie_detail(client: &Client, ctx: &ApiContext, id: u64) -> Result<MovieDetail, CatalogError> {
    let url = detail_url(ctx, id)?;
    debug!(operation = "catalog_detail", movie_id = id, "Fetching movie detail");
    let body = get_text(client, url, Some(id)).await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ApiContext {
        ApiContext {
            base_url: "https://api.themoviedb.org/3/".to_string(),
            api_key: "k3y".to_string(),
            language: "en-US".to_string(),
        }
    }

    #[test]
    fn test_popular_url() {
        let url = popular_url(&ctx(), 2).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/movie/popular?api_key=k3y&language=en-US&page=2"
        );
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = search_url(&ctx(), "the matrix & co", 1).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(url.path(), "/3/search/movie");
        assert!(pairs.contains(&("query".to_string(), "the matrix & co".to_string())));
        assert!(pairs.contains(&("page".to_string(), "1".to_string())));
        assert!(!url.as_str().contains("matrix & co"));
    }

    #[test]
    fn test_detail_url_appends_credits() {
        let url = detail_url(&ctx(), 438631).unwrap();
        assert_eq!(url.path(), "/3/movie/438631");
        assert!(url.as_str().ends_with("append_to_response=credits"));
    }

    #[test]
    fn test_invalid_base_url() {
        let mut bad = ctx();
        bad.base_url = "not a url".to_string();
        assert!(matches!(popular_url(&bad, 1), Err(CatalogError::InvalidUrl(_))));
    }

    #[test]
    fn test_status_error_unauthorized_is_invalid_key() {
        let body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key."}"#;
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, body.to_string(), None),
            CatalogError::InvalidApiKey
        ));
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, String::new(), Some(42)),
            CatalogError::InvalidApiKey
        ));
    }

    #[test]
    fn test_status_error_not_found_only_for_detail() {
        let body = r#"{"status_code":34,"status_message":"The resource you requested could not be found."}"#;
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, body.to_string(), Some(438631)),
            CatalogError::NotFound(438631)
        ));
        match status_error(StatusCode::NOT_FOUND, body.to_string(), None) {
            CatalogError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "The resource you requested could not be found.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_status_error_uses_status_message() {
        let body = r#"{"status_code":25,"status_message":"Your request count (41) is over the allowed limit of 40."}"#;
        match status_error(StatusCode::TOO_MANY_REQUESTS, body.to_string(), None) {
            CatalogError::Status { status, message } => {
                assert_eq!(status, 429);
                assert!(message.starts_with("Your request count"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_status_error_falls_back_to_raw_body() {
        let body = "<html>Bad Gateway</html>";
        match status_error(StatusCode::BAD_GATEWAY, body.to_string(), Some(1)) {
            CatalogError::Status { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, body);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
