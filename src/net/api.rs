use serde::Deserialize;

/// Default endpoint of the remote search service.
pub const API_BASE: &str = "https://hn.algolia.com/api/v1";

pub const API_SEARCH: &str = "/search";
pub const PARAM_SEARCH: &str = "query=";
pub const PARAM_PAGE: &str = "page=";

/// One search hit as returned by the remote API.
///
/// Real responses occasionally omit titles, urls, or authors; those fields
/// default to empty strings rather than failing the whole page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Story {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub num_comments: u32,
    #[serde(default)]
    pub points: u32,
}

/// Body of a successful search response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub hits: Vec<Story>,
    pub page: u32,
}

/// Builds the request URL for one term/page pair.
///
/// The format is fixed and order-dependent: the page parameter is always
/// last, which is what `extract_term` relies on.
pub fn build_url(base: &str, term: &str, page: u32) -> String {
    format!(
        "{}{}?{}{}&{}{}",
        base, API_SEARCH, PARAM_SEARCH, term, PARAM_PAGE, page
    )
}

/// Recovers the query term from a URL produced by `build_url`: the substring
/// strictly between the last `?` and the last `&`, minus the `query=` prefix.
///
/// Only defined for `build_url` output. Malformed input is a caller bug and
/// the result is unspecified.
pub fn extract_term(url: &str) -> &str {
    let start = url.rfind('?').map(|i| i + 1).unwrap_or(0);
    let end = url.rfind('&').unwrap_or(url.len());
    let raw = &url[start..end];
    raw.strip_prefix(PARAM_SEARCH).unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_format() {
        assert_eq!(
            build_url(API_BASE, "React", 0),
            "https://hn.algolia.com/api/v1/search?query=React&page=0"
        );
        assert_eq!(
            build_url("http://localhost:8080", "rust", 7),
            "http://localhost:8080/search?query=rust&page=7"
        );
    }

    #[test]
    fn test_extract_term_round_trip() {
        for term in ["React", "rust async", "c++"] {
            for page in [0, 1, 42] {
                let url = build_url(API_BASE, term, page);
                assert_eq!(extract_term(&url), term);
            }
        }
    }

    #[test]
    fn test_story_decoding() {
        let body = r#"{
            "hits": [
                {"objectID": "1", "title": "React", "url": "https://reactjs.org/",
                 "author": "Jordan Walke", "num_comments": 3, "points": 4},
                {"objectID": "2", "author": "nobody"}
            ],
            "page": 0,
            "nbPages": 50
        }"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.page, 0);
        assert_eq!(response.hits.len(), 2);
        assert_eq!(response.hits[0].object_id, "1");
        assert_eq!(response.hits[0].num_comments, 3);
        assert_eq!(response.hits[1].title, "");
        assert_eq!(response.hits[1].points, 0);
    }
}
