use std::fmt;

/// The three navigable views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Movie listing, optionally with the `search` query mirrored from state
    Listing { search: Option<String> },
    Detail { id: u64 },
    Watchlist,
}

impl Route {
    /// Parse a location such as `/`, `/?search=dune`, `/movie/42` or `/watchlist`.
    pub fn parse(location: &str) -> Option<Self> {
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (location, None),
        };
        let path = path.trim_end_matches('/');

        match path.split('/').collect::<Vec<_>>().as_slice() {
            [""] => Some(Route::Listing {
                search: query.and_then(search_param),
            }),
            ["", "watchlist"] => Some(Route::Watchlist),
            ["", "movie", id] => id.parse().ok().map(|id| Route::Detail { id }),
            _ => None,
        }
    }

    /// The search query this route asks for; empty when none.
    pub fn search_query(&self) -> &str {
        match self {
            Route::Listing { search: Some(q) } => q,
            _ => "",
        }
    }
}

fn search_param(query: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "search")
        .and_then(|(_, value)| urlencoding::decode(&value.replace('+', " ")).ok().map(|v| v.into_owned()))
        .filter(|v| !v.is_empty())
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Listing { search: Some(q) } if !q.is_empty() => {
                write!(f, "/?search={}", urlencoding::encode(q))
            }
            Route::Listing { .. } => write!(f, "/"),
            Route::Detail { id } => write!(f, "/movie/{}", id),
            Route::Watchlist => write!(f, "/watchlist"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Listing { search: None }));
        assert_eq!(Route::parse(""), Some(Route::Listing { search: None }));
        assert_eq!(Route::parse("/watchlist"), Some(Route::Watchlist));
        assert_eq!(Route::parse("/movie/438631"), Some(Route::Detail { id: 438631 }));
        assert_eq!(Route::parse("/movie/abc"), None);
        assert_eq!(Route::parse("/tv/1"), None);
    }

    #[test]
    fn test_search_param_roundtrip() {
        let route = Route::Listing { search: Some("the matrix & co".to_string()) };
        let location = route.to_string();
        assert_eq!(location, "/?search=the%20matrix%20%26%20co");
        assert_eq!(Route::parse(&location), Some(route.clone()));
        assert_eq!(route.search_query(), "the matrix & co");
    }

    #[test]
    fn test_empty_search_param_is_plain_listing() {
        assert_eq!(Route::parse("/?search="), Some(Route::Listing { search: None }));
        assert_eq!(Route::parse("/?page=2&search=dune+part+two").unwrap().search_query(), "dune part two");
        assert_eq!(Route::Listing { search: Some(String::new()) }.to_string(), "/");
    }
}
