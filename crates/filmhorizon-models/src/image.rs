/// Which bundled placeholder stands in for a missing image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Poster,
    Cast,
}

impl PlaceholderKind {
    pub fn asset_name(&self) -> &'static str {
        match self {
            PlaceholderKind::Poster => "posterimg-fallback.jpg",
            PlaceholderKind::Cast => "cast-fallback.jpg",
        }
    }
}

/// A resolved image reference: either a remote URL or a placeholder asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Remote(String),
    Placeholder(PlaceholderKind),
}

impl ImageRef {
    /// Build `{base}/{size}{path}`, falling back to the placeholder when the path is absent or empty.
    pub fn resolve(base: &str, size: &str, path: Option<&str>, fallback: PlaceholderKind) -> Self {
        match path {
            Some(p) if !p.is_empty() => {
                ImageRef::Remote(format!("{}/{}{}", base.trim_end_matches('/'), size, p))
            }
            _ => ImageRef::Placeholder(fallback),
        }
    }

    pub fn as_display(&self) -> &str {
        match self {
            ImageRef::Remote(url) => url,
            ImageRef::Placeholder(kind) => kind.asset_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_remote() {
        let img = ImageRef::resolve("https://image.tmdb.org/t/p/", "w500", Some("/x.jpg"), PlaceholderKind::Poster);
        assert_eq!(img, ImageRef::Remote("https://image.tmdb.org/t/p/w500/x.jpg".to_string()));
    }

    #[test]
    fn test_resolve_missing_uses_placeholder() {
        assert_eq!(
            ImageRef::resolve("https://image.tmdb.org/t/p", "w500", None, PlaceholderKind::Cast),
            ImageRef::Placeholder(PlaceholderKind::Cast)
        );
        assert_eq!(
            ImageRef::resolve("https://image.tmdb.org/t/p", "w500", Some(""), PlaceholderKind::Poster).as_display(),
            "posterimg-fallback.jpg"
        );
    }
}
