use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A movie as returned by the catalog's listing and search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// One page of a paginated catalog listing (popular or search).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MoviePage {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    #[serde(default = "default_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

/// Full movie record from `/movie/{id}?append_to_response=credits`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub credits: Option<Credits>,
}

impl MovieDetail {
    /// The first `limit` cast members in billing order.
    pub fn top_billed_cast(&self, limit: usize) -> &[CastMember] {
        match &self.credits {
            Some(credits) => &credits.cast[..credits.cast.len().min(limit)],
            None => &[],
        }
    }

    /// Year parsed from `release_date` (`YYYY-MM-DD`). Empty or malformed dates yield `None`.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(|d| d.year())
    }
}
