//! Full volume details for the book page.
//!
//! Catalogue data arrives loosely formatted; [`BookDetails::normalized`]
//! applies the display rules: secure image links, canonical "more info"
//! links, and genres derived from the category paths.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::{upgrade_optional, BookId};

const PLAY_STORE_HOST: &str = "play.google.com";

static GENRE_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Fantasy & Magic", "Fantasy"),
        ("Fantasy / General", "Fantasy"),
        ("Fantasy / Contemporary", "Fantasy"),
        ("Fantasy / Wizards & Witches", "Fantasy"),
        ("Action & Adventure", "Adventure"),
        ("School & Education", "Children's literature"),
        ("Juvenile Fiction", "Children's literature"),
        ("Young Adult Fiction", "Young Adult"),
    ])
});

/// Cover images in increasing resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
}

impl ImageLinks {
    fn secured(self) -> Self {
        Self {
            small_thumbnail: upgrade_optional(self.small_thumbnail.as_deref()),
            thumbnail: upgrade_optional(self.thumbnail.as_deref()),
            medium: upgrade_optional(self.medium.as_deref()),
            large: upgrade_optional(self.large.as_deref()),
        }
    }
}

/// Volume details shown on the book page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    pub id: BookId,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_links: Option<ImageLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl BookDetails {
    /// Creates details with only the required fields set.
    pub fn new(id: BookId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            authors: Vec::new(),
            image_links: None,
            description: None,
            page_count: None,
            average_rating: None,
            ratings_count: None,
            info_link: None,
            preview_link: None,
            publisher: None,
            published_date: None,
            categories: Vec::new(),
            language: None,
            isbn: None,
            genres: Vec::new(),
        }
    }

    /// Applies display normalization: https images, canonical info link, genres.
    pub fn normalized(mut self) -> Self {
        self.image_links = self.image_links.map(ImageLinks::secured);
        self.info_link = self.info_link.as_deref().map(canonical_info_link);
        self.genres = extract_genres(&self.categories);
        self
    }
}

/// Rewrites Play Store links to the Google Books edition page.
///
/// `https://play.google.com/store/books/details?id=XYZ` becomes
/// `https://www.google.com/books/edition/_/XYZ?hl=en`. Links without an `id`
/// parameter, and links to other hosts, are kept as-is.
pub fn canonical_info_link(link: &str) -> String {
    if !link.contains(PLAY_STORE_HOST) {
        return link.to_string();
    }
    match query_param(link, "id") {
        Some(id) => format!("https://www.google.com/books/edition/_/{}?hl=en", id),
        None => link.to_string(),
    }
}

fn query_param<'a>(url: &'a str, key: &str) -> Option<&'a str> {
    let query = url.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, v)| *k == key && !v.is_empty())
        .map(|(_, v)| v)
}

/// Derives display genres from catalogue category paths.
///
/// Each category is split on `/`; every part, and every `"{part} / {other}"`
/// pairing of parts, is looked up in the genre table. Result order is
/// first-seen, without duplicates.
pub fn extract_genres(categories: &[String]) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    let mut push = |genre: &str| {
        if !genres.iter().any(|g| g == genre) {
            genres.push(genre.to_string());
        }
    };

    for category in categories {
        let parts: Vec<&str> = category.split('/').map(str::trim).collect();
        for part in &parts {
            if let Some(genre) = GENRE_MAP.get(part) {
                push(genre);
            }
            for other in &parts {
                let combined = format!("{} / {}", part, other);
                if let Some(genre) = GENRE_MAP.get(combined.as_str()) {
                    push(genre);
                }
            }
        }
    }

    genres
}
