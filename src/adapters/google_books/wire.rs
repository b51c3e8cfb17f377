//! Google Books `volumes` payloads and their mapping to domain types.

use serde::Deserialize;

use crate::domain::book::{BookDetails, BookSummary, ImageLinks};
use crate::domain::foundation::BookId;
use crate::ports::BookSearchError;

/// `GET /volumes` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VolumeList {
    #[serde(default)]
    pub items: Vec<Volume>,
}

/// `GET /volumes/{id}` response, also the element of [`VolumeList`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Volume {
    pub id: String,
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VolumeInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub image_links: Option<ImageLinks>,
    pub description: Option<String>,
    pub page_count: Option<u32>,
    pub average_rating: Option<f64>,
    pub ratings_count: Option<u32>,
    pub info_link: Option<String>,
    pub preview_link: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
}

#[derive(Debug, Deserialize)]
pub(super) struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

impl Volume {
    fn book_id(&self) -> Result<BookId, BookSearchError> {
        BookId::new(self.id.as_str())
            .map_err(|e| BookSearchError::Parse(format!("volume without id: {}", e)))
    }

    pub fn into_summary(self) -> Result<BookSummary, BookSearchError> {
        let id = self.book_id()?;
        let info = self.volume_info;
        let thumbnail = info.image_links.as_ref().and_then(|links| links.thumbnail.as_deref());
        Ok(BookSummary::new(id, info.title, info.authors, thumbnail))
    }

    /// Maps the volume; callers still apply `BookDetails::normalized`.
    pub fn into_details(self) -> Result<BookDetails, BookSearchError> {
        let id = self.book_id()?;
        let info = self.volume_info;
        let isbn = info
            .industry_identifiers
            .iter()
            .find(|ident| ident.kind == "ISBN_13")
            .map(|ident| ident.identifier.clone());

        let mut details = BookDetails::new(id, info.title);
        details.authors = info.authors;
        details.image_links = info.image_links;
        details.description = info.description;
        details.page_count = info.page_count;
        details.average_rating = info.average_rating;
        details.ratings_count = info.ratings_count;
        details.info_link = info.info_link;
        details.preview_link = info.preview_link;
        details.publisher = info.publisher;
        details.published_date = info.published_date;
        details.categories = info.categories;
        details.language = info.language;
        details.isbn = isbn;
        Ok(details)
    }
}
