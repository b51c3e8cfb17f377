//! Search result entry.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{upgrade_optional, BookId};

/// One search hit as shown in the results grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: BookId,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl BookSummary {
    /// Creates a summary, upgrading the thumbnail to https.
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        authors: Vec<String>,
        thumbnail_url: Option<&str>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            authors,
            thumbnail_url: upgrade_optional(thumbnail_url),
        }
    }

    /// Returns the summary with its thumbnail forced onto https.
    pub fn into_secure(mut self) -> Self {
        self.thumbnail_url = upgrade_optional(self.thumbnail_url.as_deref());
        self
    }
}
