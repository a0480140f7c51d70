//! Query-string parameters for the outfit endpoints.
//!
//! Values arrive as raw strings so malformed numbers surface as
//! `VALIDATION_ERROR` responses instead of extractor rejections.

use serde::Deserialize;
use wardrobe_core::error::CoreError;
use wardrobe_core::listing::ListingQuery;
use wardrobe_core::outfit::Rating;
use wardrobe_core::ranking::PageRequest;
use wardrobe_core::suggestion::SuggestionQuery;
use wardrobe_core::virtual_tags::TagFilter;

/// `?page=&size=&tagId=` for `GET /users/{user_id}/outfits/suggestions`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub tag_id: Option<String>,
}

/// `?page=&size=&tagId=&minRating=` for `GET /users/{user_id}/outfits`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub tag_id: Option<String>,
    pub min_rating: Option<String>,
}

impl TryFrom<SuggestionParams> for SuggestionQuery {
    type Error = CoreError;

    fn try_from(params: SuggestionParams) -> Result<Self, Self::Error> {
        Ok(Self {
            page: page_request(params.page.as_deref(), params.size.as_deref())?,
            tag_filter: tag_filter(params.tag_id.as_deref())?,
        })
    }
}

impl TryFrom<ListingParams> for ListingQuery {
    type Error = CoreError;

    fn try_from(params: ListingParams) -> Result<Self, Self::Error> {
        let min_rating = match parse_int("minRating", params.min_rating.as_deref())? {
            None => Rating::Miss,
            Some(raw) => i16::try_from(raw)
                .map_err(|e| e.to_string())
                .and_then(Rating::try_from)
                .map_err(|_| {
                    CoreError::Validation(format!("minRating must be 0, 1 or 2, got {raw}"))
                })?,
        };

        Ok(Self {
            page: page_request(params.page.as_deref(), params.size.as_deref())?,
            tag_filter: tag_filter(params.tag_id.as_deref())?,
            min_rating,
        })
    }
}

fn page_request(page: Option<&str>, size: Option<&str>) -> Result<PageRequest, CoreError> {
    PageRequest::from_params(parse_int("page", page)?, parse_int("size", size)?)
}

/// An absent or blank `tagId` means no tag filter.
fn tag_filter(raw: Option<&str>) -> Result<Option<TagFilter>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) => TagFilter::parse(id).map(Some),
    }
}

fn parse_int(name: &str, raw: Option<&str>) -> Result<Option<i64>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| CoreError::Validation(format!("{name} must be an integer, got '{value}'"))),
    }
}
