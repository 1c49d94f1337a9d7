//! Open Library search source implementation.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::{BookRecord, PageRequest, SearchPage};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

/// Default search endpoint
pub const OPENLIBRARY_SEARCH_URL: &str = "https://openlibrary.org/search.json";

/// Fields requested by default; everything else is dropped server side
pub const DEFAULT_FIELDS: &str = "title,author_name,first_publish_year";

/// Open Library search source
///
/// Uses the `search.json` endpoint.
#[derive(Debug, Clone)]
pub struct OpenLibrarySource {
    client: HttpClient,
    base_url: String,
}

impl OpenLibrarySource {
    /// Create a source against `base_url`, normally [`OPENLIBRARY_SEARCH_URL`]
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn parse_doc(doc: OLDoc) -> BookRecord {
        let authors = doc.author_name.unwrap_or_default();
        BookRecord::from_parts(doc.title.as_deref(), &authors, doc.first_publish_year)
    }
}

#[async_trait]
impl Source for OpenLibrarySource {
    fn id(&self) -> &str {
        "openlibrary"
    }

    fn name(&self) -> &str {
        "Open Library"
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<SearchPage, SourceError> {
        let mut params = vec![
            ("q", request.query.clone()),
            ("page", request.page.to_string()),
            ("limit", request.limit.to_string()),
        ];
        if let Some(fields) = &request.fields {
            params.push(("fields", fields.clone()));
        }

        let response = self
            .client
            .client()
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Open Library returned status: {}",
                response.status()
            )));
        }

        let body = response.text().await?;

        let data: OLSearchResponse = serde_json::from_str(&body)?;

        let books = data.docs.into_iter().map(Self::parse_doc).collect();

        Ok(SearchPage {
            books,
            num_found: data.num_found,
        })
    }
}

// ===== Open Library API Types =====

#[derive(Debug, Deserialize)]
struct OLSearchResponse {
    #[serde(default)]
    docs: Vec<OLDoc>,
    #[serde(rename = "numFound", default, deserialize_with = "lenient_count")]
    num_found: Option<u64>,
}

// A wrongly typed doc field counts as absent.
#[derive(Debug, Deserialize)]
struct OLDoc {
    #[serde(default, deserialize_with = "lenient_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient_names")]
    author_name: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_year")]
    first_publish_year: Option<i32>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// A list of names, or a single bare name; non-string entries are skipped.
fn lenient_names<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        Value::String(s) => Some(vec![s]),
        _ => None,
    })
}

/// Accept an integer, an integral float or a string of digits;
/// anything else is no year.
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() <= f64::from(i32::MAX))
                    .map(|f| f as i64)
            })
            .and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    })
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        _ => None,
    })
}
