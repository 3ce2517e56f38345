//! The HTTP client for the paged transactions endpoint, and the
//! [TransactionSource] seam that lets the fetch coordinator be tested
//! without a network.

use async_trait::async_trait;
use serde::Deserialize;

use crate::{Error, pagination::Page, pagination::PageQuery, transaction::Transaction};

/// The response header carrying the total item count in the array-shaped
/// backend response.
const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// Serves pages of transactions.
///
/// The production implementation is [TransactionApiClient]; tests substitute
/// an in-memory source.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch one page of transactions described by `query`.
    async fn get_transactions(&self, query: &PageQuery) -> Result<Page, Error>;
}

/// A read-only client for one transactions collection endpoint.
pub struct TransactionApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl TransactionApiClient {
    /// Create a client for the transactions API at `base_url`,
    /// e.g. `https://api.example.com`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl TransactionSource for TransactionApiClient {
    async fn get_transactions(&self, query: &PageQuery) -> Result<Page, Error> {
        let url = format!(
            "{}/transactions?{}",
            self.base_url,
            query.to_query_string()?
        );
        tracing::debug!("GET {url}");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|error| Error::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(status.as_u16()));
        }

        // The header must be read before the body consumes the response.
        let total_count = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|text| text.parse::<u64>().ok());

        let body = response
            .text()
            .await
            .map_err(|error| Error::Transport(error.to_string()))?;

        parse_page_body(&body, total_count, query)
    }
}

/// The two response shapes the backend may serve: an object carrying the
/// pagination metadata, or a bare array paired with a total count header.
#[derive(Deserialize)]
#[serde(untagged)]
enum PageBody {
    Object(Page),
    Array(Vec<Transaction>),
}

fn parse_page_body(body: &str, total_count: Option<u64>, query: &PageQuery) -> Result<Page, Error> {
    let parsed: PageBody =
        serde_json::from_str(body).map_err(|error| Error::Decode(error.to_string()))?;

    match parsed {
        PageBody::Object(page) => Ok(page),
        PageBody::Array(data) => {
            let total_items = total_count.ok_or_else(|| {
                Error::Decode(format!(
                    "array response without a {TOTAL_COUNT_HEADER} header"
                ))
            })?;

            Ok(Page::from_header_shape(
                data,
                total_items,
                query.page,
                query.per_page,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        pagination::{PageQuery, SORT_NEWEST_FIRST},
    };

    use super::parse_page_body;

    fn query(page: u32) -> PageQuery {
        PageQuery {
            page,
            per_page: 10,
            sort: SORT_NEWEST_FIRST,
            type_filter: None,
            merchant: None,
        }
    }

    const TRANSACTION_JSON: &str = r#"{
        "id": "1",
        "merchant": "Starbucks",
        "amount": -450.0,
        "date": "2024-01-15T10:30:00Z",
        "category": "Food & Drink",
        "type": "expense"
    }"#;

    #[test]
    fn parses_object_shape() {
        let body = format!(
            r#"{{
                "data": [{TRANSACTION_JSON}],
                "first": 1,
                "prev": null,
                "next": 2,
                "last": 3,
                "pages": 3,
                "items": 25
            }}"#
        );

        let got = parse_page_body(&body, None, &query(1)).unwrap();

        assert_eq!(got.data.len(), 1);
        assert_eq!(got.next, Some(2));
        assert_eq!(got.items, 25);
    }

    #[test]
    fn parses_array_shape_with_total_count() {
        let body = format!("[{TRANSACTION_JSON}]");

        let got = parse_page_body(&body, Some(25), &query(2)).unwrap();

        assert_eq!(got.data.len(), 1);
        assert_eq!(got.pages, 3);
        assert_eq!(got.next, Some(3));
        assert_eq!(got.prev, Some(1));
    }

    #[test]
    fn array_shape_without_total_count_is_a_decode_error() {
        let got = parse_page_body("[]", None, &query(1));

        assert_eq!(
            got,
            Err(Error::Decode(
                "array response without a X-Total-Count header".to_owned()
            ))
        );
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let got = parse_page_body("<html>502 Bad Gateway</html>", None, &query(1));

        assert!(matches!(got, Err(Error::Decode(_))));
    }
}
