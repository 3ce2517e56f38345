//! This module defines the common functionality for paging transactions:
//! the query parameters a page is requested with and the page response
//! shape, including deriving pagination metadata when the backend only
//! supplies a total count header.

use serde::{Deserialize, Serialize};

use crate::{Error, transaction::Transaction, transaction::TransactionType};

/// The sort token for newest-date-first ordering.
pub const SORT_NEWEST_FIRST: &str = "-date";

/// The parameters one page of transactions is requested with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageQuery {
    /// The 1-based page number to fetch.
    pub page: u32,
    /// How many transactions to return per page.
    pub per_page: u32,
    /// The sort specification, e.g. [SORT_NEWEST_FIRST].
    pub sort: &'static str,
    /// Only return transactions of this type. Omitted for "all".
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_filter: Option<TransactionType>,
    /// Only return transactions whose merchant contains this substring.
    /// Omitted when no search is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
}

impl PageQuery {
    /// Encode the query with the fixed wire key names
    /// (`page`, `per_page`, `sort`, `type`, `merchant`).
    pub fn to_query_string(&self) -> Result<String, Error> {
        serde_urlencoded::to_string(self).map_err(|error| Error::QueryEncode(error.to_string()))
    }
}

/// One page of transactions plus the metadata needed to page further.
///
/// This is the object shape served by the paged transactions endpoint. The
/// alternate array-plus-header backend shape is converted into this via
/// [Page::from_header_shape].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    /// The transactions on this page, in request order.
    pub data: Vec<Transaction>,
    /// The first page number.
    pub first: u32,
    /// The previous page number, if this is not the first page.
    pub prev: Option<u32>,
    /// The next page number, if this is not the last page.
    pub next: Option<u32>,
    /// The last page number.
    pub last: u32,
    /// The total page count.
    pub pages: u32,
    /// The total number of items across all pages.
    pub items: u64,
}

impl Page {
    /// Build a page from the array-shaped backend response: a bare list of
    /// transactions plus a total item count carried in a response header.
    ///
    /// The page count is the ceiling of `total_items / per_page`. A total
    /// of zero items yields a well-formed page with no data, `last` = 0 and
    /// no next page.
    pub fn from_header_shape(
        data: Vec<Transaction>,
        total_items: u64,
        page: u32,
        per_page: u32,
    ) -> Self {
        let pages = total_items.div_ceil(u64::from(per_page.max(1))) as u32;

        Self {
            data,
            first: 1,
            prev: if page > 1 { Some(page - 1) } else { None },
            next: if page < pages { Some(page + 1) } else { None },
            last: pages,
            pages,
            items: total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::transaction::TransactionType;

    use super::{Page, PageQuery, SORT_NEWEST_FIRST};

    #[test]
    fn query_string_omits_absent_filters() {
        let query = PageQuery {
            page: 1,
            per_page: 10,
            sort: SORT_NEWEST_FIRST,
            type_filter: None,
            merchant: None,
        };

        let got = query.to_query_string().unwrap();

        assert_eq!(got, "page=1&per_page=10&sort=-date");
    }

    #[test]
    fn query_string_includes_filters() {
        let query = PageQuery {
            page: 2,
            per_page: 10,
            sort: SORT_NEWEST_FIRST,
            type_filter: Some(TransactionType::Income),
            merchant: Some("Starbucks".to_owned()),
        };

        let got = query.to_query_string().unwrap();

        assert_eq!(
            got,
            "page=2&per_page=10&sort=-date&type=income&merchant=Starbucks"
        );
    }

    #[test]
    fn query_string_encodes_special_characters() {
        let query = PageQuery {
            page: 1,
            per_page: 10,
            sort: SORT_NEWEST_FIRST,
            type_filter: None,
            merchant: Some("McDonald's & Co. #1".to_owned()),
        };

        let got = query.to_query_string().unwrap();

        assert_eq!(
            got,
            "page=1&per_page=10&sort=-date&merchant=McDonald%27s+%26+Co.+%231"
        );
    }

    #[test]
    fn page_parses_from_object_shape() {
        let json = r#"{
            "data": [],
            "first": 1,
            "prev": null,
            "next": 2,
            "last": 3,
            "pages": 3,
            "items": 25
        }"#;

        let got: Page = serde_json::from_str(json).unwrap();

        assert_eq!(got.next, Some(2));
        assert_eq!(got.prev, None);
        assert_eq!(got.pages, 3);
        assert_eq!(got.items, 25);
    }

    #[test]
    fn header_shape_derives_metadata() {
        let got = Page::from_header_shape(Vec::new(), 25, 2, 10);

        let want = Page {
            data: Vec::new(),
            first: 1,
            prev: Some(1),
            next: Some(3),
            last: 3,
            pages: 3,
            items: 25,
        };
        assert_eq!(got, want);
    }

    #[test]
    fn header_shape_last_page_has_no_next() {
        let got = Page::from_header_shape(Vec::new(), 25, 3, 10);

        assert_eq!(got.next, None);
        assert_eq!(got.prev, Some(2));
    }

    #[test]
    fn header_shape_with_zero_items_is_well_formed() {
        let got = Page::from_header_shape(Vec::new(), 0, 1, 10);

        let want = Page {
            data: Vec::new(),
            first: 1,
            prev: None,
            next: None,
            last: 0,
            pages: 0,
            items: 0,
        };
        assert_eq!(got, want);
    }

    #[test]
    fn header_shape_exact_multiple_has_no_phantom_page() {
        let got = Page::from_header_shape(Vec::new(), 20, 2, 10);

        assert_eq!(got.pages, 2);
        assert_eq!(got.next, None);
    }
}
