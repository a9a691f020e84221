//! Response envelope attachments.
//!
//! List endpoints wrap their payload in an envelope type carrying optional
//! pagination metadata and hypermedia links. Synthesis always leaves both
//! absent; handlers attach them with [`ResponseEnvelope::attach_page`].

use serde::{Deserialize, Serialize};

crate::mockable! {
    /// Paging information for a list response.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PaginationMetadata {
        pub total_count: i32,
        pub page_size: i32,
        pub page_number: i32,
        pub total_pages: i32,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub first: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub last: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub next: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub prev: Option<String>,
    }
}

impl PaginationMetadata {
    /// Page metadata for `page_number` of a listing at `path`.
    ///
    /// Page links take the form `{path}?page=N`. `next` and `prev` are only
    /// set when such a page exists.
    pub fn for_page(total_count: i32, page_size: i32, page_number: i32, path: &str) -> Self {
        let total_pages = if page_size > 0 {
            (total_count.max(0) + page_size - 1) / page_size
        } else {
            0
        };
        let page = |n: i32| Some(format!("{path}?page={n}"));

        Self {
            total_count,
            page_size,
            page_number,
            total_pages,
            first: page(1),
            last: page(total_pages),
            next: if page_number < total_pages {
                page(page_number + 1)
            } else {
                None
            },
            prev: if page_number > 1 {
                page(page_number - 1)
            } else {
                None
            },
        }
    }
}

crate::mockable! {
    /// Hypermedia links for a resource.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Links {
        #[serde(rename = "self")]
        pub self_href: String,
        pub update: String,
        pub delete: String,
    }
}

impl Links {
    pub fn for_resource(path: &str) -> Self {
        Self {
            self_href: path.to_string(),
            update: format!("{path}/update"),
            delete: format!("{path}/delete"),
        }
    }
}

/// A response type with optional pagination and link attachments.
///
/// Implemented by structs declared with `mockable! { envelope ... }`.
pub trait ResponseEnvelope {
    fn pagination_mut(&mut self) -> &mut Option<PaginationMetadata>;

    fn links_mut(&mut self) -> &mut Option<Links>;

    /// Attach pagination metadata and links for a listing at `path`
    /// (`/` when `None`).
    fn attach_page(&mut self, total_count: i32, page_size: i32, page_number: i32, path: Option<&str>) {
        let path = path.unwrap_or("/");
        *self.pagination_mut() = Some(PaginationMetadata::for_page(
            total_count,
            page_size,
            page_number,
            path,
        ));
        *self.links_mut() = Some(Links::for_resource(path));
    }

    /// Remove both attachments.
    fn clear_attachments(&mut self) {
        *self.pagination_mut() = None;
        *self.links_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspect::Mockable;

    crate::mockable! {
        envelope
        #[derive(Debug, Default)]
        struct ItemsResponse {
            items: Vec<String>,
            pagination: Option<PaginationMetadata>,
            links: Option<Links>,
        }
    }

    #[test]
    fn test_for_page_middle() {
        let page = PaginationMetadata::for_page(45, 10, 2, "/hotels");
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.first.as_deref(), Some("/hotels?page=1"));
        assert_eq!(page.last.as_deref(), Some("/hotels?page=5"));
        assert_eq!(page.next.as_deref(), Some("/hotels?page=3"));
        assert_eq!(page.prev.as_deref(), Some("/hotels?page=1"));
    }

    #[test]
    fn test_for_page_edges() {
        let first = PaginationMetadata::for_page(10, 10, 1, "/x");
        assert_eq!(first.total_pages, 1);
        assert!(first.next.is_none());
        assert!(first.prev.is_none());

        let empty = PaginationMetadata::for_page(5, 0, 1, "/x");
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_links_serialize_self() {
        let links = Links::for_resource("/hotels");
        let json = serde_json::to_value(&links).unwrap();
        assert_eq!(json["self"], "/hotels");
        assert_eq!(json["update"], "/hotels/update");
        assert_eq!(json["delete"], "/hotels/delete");
    }

    #[test]
    fn test_envelope_attach_and_clear() {
        assert!(ItemsResponse::describe().response_envelope);

        let mut response = ItemsResponse::default();
        response.attach_page(30, 10, 3, None);
        let pagination = response.pagination.as_ref().unwrap();
        assert_eq!(pagination.first.as_deref(), Some("/?page=1"));
        assert!(pagination.next.is_none());
        assert_eq!(response.links.as_ref().unwrap().self_href, "/");

        response.clear_attachments();
        assert!(response.pagination.is_none());
        assert!(response.links.is_none());
        assert!(response.items.is_empty());
    }
}
