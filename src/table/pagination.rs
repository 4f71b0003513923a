//! Pagination metadata parsed from list response headers.
//!
//! ServiceNow describes paging with two headers:
//!
//! - `Link`: comma-separated `<url>; rel="first|prev|next|last"` entries
//! - `X-Total-Count`: the number of records matching the query
//!
//! Limit and offset are not sent as headers; they are recovered from the
//! `sysparm_limit` and `sysparm_offset` parameters of the link URLs.

use reqwest::Url;

use crate::clients::HttpResponse;

/// Pagination information for a list response.
///
/// Every field is optional; a response carries whatever subset the server
/// sent.
///
/// # Example
///
/// ```rust
/// use servicenow_api::table::PaginationMeta;
///
/// let link = r#"<https://dev.service-now.com/api/now/table/incident?sysparm_limit=10&sysparm_offset=20>;rel="next""#;
/// let meta = PaginationMeta::from_headers(Some(link), Some("57")).unwrap();
///
/// assert_eq!(meta.total_count, Some(57));
/// assert_eq!(meta.limit, Some(10));
/// assert_eq!(meta.offset, Some(20));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginationMeta {
    /// URL of the first page.
    pub first: Option<String>,
    /// URL of the previous page.
    pub prev: Option<String>,
    /// URL of the next page.
    pub next: Option<String>,
    /// URL of the last page.
    pub last: Option<String>,
    /// Total number of matching records.
    pub total_count: Option<u64>,
    /// Page size recovered from the link URLs.
    pub limit: Option<u32>,
    /// Page offset recovered from the link URLs.
    pub offset: Option<u32>,
}

impl PaginationMeta {
    /// Parses pagination metadata from a response's headers.
    ///
    /// Returns `None` when the response carries no usable pagination signal.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Option<Self> {
        let link = response.header_joined("link");
        Self::from_headers(link.as_deref(), response.header("x-total-count"))
    }

    /// Parses pagination metadata from raw `Link` and `X-Total-Count` values.
    ///
    /// Entries with an unknown `rel` or without a `<url>` are ignored. A
    /// total count that is not a non-negative integer is ignored.
    #[must_use]
    pub fn from_headers(link: Option<&str>, total_count: Option<&str>) -> Option<Self> {
        let mut meta = Self::default();
        let mut found = false;

        for entry in split_link_entries(link.unwrap_or_default()) {
            let Some((rel, url)) = parse_link_entry(entry) else {
                continue;
            };
            let slot = match rel {
                "first" => &mut meta.first,
                "prev" | "previous" => &mut meta.prev,
                "next" => &mut meta.next,
                "last" => &mut meta.last,
                _ => continue,
            };
            *slot = Some(url.to_string());
            found = true;
        }

        if let Some(count) = total_count.and_then(|c| c.trim().parse::<u64>().ok()) {
            meta.total_count = Some(count);
            found = true;
        }

        let paging = [&meta.next, &meta.prev, &meta.first, &meta.last]
            .into_iter()
            .flatten()
            .find_map(|url| parse_limit_offset(url));
        if let Some((limit, offset)) = paging {
            meta.limit = limit;
            meta.offset = offset;
        }

        found.then_some(meta)
    }

    /// Returns `true` if a next page link is present.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns `true` if a previous page link is present.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.prev.is_some()
    }
}

/// Splits a `Link` value on the commas between entries.
///
/// Commas inside `<...>` belong to the URL (e.g. `sysparm_fields=a,b`).
fn split_link_entries(header: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut in_url = false;
    let mut start = 0;
    for (i, c) in header.char_indices() {
        match c {
            '<' => in_url = true,
            '>' => in_url = false,
            ',' if !in_url => {
                entries.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&header[start..]);
    entries
}

/// Splits a `<url>; rel="name"` entry into its relation and URL.
fn parse_link_entry(entry: &str) -> Option<(&str, &str)> {
    let entry = entry.trim();
    let start = entry.find('<')?;
    let end = entry[start..].find('>')? + start;
    let url = entry[start + 1..end].trim();
    if url.is_empty() {
        return None;
    }

    let rel = entry[end + 1..].split(';').find_map(|param| {
        let (key, value) = param.split_once('=')?;
        (key.trim().eq_ignore_ascii_case("rel")).then(|| value.trim().trim_matches('"'))
    })?;

    Some((rel, url))
}

/// Reads `sysparm_limit` and `sysparm_offset` from a link URL.
///
/// A URL counts only if it carries at least one of the two and every one it
/// carries is a valid non-negative integer. An empty value is treated as
/// absent.
fn parse_limit_offset(raw: &str) -> Option<(Option<u32>, Option<u32>)> {
    let url = Url::parse(raw).ok()?;

    let mut limit = None;
    let mut offset = None;
    for (key, value) in url.query_pairs() {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "sysparm_limit" if limit.is_none() => limit = Some(value.into_owned()),
            "sysparm_offset" if offset.is_none() => offset = Some(value.into_owned()),
            _ => {}
        }
    }

    if limit.is_none() && offset.is_none() {
        return None;
    }

    let limit = match limit {
        Some(v) => Some(v.parse::<u32>().ok()?),
        None => None,
    };
    let offset = match offset {
        Some(v) => Some(v.parse::<u32>().ok()?),
        None => None,
    };

    Some((limit, offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const BASE: &str = "https://dev.service-now.com/api/now/table/incident";

    fn response(pairs: &[(&str, &str)]) -> HttpResponse {
        let mut headers: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in pairs {
            headers
                .entry((*name).to_string())
                .or_default()
                .push((*value).to_string());
        }
        HttpResponse::new(200, headers, Vec::new())
    }

    #[test]
    fn test_next_link_with_total_count() {
        let link = format!(r#"<{BASE}?sysparm_limit=10&sysparm_offset=20>;rel="next""#);
        let meta = PaginationMeta::from_headers(Some(&link), Some("57")).unwrap();

        assert_eq!(
            meta.next.as_deref(),
            Some(format!("{BASE}?sysparm_limit=10&sysparm_offset=20").as_str())
        );
        assert_eq!(meta.total_count, Some(57));
        assert_eq!(meta.limit, Some(10));
        assert_eq!(meta.offset, Some(20));
        assert!(meta.has_next());
        assert!(!meta.has_prev());
    }

    #[test]
    fn test_all_relations() {
        let link = format!(
            r#"<{BASE}?sysparm_offset=0&sysparm_limit=5>;rel="first", <{BASE}?sysparm_offset=0&sysparm_limit=5>;rel="prev", <{BASE}?sysparm_offset=10&sysparm_limit=5>;rel="next", <{BASE}?sysparm_offset=50&sysparm_limit=5>;rel="last""#
        );
        let meta = PaginationMeta::from_headers(Some(&link), None).unwrap();

        assert!(meta.first.is_some());
        assert!(meta.prev.is_some());
        assert!(meta.next.is_some());
        assert!(meta.last.is_some());
        assert_eq!(meta.total_count, None);
        assert_eq!(meta.limit, Some(5));
        assert_eq!(meta.offset, Some(10));
    }

    #[test]
    fn test_previous_is_accepted_for_prev() {
        let link = format!(r#"<{BASE}?sysparm_offset=0>; rel="previous""#);
        let meta = PaginationMeta::from_headers(Some(&link), None).unwrap();

        assert!(meta.has_prev());
        assert_eq!(meta.limit, None);
        assert_eq!(meta.offset, Some(0));
    }

    #[test]
    fn test_limit_offset_prefers_next_over_others() {
        let link = format!(
            r#"<{BASE}?sysparm_limit=1&sysparm_offset=0>;rel="first",<{BASE}?sysparm_limit=2&sysparm_offset=4>;rel="next""#
        );
        let meta = PaginationMeta::from_headers(Some(&link), None).unwrap();

        assert_eq!(meta.limit, Some(2));
        assert_eq!(meta.offset, Some(4));
    }

    #[test]
    fn test_invalid_limit_falls_through_to_next_candidate() {
        let link = format!(
            r#"<{BASE}?sysparm_limit=abc>;rel="next",<{BASE}?sysparm_limit=-1>;rel="prev",<{BASE}?sysparm_limit=25&sysparm_offset=0>;rel="first""#
        );
        let meta = PaginationMeta::from_headers(Some(&link), None).unwrap();

        assert_eq!(meta.limit, Some(25));
        assert_eq!(meta.offset, Some(0));
    }

    #[test]
    fn test_empty_paging_values_count_as_absent() {
        let link = format!(r#"<{BASE}?sysparm_limit=&sysparm_offset=20>;rel="next""#);
        let meta = PaginationMeta::from_headers(Some(&link), None).unwrap();

        assert_eq!(meta.limit, None);
        assert_eq!(meta.offset, Some(20));
    }

    #[test]
    fn test_empty_values_alone_fall_through_to_next_candidate() {
        let link = format!(
            r#"<{BASE}?sysparm_limit=&sysparm_offset=>;rel="next",<{BASE}?sysparm_limit=10&sysparm_offset=30>;rel="last""#
        );
        let meta = PaginationMeta::from_headers(Some(&link), None).unwrap();

        assert_eq!(meta.limit, Some(10));
        assert_eq!(meta.offset, Some(30));
    }

    #[test]
    fn test_urls_without_paging_params_leave_limit_unset() {
        let link = format!(r#"<{BASE}?sysparm_query=active%3Dtrue>;rel="next""#);
        let meta = PaginationMeta::from_headers(Some(&link), None).unwrap();

        assert!(meta.has_next());
        assert_eq!(meta.limit, None);
        assert_eq!(meta.offset, None);
    }

    #[test]
    fn test_commas_inside_urls_do_not_split_entries() {
        let link = format!(
            r#"<{BASE}?sysparm_fields=number,state&sysparm_limit=2&sysparm_offset=2>;rel="next",<{BASE}?sysparm_fields=number,state&sysparm_limit=2&sysparm_offset=8>;rel="last""#
        );
        let meta = PaginationMeta::from_headers(Some(&link), None).unwrap();

        assert_eq!(
            meta.next.as_deref(),
            Some(format!("{BASE}?sysparm_fields=number,state&sysparm_limit=2&sysparm_offset=2").as_str())
        );
        assert!(meta.last.is_some());
        assert_eq!(meta.limit, Some(2));
        assert_eq!(meta.offset, Some(2));
    }

    #[test]
    fn test_total_count_only() {
        let meta = PaginationMeta::from_headers(None, Some(" 3 ")).unwrap();
        assert_eq!(meta.total_count, Some(3));
        assert_eq!(meta.next, None);
    }

    #[test]
    fn test_no_signal_yields_none() {
        assert_eq!(PaginationMeta::from_headers(None, None), None);
        assert_eq!(PaginationMeta::from_headers(Some(""), Some("many")), None);
        assert_eq!(PaginationMeta::from_headers(None, Some("-4")), None);
    }

    #[test]
    fn test_unknown_relations_and_malformed_entries_are_ignored() {
        let link = format!(r#"<{BASE}>;rel="self", no-angle-brackets;rel="next", <>;rel="last""#);
        assert_eq!(PaginationMeta::from_headers(Some(&link), None), None);
    }

    #[test]
    fn test_from_response_is_case_insensitive_and_joins_link_lines() {
        let next = format!(r#"<{BASE}?sysparm_limit=10&sysparm_offset=10>;rel="next""#);
        let last = format!(r#"<{BASE}?sysparm_limit=10&sysparm_offset=90>;rel="last""#);
        let response = response(&[
            ("Link", next.as_str()),
            ("LINK", last.as_str()),
            ("X-Total-Count", "100"),
        ]);

        let meta = PaginationMeta::from_response(&response).unwrap();

        assert!(meta.next.is_some());
        assert!(meta.last.is_some());
        assert_eq!(meta.total_count, Some(100));
        assert_eq!(meta.offset, Some(10));
    }

    #[test]
    fn test_from_response_without_headers() {
        assert_eq!(PaginationMeta::from_response(&response(&[])), None);
    }
}
