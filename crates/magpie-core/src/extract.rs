//! Field extraction from a rendered profile page.
//!
//! Each field is located independently. A lookup that finds nothing yields
//! `None` for that field and has no effect on any other field. The three
//! header fields (category, website, joining date) are scoped to the profile
//! header subtree; when the header itself is absent, all three are `None`.

use crate::record::ProfileRecord;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

// Selectors taken from the rendered profile page. The `r-*` class names are
// generated atomic CSS classes and may rot; the data-testid attributes are
// the stable hooks.
const NAME_SELECTOR: &str = "div.r-1vr29t4";
const HANDLE_SELECTOR: &str = "div.r-1wvb978";
const BIO_SELECTOR: &str = r#"div[data-testid="UserDescription"]"#;
const HEADER_SELECTOR: &str = r#"div[data-testid="UserProfileHeader_Items"]"#;
const CATEGORY_SELECTOR: &str = r#"span[data-testid="UserProfessionalCategory"]"#;
const WEBSITE_SELECTOR: &str = "a";
const JOIN_DATE_SELECTOR: &str = r#"span[data-testid="UserJoinDate"]"#;
const STATS_SELECTOR: &str = "a.r-rjixqe";

static NAME: LazyLock<Selector> = LazyLock::new(|| parse_selector(NAME_SELECTOR));
static HANDLE: LazyLock<Selector> = LazyLock::new(|| parse_selector(HANDLE_SELECTOR));
static BIO: LazyLock<Selector> = LazyLock::new(|| parse_selector(BIO_SELECTOR));
static HEADER: LazyLock<Selector> = LazyLock::new(|| parse_selector(HEADER_SELECTOR));
static CATEGORY: LazyLock<Selector> = LazyLock::new(|| parse_selector(CATEGORY_SELECTOR));
static WEBSITE: LazyLock<Selector> = LazyLock::new(|| parse_selector(WEBSITE_SELECTOR));
static JOIN_DATE: LazyLock<Selector> = LazyLock::new(|| parse_selector(JOIN_DATE_SELECTOR));
static STATS: LazyLock<Selector> = LazyLock::new(|| parse_selector(STATS_SELECTOR));

fn parse_selector(css: &str) -> Selector {
    // All inputs are compile-time constants validated by the test suite.
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

/// Extract all profile fields from raw page source.
///
/// Never fails: a malformed or unrelated document simply produces a record
/// with every field `None`.
pub fn extract_profile(html: &str) -> ProfileRecord {
    let document = Html::parse_document(html);

    let header = document.select(&HEADER).next();
    if header.is_none() {
        tracing::debug!(
            selector = HEADER_SELECTOR,
            "profile header not found; category, website, and joining date will be absent"
        );
    }

    ProfileRecord {
        name: first_text(&document, &NAME, "profile_name"),
        handle: first_text(&document, &HANDLE, "profile_handle"),
        bio: first_text(&document, &BIO, "profile_bio"),
        category: header.and_then(|h| scoped_text(h, &CATEGORY, "profile_category")),
        website: header.and_then(|h| scoped_attr(h, &WEBSITE, "href", "profile_website")),
        joining_date: header.and_then(|h| scoped_text(h, &JOIN_DATE, "profile_joining_date")),
        following: nth_text(&document, &STATS, 0, "profile_following"),
        followers: nth_text(&document, &STATS, 1, "profile_followers"),
    }
}

/// Text of the first node matching `selector`, verbatim.
fn first_text(document: &Html, selector: &Selector, field: &str) -> Option<String> {
    nth_text(document, selector, 0, field)
}

/// Text of the nth node matching `selector`, verbatim.
fn nth_text(document: &Html, selector: &Selector, index: usize, field: &str) -> Option<String> {
    match document.select(selector).nth(index) {
        Some(element) => Some(element.text().collect()),
        None => {
            tracing::debug!(field, index, "node not found");
            None
        }
    }
}

/// Text of the first match of `selector` within `scope`.
fn scoped_text(scope: ElementRef<'_>, selector: &Selector, field: &str) -> Option<String> {
    match scope.select(selector).next() {
        Some(element) => Some(element.text().collect()),
        None => {
            tracing::debug!(field, "node not found in profile header");
            None
        }
    }
}

/// Attribute value of the first match of `selector` within `scope`.
fn scoped_attr(
    scope: ElementRef<'_>,
    selector: &Selector,
    attr: &str,
    field: &str,
) -> Option<String> {
    match scope.select(selector).next().and_then(|e| e.value().attr(attr)) {
        Some(value) => Some(value.to_string()),
        None => {
            tracing::debug!(field, attr, "node or attribute not found in profile header");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"
        <html><body>
            <div class="r-1vr29t4">Jane Doe</div>
            <div class="r-1wvb978">@janedoe</div>
            <div data-testid="UserDescription">Building things. Opinions my own.</div>
            <div data-testid="UserProfileHeader_Items">
                <span data-testid="UserProfessionalCategory">Engineer</span>
                <a href="https://example.com">example.com</a>
                <span data-testid="UserJoinDate">Joined March 2015</span>
            </div>
            <a class="r-rjixqe" href="/following">120 Following</a>
            <a class="r-rjixqe" href="/followers">500 Followers</a>
        </body></html>
    "#;

    #[test]
    fn test_all_selectors_are_valid() {
        for css in [
            NAME_SELECTOR,
            HANDLE_SELECTOR,
            BIO_SELECTOR,
            HEADER_SELECTOR,
            CATEGORY_SELECTOR,
            WEBSITE_SELECTOR,
            JOIN_DATE_SELECTOR,
            STATS_SELECTOR,
        ] {
            assert!(Selector::parse(css).is_ok(), "selector {css:?} failed to parse");
        }
    }

    #[test]
    fn test_extracts_every_field_from_full_page() {
        let record = extract_profile(FULL_PAGE);

        assert_eq!(record.name.as_deref(), Some("Jane Doe"));
        assert_eq!(record.handle.as_deref(), Some("@janedoe"));
        assert_eq!(
            record.bio.as_deref(),
            Some("Building things. Opinions my own.")
        );
        assert_eq!(record.category.as_deref(), Some("Engineer"));
        assert_eq!(record.website.as_deref(), Some("https://example.com"));
        assert_eq!(record.joining_date.as_deref(), Some("Joined March 2015"));
        assert_eq!(record.following.as_deref(), Some("120 Following"));
        assert_eq!(record.followers.as_deref(), Some("500 Followers"));
        assert!(record.missing_fields().is_empty());
    }

    #[test]
    fn test_name_node_text_is_verbatim() {
        let record = extract_profile(r#"<div class="r-1vr29t4">Jane Doe</div>"#);
        assert_eq!(record.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_nested_text_is_concatenated() {
        let record =
            extract_profile(r#"<div data-testid="UserDescription">Rust <b>and</b> birds</div>"#);
        assert_eq!(record.bio.as_deref(), Some("Rust and birds"));
    }

    #[test]
    fn test_following_and_followers_by_position() {
        let html = r#"
            <a class="r-rjixqe">120 Following</a>
            <a class="r-rjixqe">500 Followers</a>
        "#;
        let record = extract_profile(html);

        assert_eq!(record.following.as_deref(), Some("120 Following"));
        assert_eq!(record.followers.as_deref(), Some("500 Followers"));
    }

    #[test]
    fn test_single_stats_anchor_leaves_followers_absent() {
        let record = extract_profile(r#"<a class="r-rjixqe">120 Following</a>"#);

        assert_eq!(record.following.as_deref(), Some("120 Following"));
        assert_eq!(record.followers, None);
    }

    #[test]
    fn test_missing_bio_does_not_affect_other_fields() {
        let html = r#"
            <div class="r-1vr29t4">Jane Doe</div>
            <a class="r-rjixqe">120 Following</a>
            <a class="r-rjixqe">500 Followers</a>
        "#;
        let record = extract_profile(html);

        assert_eq!(record.bio, None);
        assert_eq!(record.name.as_deref(), Some("Jane Doe"));
        assert_eq!(record.following.as_deref(), Some("120 Following"));
        assert_eq!(record.followers.as_deref(), Some("500 Followers"));
    }

    #[test]
    fn test_missing_header_nulls_all_three_header_fields() {
        let html = r#"
            <div class="r-1vr29t4">Jane Doe</div>
            <a href="https://elsewhere.example">not the profile website</a>
        "#;
        let record = extract_profile(html);

        assert_eq!(record.category, None);
        assert_eq!(record.website, None);
        assert_eq!(record.joining_date, None);
        // Anchors outside the header are never mistaken for the website.
        assert_eq!(record.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_website_comes_from_header_anchor_href() {
        let html = r#"
            <a href="https://decoy.example">decoy</a>
            <div data-testid="UserProfileHeader_Items">
                <a href="https://real.example">real</a>
            </div>
        "#;
        let record = extract_profile(html);

        assert_eq!(record.website.as_deref(), Some("https://real.example"));
    }

    #[test]
    fn test_header_anchor_without_href_is_absent() {
        let html = r#"
            <div data-testid="UserProfileHeader_Items">
                <a>no href here</a>
            </div>
        "#;
        let record = extract_profile(html);

        assert_eq!(record.website, None);
    }

    #[test]
    fn test_empty_document_yields_empty_record() {
        let record = extract_profile("");
        assert!(record.is_empty());
    }

    #[test]
    fn test_unrelated_document_yields_empty_record() {
        let record = extract_profile("<html><body><p>hello</p></body></html>");
        assert!(record.is_empty());
    }
}
