//! HTML document wrapper used by the site checks
//!
//! The checks only need three queries: the first element matching a tag and
//! attribute filter, every element matching one, and the visible text of the
//! page. Parsing is tolerant; malformed markup still yields a document.

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text content is never shown to a visitor
const NON_VISIBLE_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Phrasing elements whose text flows into the surrounding text
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "dfn", "em", "font", "i", "kbd",
    "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var",
];

/// Attribute constraint applied to elements during lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrFilter<'f> {
    /// Accept any element with the tag name
    Any,
    /// The attribute must be present (any value)
    Present(&'f str),
    /// The attribute must equal the value exactly
    Equals(&'f str, &'f str),
}

impl AttrFilter<'_> {
    fn accepts(&self, element: &ElementRef<'_>) -> bool {
        match self {
            Self::Any => true,
            Self::Present(name) => element.value().attr(name).is_some(),
            Self::Equals(name, value) => element.value().attr(name) == Some(*value),
        }
    }
}

/// A queryable, parsed HTML document
pub struct HtmlDocument {
    html: Html,
}

impl std::fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDocument")
            .field("parse_errors", &self.html.errors.len())
            .finish()
    }
}

/// An element borrowed from an [`HtmlDocument`]
#[derive(Debug, Clone, Copy)]
pub struct HtmlElement<'a> {
    inner: ElementRef<'a>,
}

impl<'a> HtmlElement<'a> {
    /// Value of an attribute, if present
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    /// Concatenated text of the element's descendants
    pub fn text(&self) -> String {
        self.inner.text().collect()
    }
}

impl HtmlDocument {
    /// Parses an HTML document; never fails
    ///
    /// # Example
    ///
    /// ```
    /// use lead_audit::crawler::{AttrFilter, HtmlDocument};
    ///
    /// let doc = HtmlDocument::parse("<html><head><title>Hi</title></head></html>");
    /// let title = doc.find_first("title", &AttrFilter::Any).unwrap();
    /// assert_eq!(title.text(), "Hi");
    /// ```
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Returns the first element, in document order, with the tag name that
    /// passes the filter
    pub fn find_first(&self, tag: &str, filter: &AttrFilter<'_>) -> Option<HtmlElement<'_>> {
        self.find_all(tag, filter).into_iter().next()
    }

    /// Returns every element, in document order, with the tag name that
    /// passes the filter
    pub fn find_all(&self, tag: &str, filter: &AttrFilter<'_>) -> Vec<HtmlElement<'_>> {
        let selector = match Selector::parse(tag) {
            Ok(selector) => selector,
            Err(_) => {
                tracing::trace!("Ignoring lookup for unparseable tag '{}'", tag);
                return Vec::new();
            }
        };

        self.html
            .select(&selector)
            .filter(|element| filter.accepts(element))
            .map(|inner| HtmlElement { inner })
            .collect()
    }

    /// Extracts the visible text of the document
    ///
    /// Text inside inline elements (`span`, `a`, `b` and the like) runs on
    /// without a break, so `info<span>@</span>example.com` reads as one
    /// word. Every other element boundary separates words. Whitespace is
    /// collapsed to single spaces, and script, style, noscript and template
    /// contents are skipped.
    pub fn text(&self) -> String {
        let mut raw = String::new();
        collect_visible_text(self.html.root_element(), &mut raw);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if NON_VISIBLE_TAGS.contains(&name) {
                    continue;
                }
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };

                let inline = INLINE_TAGS.contains(&name);
                if !inline {
                    out.push(' ');
                }
                collect_visible_text(child_element, out);
                if !inline {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}
