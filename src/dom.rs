//! Small text helpers over `scraper` element trees.

use scraper::{ElementRef, Html, Selector};

/// Concatenate the element's text nodes, each trimmed, dropping empty ones.
pub fn stripped_text(element: ElementRef) -> String {
    element.text().map(str::trim).collect()
}

/// Like [`stripped_text`] but joining the trimmed text nodes with `separator`.
pub fn joined_text(element: ElementRef, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// First element matching a CSS selector, or `None` for an invalid selector.
pub fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

/// First descendant of `element` matching a CSS selector.
pub fn select_first_in<'a>(element: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    element.select(&selector).next()
}

/// Direct children of `element` with the given tag name.
pub fn child_elements<'a>(element: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == tag)
        .collect()
}

/// First element sibling following `element`, skipping text and comments.
pub fn next_element_sibling(element: ElementRef) -> Option<ElementRef> {
    element.next_siblings().find_map(ElementRef::wrap)
}
