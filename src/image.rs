use log::debug;
use scraper::Html;

use crate::linked_data;

fn is_placeholder(url: &str) -> bool {
    url.to_lowercase().contains("placeholder")
}

/// Image URL of the first JSON-LD Recipe on the page, unless it is a
/// placeholder.
pub fn image_from_linked_data(document: &Html) -> Option<String> {
    let recipe = linked_data::first_recipe(document)?;
    let url = linked_data::image_url(recipe.get("image")?)?;

    if is_placeholder(url) {
        debug!("Ignoring placeholder image from JSON-LD: {}", url);
        return None;
    }
    Some(url.to_string())
}

/// Keep the extractor's image unless it is missing or a placeholder, in which
/// case the linked-data image is used when one is available.
pub fn resolve_image(primary: Option<String>, document: &Html) -> Option<String> {
    match primary {
        Some(url) if !is_placeholder(&url) => Some(url),
        primary => image_from_linked_data(document).or(primary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(json_ld: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><head><script type="application/ld+json">{json_ld}</script></head><body></body></html>"#
        ))
    }

    #[test]
    fn test_keeps_valid_primary_image() {
        let document = page(r#"{"@type": "Recipe", "image": "https://example.com/other.jpg"}"#);
        assert_eq!(
            resolve_image(Some("https://example.com/cake.jpg".to_string()), &document),
            Some("https://example.com/cake.jpg".to_string())
        );
    }

    #[test]
    fn test_replaces_placeholder_primary() {
        let document = page(r#"{"@type": "Recipe", "image": ["https://example.com/real.jpg"]}"#);
        assert_eq!(
            resolve_image(Some("https://example.com/PlaceHolder.png".to_string()), &document),
            Some("https://example.com/real.jpg".to_string())
        );
    }

    #[test]
    fn test_fills_missing_primary_from_graph() {
        let document = page(
            r#"{"@graph": [{"@type": "WebPage"}, {"@type": "Recipe", "image": {"url": "https://example.com/g.jpg"}}]}"#,
        );
        assert_eq!(resolve_image(None, &document), Some("https://example.com/g.jpg".to_string()));
    }

    #[test]
    fn test_rejects_placeholder_fallback_and_keeps_primary() {
        let document = page(r#"[{"@type": "Recipe", "image": [{"url": "https://example.com/placeholder.svg"}]}]"#);
        let primary = Some("https://example.com/placeholder-1.png".to_string());
        assert_eq!(resolve_image(primary.clone(), &document), primary);
        assert_eq!(resolve_image(None, &document), None);
    }

    #[test]
    fn test_no_linked_data() {
        let document = Html::parse_document("<html><body></body></html>");
        assert_eq!(image_from_linked_data(&document), None);
    }
}
