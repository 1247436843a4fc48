//! Lookup of schema.org Recipe objects embedded as JSON-LD.

use log::debug;
use scraper::{Html, Selector};
use serde_json::Value;

/// Parsed contents of every `application/ld+json` script, in document order.
/// Scripts that are not valid JSON are skipped.
pub fn json_ld_blocks(document: &Html) -> Vec<Value> {
    let Ok(selector) = Selector::parse("script[type='application/ld+json']") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .enumerate()
        .filter_map(|(index, script)| {
            let raw: String = script.text().collect();
            match serde_json::from_str::<Value>(raw.trim()) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!("Skipping JSON-LD script {}: {}", index, e);
                    None
                }
            }
        })
        .collect()
}

/// Whether `@type` is `Recipe`, either directly or as one entry of a type list.
pub fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .any(|t| t.as_str().is_some_and(|t| t.eq_ignore_ascii_case("recipe"))),
        _ => false,
    }
}

/// Find the Recipe object in one JSON-LD block: the block itself, an entry of
/// its `@graph`, or an entry of a top-level array.
pub fn find_recipe(block: &Value) -> Option<&Value> {
    match block {
        Value::Object(_) if is_recipe_type(block) => Some(block),
        Value::Object(map) => map
            .get("@graph")?
            .as_array()?
            .iter()
            .find(|item| is_recipe_type(item)),
        Value::Array(items) => items.iter().find(|item| is_recipe_type(item)),
        _ => None,
    }
}

/// First Recipe object across all JSON-LD blocks of the document.
pub fn first_recipe(document: &Html) -> Option<Value> {
    json_ld_blocks(document)
        .iter()
        .find_map(find_recipe)
        .cloned()
}

/// Read an image URL from a schema.org `image` value: a string, a list whose
/// first entry is a string or `{url}`, or an object with `url`.
pub fn image_url(image: &Value) -> Option<&str> {
    match image {
        Value::String(url) => Some(url.as_str()),
        Value::Array(images) => match images.first()? {
            Value::String(url) => Some(url.as_str()),
            Value::Object(obj) => obj.get("url")?.as_str(),
            _ => None,
        },
        Value::Object(obj) => obj.get("url")?.as_str(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_find_recipe_direct_graph_and_array() {
        let direct = json!({"@type": "Recipe", "name": "A"});
        assert_eq!(find_recipe(&direct).unwrap()["name"], "A");

        let graph = json!({"@graph": [{"@type": "WebPage"}, {"@type": "Recipe", "name": "B"}]});
        assert_eq!(find_recipe(&graph).unwrap()["name"], "B");

        let array = json!([{"@type": "WebSite"}, {"@type": ["Recipe", "Thing"], "name": "C"}]);
        assert_eq!(find_recipe(&array).unwrap()["name"], "C");

        assert!(find_recipe(&json!({"@type": "Article"})).is_none());
    }

    #[test]
    fn test_image_url_shapes() {
        assert_eq!(image_url(&json!("https://a/1.jpg")), Some("https://a/1.jpg"));
        assert_eq!(image_url(&json!(["https://a/2.jpg", "https://a/3.jpg"])), Some("https://a/2.jpg"));
        assert_eq!(image_url(&json!([{"url": "https://a/4.jpg"}])), Some("https://a/4.jpg"));
        assert_eq!(image_url(&json!({"url": "https://a/5.jpg"})), Some("https://a/5.jpg"));
        assert_eq!(image_url(&json!([])), None);
        assert_eq!(image_url(&json!(42)), None);
    }

    #[test]
    fn test_invalid_scripts_are_skipped() {
        let html = r#"<html><head>
            <script type="application/ld+json">{not json</script>
            <script type="application/ld+json">{"@type": "Recipe", "name": "Soup"}</script>
        </head></html>"#;
        let document = Html::parse_document(html);
        assert_eq!(json_ld_blocks(&document).len(), 1);
        assert_eq!(first_recipe(&document).unwrap()["name"], "Soup");
    }
}
