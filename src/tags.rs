//! Tag lookup inside framework hydration payloads.
//!
//! Many Next.js recipe sites do not publish keywords in their schema.org data
//! but ship the recipe tags in the `__NEXT_DATA__` script. The tag list can sit
//! anywhere in that payload, so it is found by a bounded depth-first search.

use log::debug;
use scraper::Html;
use serde_json::Value;

use crate::dom;

/// Nodes deeper than this are not searched.
const MAX_DEPTH: usize = 10;

/// Keys holding a tag list, in lookup order.
const TAG_KEYS: [&str; 2] = ["tags", "labels"];

/// Whether a tag should be shown to users.
///
/// Plain strings always are. Structured tags only when `displayLabel` or
/// `display_label` is exactly `true`.
pub fn is_user_facing_tag(tag: &Value) -> bool {
    match tag {
        Value::Object(map) => ["displayLabel", "display_label"]
            .iter()
            .any(|key| map.get(*key) == Some(&Value::Bool(true))),
        _ => true,
    }
}

/// Search `data` depth-first for the first non-empty list of visible tags.
pub fn find_tags(data: &Value) -> Option<Vec<String>> {
    find_tags_at(data, 0)
}

fn find_tags_at(data: &Value, depth: usize) -> Option<Vec<String>> {
    if depth > MAX_DEPTH {
        return None;
    }

    match data {
        Value::Object(map) => {
            for key in TAG_KEYS {
                if let Some(Value::Array(tags)) = map.get(key) {
                    let names = visible_tag_names(tags);
                    if !names.is_empty() {
                        return Some(names);
                    }
                }
            }
            map.values().find_map(|value| find_tags_at(value, depth + 1))
        }
        Value::Array(items) => items.iter().find_map(|item| find_tags_at(item, depth + 1)),
        _ => None,
    }
}

fn visible_tag_names(tags: &[Value]) -> Vec<String> {
    tags.iter()
        .filter(|tag| is_user_facing_tag(tag))
        .filter_map(|tag| match tag {
            Value::String(name) if !name.is_empty() => Some(name.clone()),
            Value::Object(map) => match map.get("name") {
                Some(Value::String(name)) if !name.is_empty() => Some(name.clone()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Tags from the page's `__NEXT_DATA__` script, if it carries any.
pub fn keywords_from_next_data(document: &Html) -> Option<Vec<String>> {
    let script = dom::select_first(document, "script#__NEXT_DATA__")?;
    let raw: String = script.text().collect();
    if raw.trim().is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(data) => find_tags(&data),
        Err(e) => {
            debug!("Could not parse __NEXT_DATA__: {}", e);
            None
        }
    }
}
