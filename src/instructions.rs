//! Step-grouped instructions from recipe markup.
//!
//! Some sites split the method into titled steps, each with its own list of
//! actions. The flat instruction list from the extractor loses those titles,
//! so the groups are rebuilt from the DOM when the layout is recognized.

use log::debug;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::dom;
use crate::model::StructuredInstructionGroup;

const CONTAINER_IDS: [&str; 5] = [
    "preparation-steps",
    "recipe-steps",
    "instructions",
    "method",
    "directions",
];

const CONTAINER_CLASSES: [&str; 5] = [
    "recipe-steps",
    "instructions",
    "method",
    "directions",
    "preparation",
];

/// Class names marking a single step block. Matched exactly, case-insensitive.
const STEP_CLASSES: [&str; 5] = ["step", "toggle", "instruction", "etape", "step-instructions"];

/// Title candidates in priority order.
const TITLE_SELECTORS: [&str; 3] = ["p.bold", "strong", "h2, h3, h4, h5, h6"];

/// Leading ordinal such as "1. ", "Étape 1:" or "Step 2 -".
static STEP_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+[.:\-\s]+|[Éé]tape\s*\d*[.:\-\s]*|Step\s*\d*[.:\-\s]*)")
        .expect("valid regex")
});

/// Rebuild titled instruction groups from the page.
///
/// Returns `None` when no step container is found or when no step has any
/// instruction.
pub fn extract_structured_instructions(document: &Html) -> Option<Vec<StructuredInstructionGroup>> {
    let container = find_container(document)?;
    let div = Selector::parse("div").ok()?;

    let groups: Vec<_> = container
        .select(&div)
        .filter(|candidate| is_step_container(*candidate))
        .filter_map(|step| {
            let instructions = extract_step_instructions(step);
            if instructions.is_empty() {
                return None;
            }
            Some(StructuredInstructionGroup {
                title: extract_step_title(step),
                instructions,
            })
        })
        .collect();

    debug!("Structured {} instruction groups", groups.len());
    if groups.is_empty() {
        None
    } else {
        Some(groups)
    }
}

fn find_container(document: &Html) -> Option<ElementRef<'_>> {
    CONTAINER_IDS
        .iter()
        .find_map(|id| dom::select_first(document, &format!("div#{id}")))
        .or_else(|| {
            CONTAINER_CLASSES
                .iter()
                .find_map(|class| dom::select_first(document, &format!("div.{class}")))
        })
}

fn is_step_container(element: ElementRef) -> bool {
    let classes: HashSet<String> = element
        .value()
        .classes()
        .map(|class| class.to_lowercase())
        .collect();
    STEP_CLASSES.iter().any(|step| classes.contains(*step))
}

/// Title of a step block with its leading ordinal removed.
pub fn extract_step_title(step: ElementRef) -> Option<String> {
    let element = TITLE_SELECTORS
        .iter()
        .find_map(|selector| dom::select_first_in(step, selector))?;

    let text = dom::stripped_text(element);
    let title = STEP_PREFIX.replace(&text, "");
    let title = title.trim();

    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Text of every list item inside a step block, blanks skipped.
pub fn extract_step_instructions(step: ElementRef) -> Vec<String> {
    let Ok(li) = Selector::parse("li") else {
        return Vec::new();
    };

    step.select(&li)
        .map(dom::stripped_text)
        .filter(|text| !text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRUCTURED_INSTRUCTIONS_HTML: &str = r#"
    <html><body>
    <div id="preparation-steps">
        <div class="toggle w-100 mb-2">
            <p class="regular body-3 m-0 c-gray-400">Étape 1</p>
            <p class="bold mb-2">1. Le camembert rôti</p>
            <ul class="ps-4">
                <li class="body-2 regular m-0">Préchauffez votre four à 200°C.</li>
                <li class="body-2 regular m-0">Déposez le camembert sur une plaque.</li>
            </ul>
        </div>
        <div class="step-instructions collapse mb-2">
            <p class="regular body-3 m-0">Étape 2</p>
            <p class="bold mb-2">2. Les mouillettes</p>
            <ul>
                <li class="body-2 regular m-0">Coupez les petits pains pour réaliser des mouillettes.</li>
                <li class="body-2 regular m-0">Placez-les à côté du camembert.</li>
                <li class="body-2 regular m-0">Enfournez le tout 12 à 15 min.</li>
            </ul>
        </div>
    </div>
    </body></html>
    "#;

    fn fragment(html: &str) -> Html {
        Html::parse_fragment(html)
    }

    fn step_of(document: &Html) -> ElementRef<'_> {
        dom::select_first(document, "div").unwrap()
    }

    #[test]
    fn test_extracts_steps_with_titles() {
        let document = Html::parse_document(STRUCTURED_INSTRUCTIONS_HTML);
        let result = extract_structured_instructions(&document).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].title.as_deref(), Some("Le camembert rôti"));
        assert_eq!(result[0].instructions.len(), 2);
        assert_eq!(result[0].instructions[0], "Préchauffez votre four à 200°C.");
        assert_eq!(result[1].title.as_deref(), Some("Les mouillettes"));
        assert_eq!(result[1].instructions.len(), 3);
    }

    #[test]
    fn test_container_found_by_class() {
        let html = r#"<div class="method">
            <div class="Step"><h3>Step 1: Prep</h3><ol><li>Chop onions</li></ol></div>
            <div class="step"><p>No list here</p></div>
        </div>"#;
        let document = Html::parse_document(html);
        let result = extract_structured_instructions(&document).unwrap();

        assert_eq!(
            result,
            vec![StructuredInstructionGroup {
                title: Some("Prep".to_string()),
                instructions: vec!["Chop onions".to_string()],
            }]
        );
    }

    #[test]
    fn test_returns_none_when_no_container_found() {
        let document = Html::parse_document("<html><body></body></html>");
        assert_eq!(extract_structured_instructions(&document), None);
    }

    #[test]
    fn test_returns_none_when_no_step_containers_found() {
        let html = r#"<div id="preparation-steps"><p>Just text, no steps</p></div>"#;
        let document = Html::parse_document(html);
        assert_eq!(extract_structured_instructions(&document), None);
    }

    #[test]
    fn test_unrecognized_step_classes_yield_none() {
        let html = r#"<div id="method"><div class="recipe-stage"><ul><li>Mix</li></ul></div></div>"#;
        let document = Html::parse_document(html);
        assert_eq!(extract_structured_instructions(&document), None);
    }

    #[test]
    fn test_extracts_title_from_bold_paragraph() {
        let document = fragment(r#"<div><p class="bold">1. Le camembert rôti</p></div>"#);
        assert_eq!(extract_step_title(step_of(&document)).as_deref(), Some("Le camembert rôti"));
    }

    #[test]
    fn test_extracts_title_from_strong() {
        let document = fragment("<div><strong>Step 2: Mix ingredients</strong></div>");
        assert_eq!(extract_step_title(step_of(&document)).as_deref(), Some("Mix ingredients"));
    }

    #[test]
    fn test_extracts_title_from_heading() {
        let document = fragment("<div><h3>Étape 3 - La cuisson</h3></div>");
        assert_eq!(extract_step_title(step_of(&document)).as_deref(), Some("La cuisson"));
    }

    #[test]
    fn test_title_only_ordinal_is_none() {
        let document = fragment("<div><strong>Étape 4</strong></div>");
        assert_eq!(extract_step_title(step_of(&document)), None);
    }

    #[test]
    fn test_returns_none_when_no_title_element() {
        let document = fragment("<div><p>Just a regular paragraph</p></div>");
        assert_eq!(extract_step_title(step_of(&document)), None);
    }

    #[test]
    fn test_extracts_list_items_skipping_blanks() {
        let document = fragment("<div><ul><li>Step 1</li><li>  </li><li>Step 2</li></ul></div>");
        assert_eq!(
            extract_step_instructions(step_of(&document)),
            vec!["Step 1".to_string(), "Step 2".to_string()]
        );
    }

    #[test]
    fn test_returns_empty_list_when_no_items() {
        let document = fragment("<div><p>No list here</p></div>");
        assert!(extract_step_instructions(step_of(&document)).is_empty());
    }
}
