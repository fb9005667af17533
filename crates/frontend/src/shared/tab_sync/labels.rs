use contracts::shared::tab_sync::{labels_match, normalize_label};
use wasm_bindgen::JsCast;
use web_sys::{window, Element, EventTarget, HtmlElement};

/// Read/activate access to the tab headers rendered by the docs theme.
pub trait TabLabels {
    type Label;

    /// Every label on the page whose trimmed caption equals `text`.
    fn find_labels_by_text(&self, text: &str) -> Vec<Self::Label>;

    /// Trigger the label's native activation, same as a user click.
    fn activate(&self, label: &Self::Label);
}

/// Tab labels located in the live document by a CSS selector.
pub struct DomTabLabels {
    selector: String,
}

impl DomTabLabels {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }

    /// Caption of the label the click landed on (or inside of).
    ///
    /// Returns `None` for clicks elsewhere on the page.
    pub fn label_for_target(&self, target: &EventTarget) -> Option<String> {
        let element = target.dyn_ref::<Element>()?;
        let label = element.closest(&self.selector).ok()??;
        Some(caption(label.text_content()))
    }
}

/// Trimmed caption from a label's `textContent`, which is null for some nodes.
fn caption(text_content: Option<String>) -> String {
    normalize_label(&text_content.unwrap_or_default()).to_string()
}

impl TabLabels for DomTabLabels {
    type Label = HtmlElement;

    fn find_labels_by_text(&self, text: &str) -> Vec<HtmlElement> {
        let Some(document) = window().and_then(|w| w.document()) else {
            return Vec::new();
        };
        let nodes = match document.query_selector_all(&self.selector) {
            Ok(nodes) => nodes,
            Err(err) => {
                log::warn!("Invalid tab label selector '{}': {:?}", self.selector, err);
                return Vec::new();
            }
        };

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .filter(|el| labels_match(&el.text_content().unwrap_or_default(), text))
            .collect()
    }

    fn activate(&self, label: &HtmlElement) {
        label.click();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_trims_text_content() {
        assert_eq!(caption(Some("\n    Python\n  ".to_string())), "Python");
        assert_eq!(caption(Some("Go".to_string())), "Go");
    }

    #[test]
    fn test_caption_of_missing_text_is_empty() {
        assert_eq!(caption(None), "");
        assert_eq!(caption(Some("   ".to_string())), "");
    }
}
