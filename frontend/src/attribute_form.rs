//! Method attribute forms: one panel per selected method.

use tracing::debug;

use crate::view::{PageLookup, ViewNode, find_by_identifier, hide_panels, panels_of};

pub const CONTAINER_ID: &str = "method-attributes";
pub const PANEL_SUFFIX: &str = "-formset";
pub const TRIGGER_IDS: [&str; 6] = [
    "ingestMethod",
    "clumpMethod",
    "fetchMethod",
    "assocMethod",
    "probabilityMethod",
    "fireTypeMethod",
];

pub fn panel_id(option_text: &str) -> String {
    format!("{option_text}{PANEL_SUFFIX}")
}

pub struct AttributeForm<P: PageLookup> {
    page: P,
}

impl<P: PageLookup> AttributeForm<P> {
    pub fn bind(page: P) -> Self {
        Self { page }
    }

    /// Trigger selects present on this page.
    pub fn triggers(&self) -> Vec<P::Node> {
        TRIGGER_IDS
            .iter()
            .filter_map(|id| self.page.element_by_id(id))
            .collect()
    }

    /// Panels are looked up again on every call; the server may swap them.
    pub fn hide_all(&self) {
        hide_panels(&panels_of(&self.page, CONTAINER_ID));
    }

    /// Shows the panel of every selected option and returns the ids shown.
    pub fn show_selected(&self) -> Vec<String> {
        let mut shown = Vec::new();
        for text in self.page.selected_option_texts() {
            let id = panel_id(&text);
            match find_by_identifier(&self.page, &id) {
                Some(panel) => {
                    panel.set_visible(true);
                    shown.push(id);
                }
                None => debug!("no attribute panel for option {text:?}"),
            }
        }
        shown
    }

    pub fn refresh(&self) -> Vec<String> {
        self.hide_all();
        self.show_selected()
    }
}
