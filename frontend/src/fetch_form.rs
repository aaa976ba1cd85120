//! New fetch / new upload switcher on the data source admin page.

use crate::view::{PageLookup, ViewNode, hide_panels, panels_of};

pub const CONTAINER_ID: &str = "forms";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Fetch,
    Upload,
}

impl FormKind {
    pub const ALL: [Self; 2] = [Self::Fetch, Self::Upload];

    pub fn panel_id(self) -> &'static str {
        match self {
            Self::Fetch => "newFetchForm",
            Self::Upload => "newUploadForm",
        }
    }

    pub fn trigger_id(self) -> &'static str {
        match self {
            Self::Fetch => "newFetchLink",
            Self::Upload => "newUploadLink",
        }
    }
}

pub struct FetchFormSwitcher<N: ViewNode> {
    panels: Vec<N>,
    fetch: Option<N>,
    upload: Option<N>,
}

impl<N: ViewNode> FetchFormSwitcher<N> {
    pub fn bind<P: PageLookup<Node = N>>(page: &P) -> Option<Self> {
        page.element_by_id(CONTAINER_ID)?;
        Some(Self {
            panels: panels_of(page, CONTAINER_ID),
            fetch: page.element_by_id(FormKind::Fetch.panel_id()),
            upload: page.element_by_id(FormKind::Upload.panel_id()),
        })
    }

    pub fn hide_all_forms(&self) {
        hide_panels(&self.panels);
    }

    pub fn show(&self, kind: FormKind) {
        self.hide_all_forms();
        let panel = match kind {
            FormKind::Fetch => self.fetch.as_ref(),
            FormKind::Upload => self.upload.as_ref(),
        };
        if let Some(panel) = panel {
            panel.set_visible(true);
        }
    }
}
