//! Typed view-model seams.
//!
//! Page behaviors never touch `web_sys` directly. They receive element
//! handles through these traits so the same code runs against the real
//! document in the browser and against an in-memory page in tests.

use std::fmt::Write as _;

/// Handle to one element of the page.
pub trait ViewNode: Clone {
    fn id(&self) -> String;
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_visible(&self, visible: bool);
    fn is_visible(&self) -> bool;
    fn set_inner_html(&self, html: &str);
}

/// Element lookups a behavior needs while binding itself to the page.
pub trait PageLookup {
    type Node: ViewNode;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;
    /// Direct `div` children of `container`.
    fn child_panels(&self, container: &Self::Node) -> Vec<Self::Node>;
    /// Text of every selected `<option>` of every `<select>`, in document order.
    fn selected_option_texts(&self) -> Vec<String>;
    fn body(&self) -> Option<Self::Node>;
}

impl<P: PageLookup + ?Sized> PageLookup for &P {
    type Node = P::Node;

    fn element_by_id(&self, id: &str) -> Option<Self::Node> {
        (**self).element_by_id(id)
    }

    fn query_selector(&self, selector: &str) -> Option<Self::Node> {
        (**self).query_selector(selector)
    }

    fn child_panels(&self, container: &Self::Node) -> Vec<Self::Node> {
        (**self).child_panels(container)
    }

    fn selected_option_texts(&self) -> Vec<String> {
        (**self).selected_option_texts()
    }

    fn body(&self) -> Option<Self::Node> {
        (**self).body()
    }
}

pub fn hide_panels<N: ViewNode>(panels: &[N]) {
    for panel in panels {
        panel.set_visible(false);
    }
}

/// Panels of `container_id`, empty when the container is missing.
pub fn panels_of<P: PageLookup>(page: &P, container_id: &str) -> Vec<P::Node> {
    page.element_by_id(container_id)
        .map(|container| page.child_panels(&container))
        .unwrap_or_default()
}

/// Looks an element up through an `#id` selector, escaping `id` first.
pub fn find_by_identifier<P: PageLookup>(page: &P, id: &str) -> Option<P::Node> {
    page.query_selector(&format!("#{}", escape_identifier(id)))
}

/// Escapes `input` so it can be used verbatim as a CSS identifier.
///
/// Follows the CSSOM `CSS.escape()` algorithm.
pub fn escape_identifier(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let first = input.chars().next();
    let single = input.chars().nth(1).is_none();

    for (idx, ch) in input.chars().enumerate() {
        let leading_digit = ch.is_ascii_digit() && (idx == 0 || (idx == 1 && first == Some('-')));
        match ch {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1f}' | '\u{7f}' => push_code_point(&mut out, ch),
            _ if leading_digit => push_code_point(&mut out, ch),
            '-' if idx == 0 && single => out.push_str("\\-"),
            _ if !ch.is_ascii() || ch == '-' || ch == '_' || ch.is_ascii_alphanumeric() => {
                out.push(ch);
            }
            _ => {
                out.push('\\');
                out.push(ch);
            }
        }
    }
    out
}

fn push_code_point(out: &mut String, ch: char) {
    let _ = write!(out, "\\{:x} ", u32::from(ch));
}
