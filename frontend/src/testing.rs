//! In-memory page, fetcher and timer used by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;

use crate::error::PageError;
use crate::transport::{Fetch, Sleep};
use crate::view::{PageLookup, ViewNode};

#[derive(Debug)]
struct NodeData {
    id: String,
    tag: String,
    attributes: HashMap<String, String>,
    visible: bool,
    html: String,
    children: Vec<FakeNode>,
}

#[derive(Debug, Clone)]
pub struct FakeNode(Rc<RefCell<NodeData>>);

impl FakeNode {
    fn new(id: &str, tag: &str) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            id: id.to_string(),
            tag: tag.to_string(),
            attributes: HashMap::new(),
            visible: true,
            html: String::new(),
            children: Vec::new(),
        })))
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn html(&self) -> String {
        self.0.borrow().html.clone()
    }
}

impl ViewNode for FakeNode {
    fn id(&self) -> String {
        self.0.borrow().id.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_visible(&self, visible: bool) {
        self.0.borrow_mut().visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.0.borrow().visible
    }

    fn set_inner_html(&self, html: &str) {
        self.0.borrow_mut().html = html.to_string();
    }
}

#[derive(Debug, Default)]
pub struct FakePage {
    elements: RefCell<Vec<FakeNode>>,
    selected: RefCell<Vec<String>>,
    body: RefCell<Option<FakeNode>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&self, id: &str) -> FakeNode {
        let node = FakeNode::new(id, "div");
        self.elements.borrow_mut().push(node.clone());
        node
    }

    pub fn add_panel(&self, container_id: &str, id: &str) -> FakeNode {
        self.add_child(container_id, id, "div")
    }

    pub fn add_child(&self, container_id: &str, id: &str, tag: &str) -> FakeNode {
        let container = self.node(container_id);
        let node = FakeNode::new(id, tag);
        container.0.borrow_mut().children.push(node.clone());
        self.elements.borrow_mut().push(node.clone());
        node
    }

    pub fn set_body(&self) -> FakeNode {
        let node = FakeNode::new("", "body");
        *self.body.borrow_mut() = Some(node.clone());
        node
    }

    pub fn select_options(&self, texts: &[&str]) {
        *self.selected.borrow_mut() = texts.iter().map(ToString::to_string).collect();
    }

    pub fn node(&self, id: &str) -> FakeNode {
        self.element_by_id(id)
            .unwrap_or_else(|| panic!("no element with id {id}"))
    }

    pub fn visible_ids(&self, container_id: &str) -> Vec<String> {
        self.node(container_id)
            .0
            .borrow()
            .children
            .iter()
            .filter(|child| child.is_visible())
            .map(ViewNode::id)
            .collect()
    }
}

impl PageLookup for FakePage {
    type Node = FakeNode;

    fn element_by_id(&self, id: &str) -> Option<FakeNode> {
        self.elements
            .borrow()
            .iter()
            .find(|node| node.0.borrow().id == id)
            .cloned()
    }

    fn query_selector(&self, selector: &str) -> Option<FakeNode> {
        let id = parse_id_selector(selector)?;
        self.element_by_id(&id)
    }

    fn child_panels(&self, container: &FakeNode) -> Vec<FakeNode> {
        container
            .0
            .borrow()
            .children
            .iter()
            .filter(|child| child.0.borrow().tag == "div")
            .cloned()
            .collect()
    }

    fn selected_option_texts(&self) -> Vec<String> {
        self.selected.borrow().clone()
    }

    fn body(&self) -> Option<FakeNode> {
        self.body.borrow().clone()
    }
}

/// Parses a bare `#ident` selector. Anything after the identifier (an
/// unescaped `.`, `[`, space...) makes it a compound selector, which the
/// fake page never matches, same as a browser looking for a missing class.
fn parse_id_selector(selector: &str) -> Option<String> {
    let mut chars = selector.strip_prefix('#')?.chars().peekable();
    let mut id = String::new();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            let mut hex = String::new();
            while let Some(next) = chars.peek().copied() {
                if hex.len() < 6 && next.is_ascii_hexdigit() {
                    hex.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            if hex.is_empty() {
                id.push(chars.next()?);
            } else {
                if chars.peek() == Some(&' ') {
                    chars.next();
                }
                id.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
            }
        } else if ch == '-' || ch == '_' || ch.is_alphanumeric() || !ch.is_ascii() {
            id.push(ch);
        } else {
            return None;
        }
    }

    (!id.is_empty()).then_some(id)
}

/// Fetcher answering from per-URL scripts and recording every request.
#[derive(Debug, Default)]
pub struct ScriptedFetch {
    queued: RefCell<HashMap<String, VecDeque<Result<String, PageError>>>>,
    fixed: RefCell<HashMap<String, String>>,
    hung: RefCell<HashSet<String>>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedFetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `url` with `body` on every request that has nothing queued.
    pub fn always(&self, url: &str, body: &str) {
        self.fixed
            .borrow_mut()
            .insert(url.to_string(), body.to_string());
    }

    pub fn then(&self, url: &str, response: Result<&str, PageError>) {
        self.queued
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back(response.map(ToString::to_string));
    }

    /// Requests to `url` never complete.
    pub fn hang(&self, url: &str) {
        self.hung.borrow_mut().insert(url.to_string());
    }

    pub fn count(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|seen| *seen == url).count()
    }
}

#[async_trait(?Send)]
impl Fetch for ScriptedFetch {
    async fn get_text(&self, url: &str) -> Result<String, PageError> {
        self.requests.borrow_mut().push(url.to_string());
        if self.hung.borrow().contains(url) {
            return std::future::pending().await;
        }
        if let Some(next) = self
            .queued
            .borrow_mut()
            .get_mut(url)
            .and_then(VecDeque::pop_front)
        {
            return next;
        }
        self.fixed
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| network_error(url))
    }
}

pub fn network_error(url: &str) -> PageError {
    PageError::Network {
        url: url.to_string(),
        message: "connection refused".to_string(),
    }
}

#[derive(Debug, Default)]
pub struct RecordingSleep {
    naps: RefCell<Vec<u32>>,
}

impl RecordingSleep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn naps(&self) -> Vec<u32> {
        self.naps.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Sleep for RecordingSleep {
    async fn sleep_ms(&self, millis: u32) {
        self.naps.borrow_mut().push(millis);
    }
}
