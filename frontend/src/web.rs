//! Browser side: `web_sys` implementations of the view traits and the
//! event wiring of each page behavior.

use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement, HtmlOptionElement};

use crate::attribute_form::AttributeForm;
use crate::error::PageError;
use crate::fetch_form::{FetchFormSwitcher, FormKind};
use crate::poller::{self, JobsDashboard};
use crate::transport::{Fetch, Sleep};
use crate::view::{PageLookup, ViewNode};

#[derive(Debug, Clone)]
pub struct WebNode(pub HtmlElement);

impl ViewNode for WebNode {
    fn id(&self) -> String {
        self.0.id()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_visible(&self, visible: bool) {
        let _ = self
            .0
            .style()
            .set_property("display", if visible { "block" } else { "none" });
    }

    fn is_visible(&self) -> bool {
        self.0
            .style()
            .get_property_value("display")
            .map_or(true, |value| value != "none")
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }
}

#[derive(Debug, Clone)]
pub struct WebPage(pub Document);

impl WebPage {
    pub fn current() -> Option<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self)
    }
}

fn as_html(node: web_sys::Element) -> Option<WebNode> {
    node.dyn_into::<HtmlElement>().ok().map(WebNode)
}

impl PageLookup for WebPage {
    type Node = WebNode;

    fn element_by_id(&self, id: &str) -> Option<WebNode> {
        self.0.get_element_by_id(id).and_then(as_html)
    }

    fn query_selector(&self, selector: &str) -> Option<WebNode> {
        self.0.query_selector(selector).ok().flatten().and_then(as_html)
    }

    fn child_panels(&self, container: &WebNode) -> Vec<WebNode> {
        let children = container.0.children();
        (0..children.length())
            .filter_map(|idx| children.item(idx))
            .filter(|child| child.tag_name().eq_ignore_ascii_case("div"))
            .filter_map(as_html)
            .collect()
    }

    fn selected_option_texts(&self) -> Vec<String> {
        let Ok(options) = self.0.query_selector_all("select option") else {
            return Vec::new();
        };
        (0..options.length())
            .filter_map(|idx| options.item(idx))
            .filter_map(|node| node.dyn_into::<HtmlOptionElement>().ok())
            .filter(HtmlOptionElement::selected)
            .map(|option| option.text_content().unwrap_or_default())
            .collect()
    }

    fn body(&self) -> Option<WebNode> {
        self.0.body().map(WebNode)
    }
}

pub struct GlooFetch;

#[async_trait(?Send)]
impl Fetch for GlooFetch {
    async fn get_text(&self, url: &str) -> Result<String, PageError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|err| PageError::Network {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        if !response.ok() {
            return Err(PageError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }
        response.text().await.map_err(|err| PageError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })
    }
}

pub struct TimerSleep;

#[async_trait(?Send)]
impl Sleep for TimerSleep {
    async fn sleep_ms(&self, millis: u32) {
        TimeoutFuture::new(millis).await;
    }
}

/// Attaches `handler` to each of `events` on `node` for the page lifetime.
pub fn on_events<F>(node: &WebNode, events: &[&str], handler: F)
where
    F: FnMut(web_sys::Event) + 'static,
{
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    for event in events {
        let _ = node
            .0
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
    }
    callback.forget();
}

pub fn install_attribute_form(page: &WebPage) {
    let form = Rc::new(AttributeForm::bind(page.clone()));
    debug!("attribute panels shown on load: {:?}", form.refresh());

    for trigger in form.triggers() {
        let form = form.clone();
        // `change` covers keyboard selection, which fires no click.
        on_events(&trigger, &["click", "change"], move |_event| {
            form.refresh();
        });
    }
}

pub fn install_fetch_form(page: &WebPage) {
    let Some(switcher) = FetchFormSwitcher::bind(page) else {
        return;
    };
    switcher.hide_all_forms();
    let switcher = Rc::new(switcher);

    for kind in FormKind::ALL {
        let Some(link) = page.element_by_id(kind.trigger_id()) else {
            continue;
        };
        let switcher = switcher.clone();
        on_events(&link, &["click"], move |event| {
            event.prevent_default();
            switcher.show(kind);
        });
    }
}

pub fn install_jobs_dashboard(page: &WebPage) {
    let Some(dashboard) = JobsDashboard::bind(page) else {
        return;
    };
    let config = dashboard.config();
    debug!("polling jobs dashboard every {}ms", config.interval_ms);

    spawn_local(async move {
        let outcome = poller::run(&dashboard, &GlooFetch, &TimerSleep, &config).await;
        debug!("jobs dashboard poller finished: {outcome:?}");
    });
}
