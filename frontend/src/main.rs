use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

#[component]
fn RuntimeMarker() -> impl IntoView {
    view! {
        <div
            id="smartfire-runtime-marker"
            data-runtime="smartfire-pages"
            data-build={smartfire_pages::BUILD_HASH}
            style="display:none;"
        ></div>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    if let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|doc| doc.get_element_by_id("smartfire-runtime-root"))
        .and_then(|node| node.dyn_into::<HtmlElement>().ok())
    {
        mount_to(root, || view! { <RuntimeMarker /> });
    } else {
        mount_to_body(|| view! { <RuntimeMarker /> });
    }

    smartfire_pages::start();
}
