//! Progressive enhancement for the SmartFire server-rendered pages.
//!
//! Three independent behaviors, each a no-op on pages that lack its
//! elements:
//!
//! - method attribute panels that follow the selected method options,
//! - the new fetch / new upload form switcher,
//! - the jobs dashboard poller.

pub mod attribute_form;
pub mod config;
pub mod error;
pub mod fetch_form;
pub mod jobs;
pub mod logging;
pub mod poller;
pub mod transport;
pub mod view;
pub mod web;

#[cfg(test)]
mod testing;

use tracing::info;

use crate::config::PageConfig;
use crate::view::PageLookup;
use crate::web::WebPage;

pub const BUILD_HASH: &str = match option_env!("BUILD_HASH") {
    Some(hash) => hash,
    None => "unknown",
};
pub const BUILD_EPOCH: &str = match option_env!("BUILD_EPOCH") {
    Some(epoch) => epoch,
    None => "0",
};

pub fn start() {
    let Some(page) = WebPage::current() else {
        return;
    };

    let config = PageConfig::from_body(page.body().as_ref());
    logging::init(&config.log_level);
    info!("smartfire pages frontend {BUILD_HASH} (epoch {BUILD_EPOCH})");

    web::install_attribute_form(&page);
    web::install_fetch_form(&page);
    web::install_jobs_dashboard(&page);
}
