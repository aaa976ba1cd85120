//! Jobs dashboard refresh loop.
//!
//! Each tick starts the running and recently finished fragment loads and
//! reads the status feed. Only the status result decides whether another
//! tick follows; fragment loads keep running in the background and never
//! hold back the next tick. There is never more than one pending sleep:
//! the next one starts only after the current tick's status request has
//! completed.

use std::future::Future;
use std::pin::pin;

use futures::FutureExt;
use futures::future::{self, Either, LocalBoxFuture};
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, warn};

use crate::config::PollerConfig;
use crate::error::PageError;
use crate::jobs::JobsFeed;
use crate::transport::{Fetch, Sleep, fetch_json};
use crate::view::{PageLookup, ViewNode};

pub const RUNNING_JOBS_ID: &str = "runningJobs";
pub const RECENTLY_FINISHED_ID: &str = "recentlyFinishedJobs";

/// Fragment loads still in flight.
type Loads<'a> = FuturesUnordered<LocalBoxFuture<'a, ()>>;

pub struct JobsDashboard<N: ViewNode> {
    pub running: Option<N>,
    pub recently_finished: Option<N>,
}

impl<N: ViewNode> JobsDashboard<N> {
    /// `None` unless the page has at least one of the two regions.
    pub fn bind<P: PageLookup<Node = N>>(page: &P) -> Option<Self> {
        let running = page.element_by_id(RUNNING_JOBS_ID);
        let recently_finished = page.element_by_id(RECENTLY_FINISHED_ID);
        if running.is_none() && recently_finished.is_none() {
            return None;
        }
        Some(Self {
            running,
            recently_finished,
        })
    }

    pub fn config(&self) -> PollerConfig {
        PollerConfig::from_regions(self.running.as_ref(), self.recently_finished.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    Idle,
    StatusUnavailable(PageError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    pub ticks: u32,
    pub stop: StopReason,
}

/// One standalone poll tick: returns the status result once it and both
/// fragment loads have finished. Fragment failures leave their region
/// untouched.
pub async fn refresh<N, F>(
    dashboard: &JobsDashboard<N>,
    fetcher: &F,
    config: &PollerConfig,
) -> Result<JobsFeed, PageError>
where
    N: ViewNode,
    F: Fetch + ?Sized,
{
    let mut loads = Loads::new();
    let status = tick(dashboard, fetcher, config, &mut loads).await;
    settle(&mut loads).await;
    status
}

/// Queues this tick's fragment loads and waits for the status feed only.
async fn tick<'a, N, F>(
    dashboard: &'a JobsDashboard<N>,
    fetcher: &'a F,
    config: &'a PollerConfig,
    loads: &mut Loads<'a>,
) -> Result<JobsFeed, PageError>
where
    N: ViewNode,
    F: Fetch + ?Sized,
{
    let regions = [
        (dashboard.running.as_ref(), config.running_jobs_url.as_str()),
        (
            dashboard.recently_finished.as_ref(),
            config.recently_finished_url.as_str(),
        ),
    ];
    for (region, url) in regions {
        if let Some(region) = region {
            loads.push(load_fragment(region, fetcher, url).boxed_local());
        }
    }

    while_loading(fetch_json::<JobsFeed, F>(fetcher, &config.status_url), loads).await
}

async fn load_fragment<N, F>(region: &N, fetcher: &F, url: &str)
where
    N: ViewNode,
    F: Fetch + ?Sized,
{
    match fetcher.get_text(url).await {
        Ok(html) => region.set_inner_html(&html),
        Err(err) => debug!("keeping #{} as is: {err}", region.id()),
    }
}

/// Drives `work` to completion while pending fragment loads make progress.
async fn while_loading<T>(work: impl Future<Output = T>, loads: &mut Loads<'_>) -> T {
    let mut work = pin!(work);
    loop {
        if loads.is_empty() {
            return work.await;
        }
        if let Either::Right((out, _)) = future::select(loads.next(), work.as_mut()).await {
            return out;
        }
    }
}

async fn settle(loads: &mut Loads<'_>) {
    while loads.next().await.is_some() {}
}

/// Polls until the feed reports no running jobs or the status feed fails
/// more often than the config allows. Fragment loads started by the last
/// tick are allowed to finish before this returns.
pub async fn run<N, F, S>(
    dashboard: &JobsDashboard<N>,
    fetcher: &F,
    sleeper: &S,
    config: &PollerConfig,
) -> PollOutcome
where
    N: ViewNode,
    F: Fetch + ?Sized,
    S: Sleep + ?Sized,
{
    let mut loads = Loads::new();
    let mut ticks = 0;
    let mut failures = 0;

    let stop = loop {
        while_loading(sleeper.sleep_ms(config.interval_ms), &mut loads).await;
        ticks += 1;

        match tick(dashboard, fetcher, config, &mut loads).await {
            Ok(feed) if feed.has_running_jobs() => {
                failures = 0;
                debug!("{} job(s) still running", feed.running_jobs.len());
            }
            Ok(_) => {
                info!("no running jobs, dashboard polling stopped after {ticks} tick(s)");
                break StopReason::Idle;
            }
            Err(err) => {
                failures += 1;
                warn!(
                    "job status check failed ({failures}/{}): {err}",
                    config.status_retries.saturating_add(1)
                );
                if failures > config.status_retries {
                    warn!("dashboard polling stopped");
                    break StopReason::StatusUnavailable(err);
                }
            }
        }
    };

    settle(&mut loads).await;
    PollOutcome { ticks, stop }
}
