use std::sync::Arc;

use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::autoplay::{Scheduler, TokioScheduler};
use crate::carousel::{Carousel, CarouselSettings, LogTrack, Track};
use crate::config::Configuration;
use crate::events::CarouselEvent;
use crate::page;
use crate::ready::ReadyWaiter;

/// Waits for the page, mounts the carousel on it and drives it until
/// cancelled. A page that cannot host a carousel is logged and leaves the
/// task finished without error.
pub async fn run(
    cfg: Configuration,
    mut page_ready: ReadyWaiter<Arc<str>>,
    events_tx: Sender<CarouselEvent>,
    events_rx: Receiver<CarouselEvent>,
    cancel: CancellationToken,
) -> Result<()> {
    let html = select! {
        _ = cancel.cancelled() => return Ok(()),
        res = page_ready.wait() => match res {
            Ok(html) => html,
            Err(err) => {
                warn!("carousel not mounted: {err}");
                return Ok(());
            }
        },
    };

    let markup = match page::discover(&html, &cfg.selectors) {
        Ok(markup) => markup,
        Err(err) => {
            warn!("carousel setup failed: {err}");
            return Ok(());
        }
    };

    let scheduler = TokioScheduler::new(events_tx, cancel.child_token());
    let carousel = match Carousel::new(
        markup.slides,
        markup.controls,
        CarouselSettings::from(&cfg),
        scheduler,
        LogTrack::default(),
    ) {
        Ok(carousel) => carousel,
        Err(err) => {
            warn!("carousel setup failed: {err}");
            return Ok(());
        }
    };

    let carousel = drive(carousel, events_rx, cancel).await;
    info!(index = carousel.index(), "carousel stopped");
    Ok(())
}

/// Event loop for a mounted carousel. Events are applied one at a time, so an
/// autoplay tick never interleaves with a manual action. Returns the
/// carousel with autoplay stopped.
pub async fn drive<S: Scheduler, T: Track>(
    mut carousel: Carousel<S, T>,
    mut events: Receiver<CarouselEvent>,
    cancel: CancellationToken,
) -> Carousel<S, T> {
    carousel.init();
    loop {
        select! {
            _ = cancel.cancelled() => break,
            maybe_event = events.recv() => match maybe_event {
                Some(event) => carousel.handle(event),
                None => break,
            },
        }
    }
    carousel.stop_autoplay();
    carousel
}
