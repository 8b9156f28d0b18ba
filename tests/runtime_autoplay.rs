use std::sync::Arc;
use std::time::Duration;

use carousel::autoplay::TokioScheduler;
use carousel::carousel::{Carousel, CarouselSettings, Controls, Slide, Transform};
use carousel::config::Configuration;
use carousel::events::{CarouselEvent, Direction};
use carousel::ready;
use carousel::tasks;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

fn slides(n: usize) -> Vec<Slide> {
    (0..n).map(|i| Slide::new(format!("slide {i}"))).collect()
}

#[tokio::test(start_paused = true)]
async fn autoplay_advances_every_interval_and_pauses_on_hover() {
    let (tx, rx) = mpsc::channel(16);
    let cancel = CancellationToken::new();
    let scheduler = TokioScheduler::new(tx.clone(), cancel.child_token());
    let carousel = Carousel::new(
        slides(3),
        Controls::BOTH,
        CarouselSettings::default(),
        scheduler,
        Vec::<Transform>::new(),
    )
    .unwrap();
    let handle = tokio::spawn(tasks::carousel::drive(carousel, rx, cancel.clone()));

    // two ticks: 5s and 10s
    sleep(Duration::from_millis(10_100)).await;

    tx.send(CarouselEvent::PointerEnter).await.unwrap();
    sleep(Duration::from_secs(30)).await;

    tx.send(CarouselEvent::PointerLeave).await.unwrap();
    // the restarted timer waits a full interval
    sleep(Duration::from_millis(4_900)).await;
    tx.send(CarouselEvent::Click(Direction::Previous)).await.unwrap();
    sleep(Duration::from_millis(4_900)).await;

    cancel.cancel();
    let carousel = handle.await.unwrap();
    let offsets: Vec<f64> = carousel.track().iter().map(|t| t.offset_percent).collect();
    assert_eq!(offsets.len(), 4, "first paint, two ticks, one click: {offsets:?}");
    assert_eq!(carousel.index(), 1);
    assert!(!carousel.autoplay_active());
    assert_eq!(carousel.scheduler().active(), 0);
}

#[tokio::test(start_paused = true)]
async fn manual_navigation_resets_the_countdown() {
    let (tx, rx) = mpsc::channel(16);
    let cancel = CancellationToken::new();
    let scheduler = TokioScheduler::new(tx.clone(), cancel.child_token());
    let carousel = Carousel::new(
        slides(4),
        Controls::BOTH,
        CarouselSettings::default(),
        scheduler,
        Vec::<Transform>::new(),
    )
    .unwrap();
    let handle = tokio::spawn(tasks::carousel::drive(carousel, rx, cancel.clone()));

    sleep(Duration::from_millis(4_000)).await;
    tx.send(CarouselEvent::Click(Direction::Next)).await.unwrap();
    // 8s since start but only 4s since the click: no tick yet
    sleep(Duration::from_millis(4_000)).await;

    cancel.cancel();
    let carousel = handle.await.unwrap();
    assert_eq!(carousel.index(), 1);
}

#[tokio::test(start_paused = true)]
async fn setup_failure_leaves_task_finished_cleanly() {
    let (tx, rx) = mpsc::channel(16);
    let (notifier, waiter) = ready::channel::<Arc<str>>();
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(tasks::carousel::run(
        Configuration::default(),
        waiter,
        tx.clone(),
        rx,
        cancel.clone(),
    ));

    notifier.notify(Arc::from("<div class=\"carousel\"></div>"));
    handle.await.unwrap().unwrap();

    assert!(
        tx.send(CarouselEvent::PointerEnter).await.is_err(),
        "no carousel is listening"
    );
}

#[tokio::test(start_paused = true)]
async fn mounts_once_page_is_ready() {
    let (tx, rx) = mpsc::channel(16);
    let (notifier, waiter) = ready::channel::<Arc<str>>();
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(tasks::carousel::run(
        Configuration::default(),
        waiter,
        tx.clone(),
        rx,
        cancel.clone(),
    ));

    sleep(Duration::from_secs(1)).await;
    assert!(!handle.is_finished(), "waits for the page");

    notifier.notify(Arc::from(
        r#"<div class="carousel-track"><div class="carousel-slide">a</div></div>
           <button class="carousel-btn next">next</button>"#,
    ));
    sleep(Duration::from_secs(1)).await;
    tx.send(CarouselEvent::Click(Direction::Next)).await.unwrap();

    cancel.cancel();
    handle.await.unwrap().unwrap();
}
