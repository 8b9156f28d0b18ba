use carousel::autoplay::testkit::ManualScheduler;
use carousel::carousel::{Carousel, CarouselSettings, Transform};
use carousel::config::Selectors;
use carousel::events::{CarouselEvent, Direction};
use carousel::page;

const PAGE: &str = r#"
<section class="carousel">
  <button class="carousel-btn prev">Previous</button>
  <div class="carousel-track">
    <div class="carousel-slide"><img src="1.jpg" alt="One"></div>
    <div class="carousel-slide"><img src="2.jpg" alt="Two"></div>
    <div class="carousel-slide"><img src="3.jpg" alt="Three"></div>
  </div>
  <button class="carousel-btn next">Next</button>
</section>
"#;

fn mounted() -> Carousel<ManualScheduler, Vec<Transform>> {
    let markup = page::discover(PAGE, &Selectors::default()).expect("page hosts a carousel");
    let mut carousel = Carousel::new(
        markup.slides,
        markup.controls,
        CarouselSettings::default(),
        ManualScheduler::new(),
        Vec::new(),
    )
    .expect("slides present");
    carousel.init();
    carousel
}

#[test]
fn three_next_clicks_wrap_around() {
    let mut carousel = mounted();
    assert_eq!(carousel.len(), 3);
    assert_eq!(carousel.index(), 0);
    assert_eq!(carousel.scheduler().starts(), 1);
    assert_eq!(carousel.scheduler().cancels(), 0);

    let mut seen = Vec::new();
    for click in 1..=3 {
        carousel.handle(CarouselEvent::Click(Direction::Next));
        seen.push(carousel.current().label.clone());
        assert_eq!(
            carousel.scheduler().cancels(),
            click,
            "each click stops autoplay once"
        );
        assert_eq!(
            carousel.scheduler().starts(),
            click + 1,
            "each click restarts autoplay once"
        );
        assert_eq!(carousel.scheduler().active_timers(), 1);
    }

    assert_eq!(carousel.index(), 0);
    assert_eq!(seen, ["Two", "Three", "One"]);

    let offsets: Vec<f64> = carousel
        .track()
        .iter()
        .map(|t| t.offset_percent)
        .collect();
    assert_eq!(offsets.len(), 4);
    assert_eq!(offsets[0], 0.0);
    assert!((offsets[1] + 100.0 / 3.0).abs() < 1e-9);
    assert!((offsets[2] + 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(offsets[3], 0.0);
    assert!(carousel.track()[0].transition.is_none());
    assert!(carousel.track()[1..].iter().all(|t| t.transition.is_some()));
}

#[test]
fn hover_pauses_without_advancing() {
    let mut carousel = mounted();
    let renders = carousel.track().len();

    carousel.handle(CarouselEvent::PointerEnter);
    assert!(!carousel.autoplay_active());
    assert_eq!(carousel.scheduler().active_timers(), 0);

    carousel.handle(CarouselEvent::PointerLeave);
    assert!(carousel.autoplay_active());
    assert_eq!(carousel.scheduler().active_timers(), 1);

    assert_eq!(carousel.index(), 0);
    assert_eq!(carousel.track().len(), renders, "hover never renders");
}

#[test]
fn ticks_while_hovered_are_stale() {
    let mut carousel = mounted();
    let timer = carousel.scheduler().active_ids()[0];

    carousel.handle(CarouselEvent::PointerEnter);
    carousel.handle(CarouselEvent::Tick(timer));
    assert_eq!(carousel.index(), 0);

    carousel.handle(CarouselEvent::PointerLeave);
    let timer = carousel.scheduler().active_ids()[0];
    carousel.handle(CarouselEvent::Tick(timer));
    assert_eq!(carousel.index(), 1);
}
