//! Locates the carousel parts in an HTML document.

use kuchiki::traits::TendrilSink as _;
use kuchiki::{ElementData, NodeDataRef, NodeRef};
use tracing::debug;

use crate::carousel::{Controls, Slide};
use crate::config::Selectors;
use crate::error::SetupError;

/// What the markup offers the carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselMarkup {
    pub slides: Vec<Slide>,
    pub controls: Controls,
}

pub fn discover(html: &str, selectors: &Selectors) -> Result<CarouselMarkup, SetupError> {
    let document = kuchiki::parse_html().one(html);

    let track = select_first(&document, &selectors.track)?
        .ok_or_else(|| SetupError::MissingTrack(selectors.track.clone()))?;

    let slides: Vec<Slide> = select_all(track.as_node(), &selectors.slide)?
        .into_iter()
        .enumerate()
        .map(|(idx, node)| Slide::new(slide_label(&node, idx)))
        .collect();

    let controls = Controls {
        previous: select_first(&document, &selectors.previous)?.is_some(),
        next: select_first(&document, &selectors.next)?.is_some(),
    };
    if !controls.previous && !controls.next {
        return Err(SetupError::MissingControls {
            previous: selectors.previous.clone(),
            next: selectors.next.clone(),
        });
    }
    if slides.is_empty() {
        return Err(SetupError::NoSlides(selectors.slide.clone()));
    }

    debug!(
        slides = slides.len(),
        previous = controls.previous,
        next = controls.next,
        "carousel markup discovered"
    );
    Ok(CarouselMarkup { slides, controls })
}

fn select_all(
    root: &NodeRef,
    selector: &str,
) -> Result<Vec<NodeDataRef<ElementData>>, SetupError> {
    root.select(selector)
        .map(|nodes| nodes.collect())
        .map_err(|()| SetupError::InvalidSelector(selector.to_string()))
}

fn select_first(
    root: &NodeRef,
    selector: &str,
) -> Result<Option<NodeDataRef<ElementData>>, SetupError> {
    let mut nodes = root
        .select(selector)
        .map_err(|()| SetupError::InvalidSelector(selector.to_string()))?;
    Ok(nodes.next())
}

fn slide_label(node: &NodeDataRef<ElementData>, idx: usize) -> String {
    if let Some(label) = non_empty(node.attributes.borrow().get("aria-label")) {
        return label;
    }
    if let Ok(img) = node.as_node().select_first("img")
        && let Some(alt) = non_empty(img.attributes.borrow().get("alt"))
    {
        return alt;
    }
    let text = node
        .as_node()
        .text_contents()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        format!("slide {}", idx + 1)
    } else {
        text
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
