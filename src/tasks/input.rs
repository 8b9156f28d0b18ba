//! Line-based stand-in for the browser's input events.

use anyhow::{Context, Result, anyhow, bail};
use theme_toggle::Theme;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::select;
use tokio::sync::mpsc::Sender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::events::{CarouselEvent, Direction, Key, ThemeCommand};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Carousel(CarouselEvent),
    Theme(ThemeCommand),
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield nothing; a swipe
/// expands into its touch start and end.
pub fn parse_line(line: &str) -> Result<Vec<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Vec::new());
    }
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let carousel = |event| vec![Command::Carousel(event)];
    let commands = match (verb.as_str(), args.as_slice()) {
        ("next" | "n", []) => carousel(CarouselEvent::Click(Direction::Next)),
        ("prev" | "p", []) => carousel(CarouselEvent::Click(Direction::Previous)),
        ("left", []) => carousel(CarouselEvent::KeyDown(Key::ArrowLeft)),
        ("right", []) => carousel(CarouselEvent::KeyDown(Key::ArrowRight)),
        ("key", [name]) => carousel(CarouselEvent::KeyDown(Key::from_name(name))),
        ("enter", []) => carousel(CarouselEvent::PointerEnter),
        ("leave", []) => carousel(CarouselEvent::PointerLeave),
        ("touchstart", [x]) => carousel(CarouselEvent::TouchStart { x: coordinate(x)? }),
        ("touchend", [x]) => carousel(CarouselEvent::TouchEnd { x: coordinate(x)? }),
        ("swipe", [from, to]) => vec![
            Command::Carousel(CarouselEvent::TouchStart {
                x: coordinate(from)?,
            }),
            Command::Carousel(CarouselEvent::TouchEnd { x: coordinate(to)? }),
        ],
        ("theme", ["toggle"]) => vec![Command::Theme(ThemeCommand::Toggle)],
        ("theme", ["system" | "reset"]) => vec![Command::Theme(ThemeCommand::FollowSystem)],
        ("theme", [name]) => vec![Command::Theme(ThemeCommand::Set(theme(name)?))],
        ("system", [name]) => vec![Command::Theme(ThemeCommand::SystemChanged(theme(name)?))],
        ("quit" | "exit", []) => vec![Command::Quit],
        _ => bail!("unrecognised command `{line}`"),
    };
    Ok(commands)
}

fn coordinate(raw: &str) -> Result<f32> {
    let x: f32 = raw
        .parse()
        .with_context(|| format!("invalid coordinate `{raw}`"))?;
    if !x.is_finite() {
        return Err(anyhow!("coordinate `{raw}` is not finite"));
    }
    Ok(x)
}

fn theme(raw: &str) -> Result<Theme> {
    Ok(raw.parse::<Theme>()?)
}

/// Read commands until EOF, `quit`, or cancellation, forwarding them to the
/// carousel and theme tasks. Ends by cancelling the shared token.
pub async fn run<R: AsyncBufRead + Unpin>(
    reader: R,
    to_carousel: Sender<CarouselEvent>,
    to_theme: Sender<ThemeCommand>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut lines = reader.lines();
    loop {
        let line = select! {
            _ = cancel.cancelled() => return Ok(()),
            line = lines.next_line() => line.context("failed reading input")?,
        };
        let Some(line) = line else {
            info!("input closed; initiating shutdown");
            break;
        };
        let commands = match parse_line(&line) {
            Ok(commands) => commands,
            Err(err) => {
                warn!("{err:#}");
                continue;
            }
        };
        for command in commands {
            debug!(?command, "input command");
            match command {
                Command::Carousel(event) => {
                    // the carousel task may have declined to mount
                    if to_carousel.send(event).await.is_err() {
                        debug!("carousel is not running; event dropped");
                    }
                }
                Command::Theme(cmd) => {
                    if to_theme.send(cmd).await.is_err() {
                        warn!("theme task is gone; command dropped");
                    }
                }
                Command::Quit => {
                    info!("quit requested; initiating shutdown");
                    cancel.cancel();
                    return Ok(());
                }
            }
        }
    }
    cancel.cancel();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn parses_navigation() {
        assert_eq!(
            parse_line("next").unwrap(),
            vec![Command::Carousel(CarouselEvent::Click(Direction::Next))]
        );
        assert_eq!(
            parse_line("  P ").unwrap(),
            vec![Command::Carousel(CarouselEvent::Click(Direction::Previous))]
        );
        assert_eq!(
            parse_line("key ArrowRight").unwrap(),
            vec![Command::Carousel(CarouselEvent::KeyDown(Key::ArrowRight))]
        );
        assert_eq!(
            parse_line("key Escape").unwrap(),
            vec![Command::Carousel(CarouselEvent::KeyDown(Key::Other(
                "Escape".to_string()
            )))]
        );
    }

    #[test]
    fn swipe_expands_to_touch_pair() {
        assert_eq!(
            parse_line("swipe 300 240.5").unwrap(),
            vec![
                Command::Carousel(CarouselEvent::TouchStart { x: 300.0 }),
                Command::Carousel(CarouselEvent::TouchEnd { x: 240.5 }),
            ]
        );
    }

    #[test]
    fn parses_theme_commands() {
        assert_eq!(
            parse_line("theme toggle").unwrap(),
            vec![Command::Theme(ThemeCommand::Toggle)]
        );
        assert_eq!(
            parse_line("theme dark").unwrap(),
            vec![Command::Theme(ThemeCommand::Set(Theme::Dark))]
        );
        assert_eq!(
            parse_line("system light").unwrap(),
            vec![Command::Theme(ThemeCommand::SystemChanged(Theme::Light))]
        );
        assert_eq!(
            parse_line("theme reset").unwrap(),
            vec![Command::Theme(ThemeCommand::FollowSystem)]
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_line("jump").is_err());
        assert!(parse_line("touchstart abc").is_err());
        assert!(parse_line("touchend NaN").is_err());
        assert!(parse_line("theme sepia").is_err());
        assert!(parse_line("next 3").is_err());
        assert!(parse_line("# comment").unwrap().is_empty());
        assert!(parse_line("").unwrap().is_empty());
    }

    #[tokio::test]
    async fn forwards_commands_and_cancels_on_eof() {
        let input: &[u8] = b"next\nbogus\ntheme toggle\nenter\n";
        let (carousel_tx, mut carousel_rx) = mpsc::channel(8);
        let (theme_tx, mut theme_rx) = mpsc::channel(8);
        let cancel = CancellationToken::new();

        run(input, carousel_tx, theme_tx, cancel.clone()).await.unwrap();

        assert!(cancel.is_cancelled());
        assert_eq!(
            carousel_rx.recv().await,
            Some(CarouselEvent::Click(Direction::Next))
        );
        assert_eq!(carousel_rx.recv().await, Some(CarouselEvent::PointerEnter));
        assert_eq!(theme_rx.recv().await, Some(ThemeCommand::Toggle));
    }

    #[tokio::test]
    async fn quit_stops_reading() {
        let input: &[u8] = b"quit\nnext\n";
        let (carousel_tx, mut carousel_rx) = mpsc::channel(8);
        let (theme_tx, _theme_rx) = mpsc::channel(8);
        let cancel = CancellationToken::new();

        run(input, carousel_tx, theme_tx, cancel.clone()).await.unwrap();

        assert!(cancel.is_cancelled());
        assert!(carousel_rx.try_recv().is_err());
    }
}
