use anyhow::Result;
use theme_toggle::{ThemeController, ThemeStore};
use tokio::select;
use tokio::sync::mpsc::Receiver;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::events::ThemeCommand;

pub async fn run<S: ThemeStore>(
    mut controller: ThemeController<S>,
    mut commands: Receiver<ThemeCommand>,
    cancel: CancellationToken,
) -> Result<()> {
    info!(theme = %controller.current(), "theme applied");
    loop {
        select! {
            _ = cancel.cancelled() => break,
            maybe_cmd = commands.recv() => {
                let Some(cmd) = maybe_cmd else { break };
                apply(&mut controller, cmd);
            }
        }
    }
    Ok(())
}

pub fn apply<S: ThemeStore>(controller: &mut ThemeController<S>, cmd: ThemeCommand) {
    match cmd {
        ThemeCommand::Toggle => {
            let theme = controller.toggle();
            info!(%theme, "theme applied");
        }
        ThemeCommand::Set(theme) => {
            controller.set(theme);
            info!(%theme, "theme applied");
        }
        ThemeCommand::SystemChanged(system) => match controller.system_changed(system) {
            Some(theme) => info!(%theme, "theme applied"),
            None => debug!(%system, current = %controller.current(), "system theme change masked"),
        },
        ThemeCommand::FollowSystem => {
            let theme = controller.follow_system();
            info!(%theme, "theme follows system preference");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use theme_toggle::{MemoryThemeStore, Theme};

    #[test]
    fn commands_drive_controller() {
        let mut ctl = ThemeController::new(MemoryThemeStore::default(), Theme::Light);
        apply(&mut ctl, ThemeCommand::SystemChanged(Theme::Dark));
        assert_eq!(ctl.current(), Theme::Dark);
        apply(&mut ctl, ThemeCommand::Toggle);
        assert_eq!(ctl.current(), Theme::Light);
        apply(&mut ctl, ThemeCommand::Set(Theme::Dark));
        assert_eq!(ctl.explicit(), Some(Theme::Dark));
        apply(&mut ctl, ThemeCommand::FollowSystem);
        assert_eq!(ctl.explicit(), None);
        assert_eq!(ctl.current(), Theme::Dark);
    }
}
