//! One-shot "content is in place" signal.
//!
//! Whatever inserts page content calls [`ReadyNotifier::notify`] once it is
//! done; setup code awaits [`ReadyWaiter::wait`] instead of polling for
//! elements.

use tokio::sync::watch;

use crate::error::ReadyError;

pub struct ReadyNotifier<T> {
    tx: watch::Sender<Option<T>>,
}

#[derive(Clone)]
pub struct ReadyWaiter<T> {
    rx: watch::Receiver<Option<T>>,
}

pub fn channel<T>() -> (ReadyNotifier<T>, ReadyWaiter<T>) {
    let (tx, rx) = watch::channel(None);
    (ReadyNotifier { tx }, ReadyWaiter { rx })
}

impl<T> ReadyNotifier<T> {
    /// Publish the ready value. Consumes the notifier: readiness happens once.
    pub fn notify(self, value: T) {
        // send_replace succeeds even with no waiter left
        self.tx.send_replace(Some(value));
    }
}

impl<T: Clone> ReadyWaiter<T> {
    pub fn is_ready(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Resolve with the published value, immediately if it already exists.
    pub async fn wait(&mut self) -> Result<T, ReadyError> {
        match self.rx.wait_for(Option::is_some).await {
            Ok(value) => value.clone().ok_or(ReadyError::Abandoned),
            Err(_) => Err(ReadyError::Abandoned),
        }
    }
}
