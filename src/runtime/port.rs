use super::error::RuntimeError;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Port the host listens on for links reported by the application.
pub const SEND_LINK: &str = "sendLink";

pub(crate) fn channel(name: &'static str) -> (UnboundedSender<String>, OutgoingPort) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let port = OutgoingPort {
        name,
        receiver: Some(receiver),
    };
    (sender, port)
}

/// Receiving end of a one-way port. Values emitted before anyone subscribes
/// stay queued until the subscriber attaches.
#[derive(Debug)]
pub struct OutgoingPort {
    name: &'static str,
    receiver: Option<UnboundedReceiver<String>>,
}

impl OutgoingPort {
    pub fn subscribe<F>(&mut self, mut callback: F) -> Result<Subscription, RuntimeError>
    where
        F: FnMut(String) + Send + 'static,
    {
        let mut receiver = self
            .receiver
            .take()
            .ok_or(RuntimeError::AlreadySubscribed(self.name))?;
        let name = self.name;

        let task = tokio::spawn(async move {
            while let Some(value) = receiver.recv().await {
                trace!(port = name, "delivering message");
                callback(value);
            }
            debug!(port = name, "port closed");
        });

        Ok(Subscription { task })
    }
}

#[derive(Debug)]
pub struct Subscription {
    task: JoinHandle<()>,
}

impl Subscription {
    /// Resolves once the program has stopped and every queued value went
    /// through the callback. A panic in the callback is resumed here.
    pub async fn closed(self) {
        if let Err(err) = self.task.await {
            if err.is_panic() {
                std::panic::resume_unwind(err.into_panic());
            }
        }
    }
}
