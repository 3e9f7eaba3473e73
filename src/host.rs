use crate::core::FileLoader;
use crate::error::HostError;
use crate::runtime::{self, Flags, Instance, Program, Subscription, SEND_LINK};
use std::future::Future;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info};

/// Not started yet. `start` consumes it, so one bridge starts one application.
pub struct Bridge<P> {
    program: P,
}

impl<P: Program> Bridge<P> {
    pub fn new(program: P) -> Self {
        Self { program }
    }

    /// Start the application with `content` as its flags, then attach
    /// `on_link` as the only listener of its `sendLink` port.
    pub fn start<F>(self, content: String, on_link: F) -> Result<Running, HostError>
    where
        F: FnMut(String) + Send + 'static,
    {
        let mut instance = runtime::init(self.program, Flags::from(content))?;
        let subscription = instance.port(SEND_LINK)?.subscribe(on_link)?;
        info!(app = %instance.id(), slot = Flags::SLOT, port = SEND_LINK, "application running");
        Ok(Running {
            instance,
            subscription,
        })
    }
}

pub struct Running {
    instance: Instance,
    subscription: Subscription,
}

impl Running {
    /// Wait until the application stops or `shutdown` resolves.
    ///
    /// When the application stops on its own, every link it reported has been
    /// delivered by the time this returns. A program that panicked is
    /// reported as `HostError::Crashed`.
    pub async fn until_stopped(
        self,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), HostError> {
        let Running {
            instance,
            subscription,
        } = self;
        let id = instance.id();

        let stopped = tokio::select! {
            _ = subscription.closed() => true,
            _ = shutdown => false,
        };

        if stopped {
            instance.join().await.map_err(HostError::Crashed)?;
            info!(app = %id, "application stopped");
        } else {
            info!(app = %id, "shutdown requested");
            instance.abort();
        }
        Ok(())
    }
}

/// Callback printing each link on its own line, flushed immediately.
pub fn printer<W>(mut out: W) -> impl FnMut(String) + Send + 'static
where
    W: Write + Send + 'static,
{
    move |link| {
        if let Err(err) = writeln!(out, "{link}").and_then(|()| out.flush()) {
            error!(%err, "failed to write link");
        }
    }
}

/// Load `path`, run `program` on its content and print its links to `out`
/// until the program stops or `shutdown` resolves.
///
/// The program is never started when the file cannot be read.
pub async fn run<L, P, W>(
    path: &Path,
    loader: &L,
    program: P,
    out: W,
    shutdown: impl Future<Output = ()>,
) -> Result<(), HostError>
where
    L: FileLoader,
    P: Program,
    W: Write + Send + 'static,
{
    let content = loader.load(path).await?;
    debug!("got data - {content}");

    Bridge::new(program)
        .start(content, printer(out))?
        .until_stopped(shutdown)
        .await
}
