use super::cmd::Cmd;
use super::error::RuntimeError;
use super::port::{self, OutgoingPort};
use super::program::{Flags, Program};
use std::any::Any;
use std::collections::HashMap;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

/// A started program. Owns the ports the host subscribes to.
#[derive(Debug)]
pub struct Instance {
    id: Uuid,
    ports: HashMap<&'static str, OutgoingPort>,
    task: JoinHandle<()>,
}

impl Instance {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn port(&mut self, name: &str) -> Result<&mut OutgoingPort, RuntimeError> {
        self.ports
            .get_mut(name)
            .ok_or_else(|| RuntimeError::UnknownPort(name.to_string()))
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn abort(&self) {
        self.task.abort();
    }

    /// Wait for the program task. A panic in `update` comes back as
    /// `RuntimeError::Panicked`; an aborted task counts as stopped.
    pub async fn join(self) -> Result<(), RuntimeError> {
        match self.task.await {
            Ok(()) => Ok(()),
            Err(err) if err.is_panic() => {
                Err(RuntimeError::Panicked(panic_message(err.into_panic())))
            }
            Err(_) => Ok(()),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => message.to_string(),
            Err(_) => "non-string panic payload".to_string(),
        },
    }
}

/// Start `program` with `flags` on its own task.
///
/// `init` runs before this returns, so a program that rejects its flags
/// never gets a task. Must be called from within a tokio runtime.
pub fn init<P: Program>(program: P, flags: Flags) -> Result<Instance, RuntimeError> {
    let id = Uuid::new_v4();
    let span = info_span!("app", %id);

    let (model, cmd) = span
        .in_scope(|| program.init(flags))
        .map_err(RuntimeError::Init)?;

    let mut senders = HashMap::new();
    let mut ports = HashMap::new();
    for &name in program.ports() {
        let (sender, port) = port::channel(name);
        senders.insert(name, sender);
        ports.insert(name, port);
    }

    let (dispatch, inbox) = mpsc::unbounded_channel();
    let worker = Worker {
        program,
        model,
        senders,
        dispatch,
        inbox,
    };
    let task = tokio::spawn(worker.run(cmd).instrument(span));

    Ok(Instance { id, ports, task })
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

struct Worker<P: Program> {
    program: P,
    model: P::Model,
    senders: HashMap<&'static str, UnboundedSender<String>>,
    dispatch: UnboundedSender<P::Msg>,
    inbox: UnboundedReceiver<P::Msg>,
}

impl<P: Program> Worker<P> {
    async fn run(mut self, cmd: Cmd<P::Msg>) {
        if self.perform(cmd) == Flow::Continue {
            // `dispatch` lives as long as the worker, so the inbox only ends on Shutdown.
            while let Some(msg) = self.inbox.recv().await {
                let cmd = self.program.update(&mut self.model, msg);
                if self.perform(cmd) == Flow::Stop {
                    break;
                }
            }
        }
        debug!("program stopped");
    }

    fn perform(&mut self, cmd: Cmd<P::Msg>) -> Flow {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    if self.perform(cmd) == Flow::Stop {
                        return Flow::Stop;
                    }
                }
            }
            Cmd::Msg(msg) => {
                let _ = self.dispatch.send(msg);
            }
            Cmd::After(delay, msg) => {
                let dispatch = self.dispatch.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = dispatch.send(msg);
                });
            }
            Cmd::Port(name, value) => match self.senders.get(name) {
                Some(sender) => {
                    if sender.send(value).is_err() {
                        debug!(port = name, "port receiver dropped, discarding value");
                    }
                }
                None => warn!(port = name, "program emitted on an undeclared port"),
            },
            Cmd::Shutdown => return Flow::Stop,
        }
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{Subscription, SEND_LINK};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Counts up to `limit`, reporting each step, then shuts down.
    struct Counter {
        limit: u32,
        delay: Option<Duration>,
    }

    impl Program for Counter {
        type Model = u32;
        type Msg = ();

        fn init(&self, flags: Flags) -> anyhow::Result<(u32, Cmd<()>)> {
            let start = flags.as_str().parse()?;
            Ok((start, Cmd::Msg(())))
        }

        fn update(&self, model: &mut u32, _msg: ()) -> Cmd<()> {
            if *model >= self.limit {
                return Cmd::Shutdown;
            }
            *model += 1;
            let next = match self.delay {
                Some(delay) => Cmd::After(delay, ()),
                None => Cmd::Msg(()),
            };
            Cmd::batch([Cmd::port(SEND_LINK, model.to_string()), next])
        }
    }

    fn collect(instance: &mut Instance) -> (Arc<Mutex<Vec<String>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let subscription = instance
            .port(SEND_LINK)
            .unwrap()
            .subscribe(move |value| sink.lock().unwrap().push(value))
            .unwrap();
        (seen, subscription)
    }

    #[tokio::test]
    async fn test_messages_arrive_in_program_order() {
        let program = Counter {
            limit: 3,
            delay: None,
        };
        let mut instance = init(program, Flags::from("0".to_string())).unwrap();
        let (seen, subscription) = collect(&mut instance);

        subscription.closed().await;

        assert_eq!(*seen.lock().unwrap(), vec!["1", "2", "3"]);
        assert!(instance.is_finished());
    }

    #[tokio::test]
    async fn test_timer_messages_are_delivered() {
        let program = Counter {
            limit: 2,
            delay: Some(Duration::from_millis(5)),
        };
        let mut instance = init(program, Flags::from("0".to_string())).unwrap();
        let (seen, subscription) = collect(&mut instance);

        subscription.closed().await;

        assert_eq!(*seen.lock().unwrap(), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_values_emitted_before_subscribe_are_kept() {
        let program = Counter {
            limit: 2,
            delay: None,
        };
        let mut instance = init(program, Flags::from("0".to_string())).unwrap();

        // Let the program run to completion with nobody listening.
        while !instance.is_finished() {
            tokio::task::yield_now().await;
        }

        let (seen, subscription) = collect(&mut instance);
        subscription.closed().await;
        assert_eq!(*seen.lock().unwrap(), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_init_failure_is_reported() {
        let program = Counter {
            limit: 1,
            delay: None,
        };
        let err = init(program, Flags::from("not a number".to_string())).unwrap_err();
        assert!(matches!(err, RuntimeError::Init(_)));
        assert!(err.to_string().contains("invalid digit"));
    }

    #[tokio::test]
    async fn test_port_accepts_one_subscriber() {
        let program = Counter {
            limit: 0,
            delay: None,
        };
        let mut instance = init(program, Flags::from("0".to_string())).unwrap();
        let (_seen, _subscription) = collect(&mut instance);

        let err = instance.port(SEND_LINK).unwrap().subscribe(|_| {}).unwrap_err();
        assert!(matches!(err, RuntimeError::AlreadySubscribed(SEND_LINK)));
    }

    #[tokio::test]
    async fn test_unknown_port_is_rejected() {
        let program = Counter {
            limit: 0,
            delay: None,
        };
        let mut instance = init(program, Flags::from("0".to_string())).unwrap();
        let err = instance.port("sendMail").unwrap_err();
        assert_eq!(err.to_string(), "unknown port 'sendMail'");
    }

    struct Stray;

    impl Program for Stray {
        type Model = ();
        type Msg = ();

        fn init(&self, _flags: Flags) -> anyhow::Result<((), Cmd<()>)> {
            let cmd = Cmd::batch([
                Cmd::port("elsewhere", "lost"),
                Cmd::port(SEND_LINK, "kept"),
                Cmd::Shutdown,
                Cmd::port(SEND_LINK, "after shutdown"),
            ]);
            Ok(((), cmd))
        }

        fn update(&self, _model: &mut (), _msg: ()) -> Cmd<()> {
            Cmd::None
        }
    }

    #[tokio::test]
    async fn test_undeclared_port_and_post_shutdown_values_are_dropped() {
        let mut instance = init(Stray, Flags::from(String::new())).unwrap();
        let (seen, subscription) = collect(&mut instance);

        subscription.closed().await;

        assert_eq!(*seen.lock().unwrap(), vec!["kept"]);
    }

    struct Faulty;

    impl Program for Faulty {
        type Model = ();
        type Msg = ();

        fn init(&self, _flags: Flags) -> anyhow::Result<((), Cmd<()>)> {
            Ok(((), Cmd::batch([Cmd::port(SEND_LINK, "before"), Cmd::Msg(())])))
        }

        fn update(&self, _model: &mut (), _msg: ()) -> Cmd<()> {
            panic!("update failed");
        }
    }

    #[tokio::test]
    async fn test_join_reports_a_panicking_program() {
        let mut instance = init(Faulty, Flags::from(String::new())).unwrap();
        let (seen, subscription) = collect(&mut instance);

        subscription.closed().await;
        let err = instance.join().await.unwrap_err();

        assert_eq!(*seen.lock().unwrap(), vec!["before"]);
        assert!(matches!(err, RuntimeError::Panicked(ref message) if message == "update failed"));
    }

    #[tokio::test]
    async fn test_join_after_shutdown() {
        let program = Counter {
            limit: 1,
            delay: None,
        };
        let instance = init(program, Flags::from("0".to_string())).unwrap();
        assert!(instance.join().await.is_ok());
    }
}
