use super::message::Message;
use super::model::{Model, RunningState};
use crate::runtime::{Cmd, Flags, Program, SEND_LINK};
use anyhow::Result;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Default, Clone)]
pub struct Links {
    interval: Duration,
    exit_when_done: bool,
}

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pause between two reported links.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Shut down after the last link instead of idling.
    pub fn exit_when_done(mut self, exit_when_done: bool) -> Self {
        self.exit_when_done = exit_when_done;
        self
    }

    fn next(&self) -> Cmd<Message> {
        if self.interval.is_zero() {
            Cmd::Msg(Message::Next)
        } else {
            Cmd::After(self.interval, Message::Next)
        }
    }
}

impl Program for Links {
    type Model = Model;
    type Msg = Message;

    fn init(&self, flags: Flags) -> Result<(Model, Cmd<Message>)> {
        let model = Model::from_document(flags.as_str());
        debug!(links = model.pending.len(), "scanned document");
        Ok((model, Cmd::Msg(Message::Next)))
    }

    fn update(&self, model: &mut Model, msg: Message) -> Cmd<Message> {
        if model.running_state == RunningState::Done {
            return Cmd::None;
        }

        match msg {
            Message::Next => match model.pending.pop_front() {
                Some(link) => {
                    model.sent += 1;
                    Cmd::batch([Cmd::port(SEND_LINK, link), self.next()])
                }
                None => {
                    model.running_state = RunningState::Done;
                    debug!(sent = model.sent, "all links reported");
                    if self.exit_when_done {
                        Cmd::Shutdown
                    } else {
                        Cmd::None
                    }
                }
            },
        }
    }
}
