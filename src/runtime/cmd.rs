use std::time::Duration;

/// An effect requested by a program, performed by the runtime after
/// `init` or `update` returns.
#[derive(Debug, PartialEq)]
pub enum Cmd<Msg> {
    None,
    Batch(Vec<Cmd<Msg>>),
    /// Queue a message back to the program.
    Msg(Msg),
    /// Queue a message once the delay has elapsed.
    After(Duration, Msg),
    /// Emit a value on a named outgoing port.
    Port(&'static str, String),
    /// Stop the program and close its ports.
    Shutdown,
}

impl<Msg> Default for Cmd<Msg> {
    fn default() -> Self {
        Cmd::None
    }
}

impl<Msg> Cmd<Msg> {
    pub fn batch(cmds: impl IntoIterator<Item = Cmd<Msg>>) -> Self {
        Cmd::Batch(cmds.into_iter().collect())
    }

    pub fn port(name: &'static str, value: impl Into<String>) -> Self {
        Cmd::Port(name, value.into())
    }
}
