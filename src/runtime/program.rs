use super::cmd::Cmd;
use super::port::SEND_LINK;

/// One-shot initialization input of a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flags(String);

impl Flags {
    /// Name of the slot the host fills when starting a program.
    pub const SLOT: &'static str = "flags";

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for Flags {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A reactive application driven by the runtime.
///
/// `init` builds the first model from the flags; `update` folds every
/// message into the model. Both hand back commands for the runtime to
/// perform, which is the only way a program talks to the outside.
pub trait Program: Send + 'static {
    type Model: Send + 'static;
    type Msg: Send + 'static;

    fn init(&self, flags: Flags) -> anyhow::Result<(Self::Model, Cmd<Self::Msg>)>;

    fn update(&self, model: &mut Self::Model, msg: Self::Msg) -> Cmd<Self::Msg>;

    /// Outgoing ports this program may emit on.
    fn ports(&self) -> &'static [&'static str] {
        &[SEND_LINK]
    }
}
