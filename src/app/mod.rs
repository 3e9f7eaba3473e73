mod links;
mod message;
mod model;
mod update;

pub use links::extract_links;
pub use message::Message;
pub use model::{Model, RunningState};
pub use update::Links;
