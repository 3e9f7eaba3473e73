use super::links::extract_links;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct Model {
    pub pending: VecDeque<String>,
    pub sent: usize,
    pub running_state: RunningState,
}

impl Model {
    pub fn from_document(text: &str) -> Self {
        Self {
            pending: extract_links(text).into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub enum RunningState {
    #[default]
    Running,
    Done,
}
