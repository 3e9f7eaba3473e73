#[derive(Debug, PartialEq)]
pub enum Message {
    /// Report the next pending link, if any.
    Next,
}
