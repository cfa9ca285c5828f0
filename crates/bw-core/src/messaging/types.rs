/// A reply ready for delivery, tagged with its markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutgoingMessage {
    /// Sent verbatim, no parse mode.
    Text(String),
    /// Telegram HTML subset (`<b>`, `<i>`, `<code>`); dynamic parts already escaped.
    Html(String),
}

impl OutgoingMessage {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Html(s) => s,
        }
    }
}
