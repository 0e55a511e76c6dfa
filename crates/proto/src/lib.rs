use tokio_tungstenite::tungstenite::Message;

/// A received WebSocket frame, classified by kind.
///
/// This is the wire-level vocabulary of the crate: servers only ever send
/// text frames carrying a decimal integer, but a client has to be prepared
/// to see every kind the transport can deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Ping(Vec<u8>),
    Pong(Vec<u8>),
    Text(String),
    Binary(Vec<u8>),
    /// Close with the peer's reason, if it supplied one.
    Close(Option<String>),
    /// A frame the transport surfaced that maps to no known kind.
    Undefined,
}

impl From<Message> for Frame {
    fn from(msg: Message) -> Self {
        match msg {
            Message::Ping(payload) => Frame::Ping(payload.to_vec()),
            Message::Pong(payload) => Frame::Pong(payload.to_vec()),
            Message::Text(text) => Frame::Text(text.to_string()),
            Message::Binary(data) => Frame::Binary(data.to_vec()),
            Message::Close(close) => Frame::Close(close.map(|c| c.reason.to_string())),
            Message::Frame(_) => Frame::Undefined,
        }
    }
}

/// One handler per frame kind, producing a caller-chosen output.
///
/// Implementations decide what each kind means; [`Frame::apply`] routes a
/// frame to exactly one handler.
pub trait FrameParser {
    type Output;

    fn handle_ping(&mut self, payload: &[u8]) -> Self::Output;
    fn handle_pong(&mut self, payload: &[u8]) -> Self::Output;
    fn handle_text(&mut self, text: &str) -> Self::Output;
    fn handle_binary(&mut self, data: &[u8]) -> Self::Output;
    fn handle_close(&mut self, reason: Option<&str>) -> Self::Output;
    fn handle_undefined(&mut self) -> Self::Output;
}

impl Frame {
    /// Dispatch to the matching handler of `parser`.
    pub fn apply<P: FrameParser>(&self, parser: &mut P) -> P::Output {
        match self {
            Frame::Ping(payload) => parser.handle_ping(payload),
            Frame::Pong(payload) => parser.handle_pong(payload),
            Frame::Text(text) => parser.handle_text(text),
            Frame::Binary(data) => parser.handle_binary(data),
            Frame::Close(reason) => parser.handle_close(reason.as_deref()),
            Frame::Undefined => parser.handle_undefined(),
        }
    }
}
