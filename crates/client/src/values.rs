use tickcast_proto::FrameParser;

/// Outcome of classifying one incoming frame of a numeric stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// The frame carried a numeric payload.
    Value(u64),
    /// A control frame the stream can ignore.
    Control,
    /// The peer is closing the stream.
    Closed,
    /// A frame kind the numeric stream should never carry.
    Unexpected(String),
}

/// Parser for the numeric text streams the tickcast servers emit.
#[derive(Debug, Default)]
pub struct ValueParser;

impl FrameParser for ValueParser {
    type Output = Parsed;

    fn handle_ping(&mut self, _payload: &[u8]) -> Parsed {
        Parsed::Control
    }

    fn handle_pong(&mut self, _payload: &[u8]) -> Parsed {
        Parsed::Control
    }

    fn handle_text(&mut self, text: &str) -> Parsed {
        match text.trim().parse() {
            Ok(value) => Parsed::Value(value),
            Err(_) => Parsed::Unexpected(format!("received non-numeric text payload: {text:?}")),
        }
    }

    fn handle_binary(&mut self, _data: &[u8]) -> Parsed {
        Parsed::Unexpected("received unexpected binary frame".into())
    }

    fn handle_close(&mut self, _reason: Option<&str>) -> Parsed {
        Parsed::Closed
    }

    fn handle_undefined(&mut self) -> Parsed {
        Parsed::Unexpected("received undefined frame op code".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickcast_proto::Frame;

    #[test]
    fn numeric_text_is_a_value() {
        let mut parser = ValueParser;
        assert_eq!(Frame::Text("7".into()).apply(&mut parser), Parsed::Value(7));
        assert_eq!(Frame::Text(" 10 ".into()).apply(&mut parser), Parsed::Value(10));
    }

    #[test]
    fn control_frames_are_skippable() {
        let mut parser = ValueParser;
        assert_eq!(Frame::Ping(vec![1]).apply(&mut parser), Parsed::Control);
        assert_eq!(Frame::Pong(vec![]).apply(&mut parser), Parsed::Control);
    }

    #[test]
    fn close_ends_the_stream() {
        let mut parser = ValueParser;
        assert_eq!(
            Frame::Close(Some("bye".into())).apply(&mut parser),
            Parsed::Closed
        );
    }

    #[test]
    fn unexpected_kinds_are_reported() {
        let mut parser = ValueParser;
        assert!(matches!(
            Frame::Text("abc".into()).apply(&mut parser),
            Parsed::Unexpected(_)
        ));
        assert!(matches!(
            Frame::Binary(vec![0]).apply(&mut parser),
            Parsed::Unexpected(_)
        ));
        assert!(matches!(
            Frame::Undefined.apply(&mut parser),
            Parsed::Unexpected(_)
        ));
    }
}
