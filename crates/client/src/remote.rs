use anyhow::{Result, bail};
use futures_util::StreamExt;
use tickcast_proto::Frame;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

use crate::values::{Parsed, ValueParser};

/// WebSocket client that consumes a numeric stream from a tickcast server.
pub struct WsClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    parser: ValueParser,
}

impl WsClient {
    /// Connect to `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        let (ws, _resp) = connect_async(url.as_str()).await?;
        Ok(Self {
            ws,
            parser: ValueParser,
        })
    }

    /// Next numeric value, or `None` once the server closes the stream.
    /// Control frames are skipped; any other frame kind is an error.
    pub async fn next_value(&mut self) -> Result<Option<u64>> {
        while let Some(msg) = self.ws.next().await {
            let frame = Frame::from(msg?);
            match frame.apply(&mut self.parser) {
                Parsed::Value(value) => return Ok(Some(value)),
                Parsed::Control => continue,
                Parsed::Closed => return Ok(None),
                Parsed::Unexpected(reason) => bail!(reason),
            }
        }
        Ok(None)
    }

    /// Drain the stream, collecting every value until the server closes.
    pub async fn collect_values(mut self) -> Result<Vec<u64>> {
        let mut values = Vec::new();
        while let Some(value) = self.next_value().await? {
            values.push(value);
        }
        Ok(values)
    }
}
