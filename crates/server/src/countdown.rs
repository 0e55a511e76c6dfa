use futures_util::SinkExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio_tungstenite::{WebSocketStream, accept_async, tungstenite::Message};

/// Number of values pushed to each client before the connection is closed.
pub const COUNT: u64 = 10;

async fn handle_connection<S>(mut ws: WebSocketStream<S>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    tracing::debug!("counting down");
    for value in 0..COUNT {
        if ws.send(Message::Text(value.to_string().into())).await.is_err() {
            return;
        }
    }
    tracing::debug!("countdown complete, closing connection");
    let _ = ws.close(None).await;
}

/// Accept connections on `listener` and push the integers `0..COUNT` to each
/// client in order, then close.
pub async fn run_tcp(listener: TcpListener) -> tokio::io::Result<()> {
    loop {
        let (stream, _) = listener.accept().await?;
        let ws = accept_async(stream).await.map_err(std::io::Error::other)?;
        tokio::spawn(handle_connection(ws));
    }
}
