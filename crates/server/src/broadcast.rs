use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio_tungstenite::{WebSocketStream, accept_async, tungstenite::Message};

/// Tick period used by the binary.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

/// Process-wide counter published to every subscriber once per period.
pub struct Ticker {
    counter: Arc<AtomicU64>,
    tx: broadcast::Sender<u64>,
}

impl Ticker {
    /// Spawn the interval task. Each tick publishes the counter's value and
    /// advances it by one, whether or not anyone is subscribed.
    pub fn spawn(period: Duration) -> Self {
        let counter = Arc::new(AtomicU64::new(0));
        let (tx, _) = broadcast::channel(16);
        let task_counter = Arc::clone(&counter);
        let task_tx = tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let value = task_counter.fetch_add(1, Ordering::SeqCst);
                let _ = task_tx.send(value);
            }
        });
        Self { counter, tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<u64> {
        self.tx.subscribe()
    }

    /// The next value the ticker will publish.
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

async fn handle_connection<S>(mut ws: WebSocketStream<S>, mut ticks: broadcast::Receiver<u64>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        tokio::select! {
            tick = ticks.recv() => {
                let value = match tick {
                    Ok(value) => value,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if ws.send(Message::Text(value.to_string().into())).await.is_err() {
                    break;
                }
            }
            msg = ws.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }
    let _ = ws.close(None).await;
}

/// Accept connections on `listener`; every connected client receives each
/// value the shared counter publishes until it disconnects.
pub async fn run_tcp(listener: TcpListener, period: Duration) -> tokio::io::Result<()> {
    let ticker = Ticker::spawn(period);
    loop {
        let (stream, _) = listener.accept().await?;
        let ws = accept_async(stream).await.map_err(std::io::Error::other)?;
        tracing::debug!(subscribers = ticker.tx.receiver_count(), "client connected");
        tokio::spawn(handle_connection(ws, ticker.subscribe()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ticker_publishes_consecutive_values() {
        let ticker = Ticker::spawn(Duration::from_millis(5));
        let mut ticks = ticker.subscribe();
        let first = ticks.recv().await.unwrap();
        let second = ticks.recv().await.unwrap();
        let third = ticks.recv().await.unwrap();
        assert_eq!(second, first + 1);
        assert_eq!(third, second + 1);
    }

    #[tokio::test]
    async fn current_tracks_published_ticks() {
        let ticker = Ticker::spawn(Duration::from_millis(5));
        let mut ticks = ticker.subscribe();
        let value = ticks.recv().await.unwrap();
        assert!(ticker.current() > value);
    }

    #[tokio::test]
    async fn late_subscriber_does_not_restart_the_counter() {
        let ticker = Ticker::spawn(Duration::from_millis(5));
        let mut early = ticker.subscribe();
        early.recv().await.unwrap();
        let seen = early.recv().await.unwrap();

        let mut late = ticker.subscribe();
        let first_late = late.recv().await.unwrap();
        assert!(first_late > seen);
    }
}
