use anyhow::Result;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    sync::mpsc,
};
use tracing::{error, info};

use crate::{checkout::Checkout, handlers::handle_line};

// Replies are written in completion order, not request order.
pub async fn serve<R, W>(checkout: Checkout, reader: R, mut writer: W) -> Result<W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<String>();

    let writer_task = tokio::spawn(async move {
        while let Some(line) = reply_rx.recv().await {
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
        Ok::<_, std::io::Error>(writer)
    });

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let checkout = checkout.clone();
        let reply_tx = reply_tx.clone();
        tokio::spawn(async move {
            let reply = handle_line(&checkout, &line).await;
            match serde_json::to_string(&reply) {
                Ok(encoded) => {
                    if reply_tx.send(encoded).is_err() {
                        error!("Reply writer closed before reply was sent");
                    }
                }
                Err(err) => error!("Failed to encode reply: {err}"),
            }
        });
    }

    info!("Request stream closed");
    drop(reply_tx);

    Ok(writer_task.await??)
}
