//! Streaming frame pipeline.
//!
//! Wraps a [`GameSession`] in a spawned task fed by a [`FrameSource`]
//! (the pose-estimation collaborator). Frames are processed strictly in
//! arrival order on one task, so all state mutation is serialized; only
//! owned [`GameEvent`] values cross the boundary to consumers.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};

use punchbox_core::{KeypointFrame, Result, Viewport};

use crate::config::EngineConfig;
use crate::session::{GameEvent, GameSession};

/// Source of per-frame keypoint data.
///
/// Implementations deliver at most one outstanding frame at a time;
/// `recv` resolving to `Some(Err(_))` reports a pose-estimation failure
/// for that frame only, while `None` means the source is exhausted.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Start frame delivery
    async fn start(&mut self) -> Result<()>;

    /// Stop frame delivery
    async fn stop(&mut self) -> Result<()>;

    /// Check if delivery is active
    fn is_running(&self) -> bool;

    /// Receive the next frame result
    async fn recv(&mut self) -> Option<Result<KeypointFrame>>;
}

/// Runs a game session over a frame source and streams the events out.
pub struct GamePipeline {
    config: EngineConfig,
    viewport: Viewport,
    is_running: Arc<RwLock<bool>>,
}

impl GamePipeline {
    pub fn new(config: EngineConfig, viewport: Viewport) -> Self {
        Self {
            config,
            viewport,
            is_running: Arc::new(RwLock::new(false)),
        }
    }

    /// Start processing frames from `source`.
    ///
    /// The initial target placement is emitted first; after that, every
    /// notification produced by frame ingestion is forwarded in order.
    /// Pose-estimation failures are logged and skipped. The task ends
    /// when the source is exhausted, the receiver is dropped, or
    /// [`stop`](Self::stop) is called.
    pub async fn start_streaming<S: FrameSource + 'static>(
        &mut self,
        mut source: S,
    ) -> Result<mpsc::Receiver<GameEvent>> {
        let (tx, rx) = mpsc::channel(self.config.event_queue_size);

        source.start().await?;

        *self.is_running.write().await = true;
        let is_running = self.is_running.clone();

        let config = self.config.clone();
        let viewport = self.viewport;

        tokio::spawn(async move {
            let mut session = GameSession::new(config, viewport);

            let mut receiver_gone = false;
            for event in session.initial_events() {
                if tx.send(event).await.is_err() {
                    receiver_gone = true;
                    break;
                }
            }

            while !receiver_gone {
                if !*is_running.read().await {
                    break;
                }

                match source.recv().await {
                    Some(Ok(frame)) => {
                        for event in session.process_frame(&frame) {
                            if tx.send(event).await.is_err() {
                                receiver_gone = true;
                                break;
                            }
                        }
                    }
                    Some(Err(e)) => {
                        // Non-fatal: state is left unchanged for this frame
                        tracing::warn!("pose estimation failed: {}", e);
                    }
                    None => break,
                }
            }

            let _ = source.stop().await;
        });

        Ok(rx)
    }

    /// Stop the pipeline
    pub async fn stop(&mut self) {
        *self.is_running.write().await = false;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
