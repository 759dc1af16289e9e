use {
    crate::*,
    base::{log_info, log_warn},
    inference::Classify,
    std::sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    tokio::{sync::watch, task::JoinHandle},
    video::{FrameSlot, FrameSource, VideoError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    LiveStreaming,
    Capturing,
}

struct Session {
    streaming: bool,
    live: Option<JoinHandle<()>>,
}

/// Drives a camera and a classifier: live prediction text while streaming,
/// and one-shot capture-and-classify on request.
///
/// State changes go through one mutex. Only one capture runs at a time; a
/// second request while one is pending fails with `CaptureInProgress`.
pub struct CapturePipeline<C: Classify> {
    config: PipelineConfig,
    source: tokio::sync::Mutex<FrameSource>,
    frames: FrameSlot,
    classifier: Arc<C>,
    session: Mutex<Session>,
    capturing: Arc<AtomicBool>,
    live: Arc<LiveDisplay>,
}

impl<C: Classify> CapturePipeline<C> {
    pub fn new(source: FrameSource, classifier: C, config: PipelineConfig) -> Self {
        let frames = source.subscribe();
        Self {
            config,
            source: tokio::sync::Mutex::new(source),
            frames,
            classifier: Arc::new(classifier),
            session: Mutex::new(Session {
                streaming: false,
                live: None,
            }),
            capturing: Arc::new(AtomicBool::new(false)),
            live: Arc::new(LiveDisplay::new()),
        }
    }

    /// `Idle` once stopped, even while a capture started before the stop
    /// is still resolving.
    pub fn state(&self) -> PipelineState {
        let session = self.lock_session();
        if !session.streaming {
            PipelineState::Idle
        } else if self.capturing.load(Ordering::Acquire) {
            PipelineState::Capturing
        } else {
            PipelineState::LiveStreaming
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The classifier, for classifying pictures that do not come from the camera.
    pub fn classifier(&self) -> &Arc<C> {
        &self.classifier
    }

    /// Subscribe to the camera's latest-frame slot.
    pub fn frames(&self) -> FrameSlot {
        self.frames.clone()
    }

    /// Subscribe to the live prediction text.
    pub fn live_updates(&self) -> watch::Receiver<LiveText> {
        self.live.subscribe()
    }

    /// Start the camera and live prediction.
    ///
    /// Returns once the camera runs. Does nothing if already streaming.
    pub async fn start(&self) -> Result<(), VideoError> {
        let mut source = self.source.lock().await;
        if self.lock_session().streaming {
            return Ok(());
        }
        source.start().await?;

        let live = spawn_live(
            self.frames.clone(),
            Arc::clone(&self.classifier),
            self.config.live_window(),
            Arc::clone(&self.capturing),
            Arc::clone(&self.live),
        );
        let mut session = self.lock_session();
        session.streaming = true;
        session.live = Some(live);
        log_info!("pipeline streaming");
        Ok(())
    }

    /// Stop live prediction and the camera.
    ///
    /// Live results still being computed are dropped. A capture in flight
    /// still resolves to its caller.
    pub async fn stop(&self) {
        let mut source = self.source.lock().await;
        {
            let mut session = self.lock_session();
            if let Some(live) = session.live.take() {
                live.abort();
            }
            session.streaming = false;
        }
        self.live.reset();
        source.stop().await;
        log_info!("pipeline stopped");
    }

    /// Turn the torch on or off, returning whether it is now on.
    ///
    /// A missing torch is reported as `TorchUnavailable` and changes nothing else.
    pub async fn toggle_torch(&self) -> Result<bool, VideoError> {
        self.source.lock().await.toggle_torch()
    }

    /// Capture the latest frame and classify it.
    ///
    /// The full upright frame is classified; the result carries the centered
    /// crop for display. A failed classification resolves as a degraded
    /// result rather than an error.
    pub async fn request_capture(&self) -> Result<PredictionResult, CaptureError> {
        let _capture = self.begin_capture()?;

        let Some(frame) = self.frames.borrow().clone() else {
            log_warn!("capture requested before the first frame");
            return Err(CaptureError::NoFrameAvailable);
        };
        log_info!("capturing frame {}", frame.sequence);

        let upright = frame.image.upright()?;
        let cropped = Arc::new(upright.center_crop(self.config.crop_side())?);

        let result = match self.classifier.classify(Arc::new(upright)).await {
            Ok(classification) => PredictionResult::new(
                Some(cropped),
                classification.label,
                classification.confidence as f64,
            ),
            Err(error) => {
                log_warn!("capture classification failed: {}", error);
                PredictionResult::degraded(Some(cropped))
            }
        };
        log_info!(
            "capture {} done: {} {}",
            result.id,
            result.label,
            result.formatted_confidence()
        );
        Ok(result)
    }

    fn begin_capture(&self) -> Result<CaptureGuard, CaptureError> {
        let session = self.lock_session();
        if !session.streaming {
            return Err(CaptureError::NotStreaming);
        }
        if self
            .capturing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(CaptureError::CaptureInProgress);
        }
        Ok(CaptureGuard {
            capturing: Arc::clone(&self.capturing),
        })
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<C: Classify> Drop for CapturePipeline<C> {
    fn drop(&mut self) {
        if let Some(live) = self.lock_session().live.take() {
            live.abort();
        }
    }
}

// clears the capture flag however the capture ends
struct CaptureGuard {
    capturing: Arc<AtomicBool>,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.capturing.store(false, Ordering::Release);
    }
}
