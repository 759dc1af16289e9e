use {
    base::log_debug,
    inference::{Classification, Classify},
    std::{
        fmt,
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, Ordering},
        },
        time::Duration,
    },
    tokio::{
        sync::watch,
        task::{JoinHandle, JoinSet},
        time::Instant,
    },
    video::FrameSlot,
};

/// Text shown over the camera preview.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LiveText {
    #[default]
    Waiting,
    Prediction {
        label: String,
        confidence: f32,
    },
    Failed,
}

impl From<&Classification> for LiveText {
    fn from(classification: &Classification) -> Self {
        LiveText::Prediction {
            label: classification.label.clone(),
            confidence: classification.confidence,
        }
    }
}

impl fmt::Display for LiveText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiveText::Waiting => write!(f, "Waiting for prediction..."),
            LiveText::Prediction { label, confidence } => {
                write!(f, "{} ({}%)", label, (confidence * 100.0) as u32)
            }
            LiveText::Failed => write!(f, "Prediction failed"),
        }
    }
}

struct Shown {
    // bumped by every reset; results from an older epoch are dropped
    epoch: u64,
    // ticket of the newest result on display
    ticket: u64,
}

/// The live prediction text and what may still change it.
///
/// Publishing and resetting share one lock, so once [`reset`](Self::reset)
/// returns no classification started before it can change the text.
pub struct LiveDisplay {
    text: watch::Sender<LiveText>,
    shown: Mutex<Shown>,
}

impl Default for LiveDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveDisplay {
    pub fn new() -> Self {
        let (text, _) = watch::channel(LiveText::Waiting);
        Self {
            text,
            shown: Mutex::new(Shown {
                epoch: 0,
                ticket: 0,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LiveText> {
        self.text.subscribe()
    }

    pub fn current(&self) -> LiveText {
        self.text.borrow().clone()
    }

    pub fn epoch(&self) -> u64 {
        self.lock().epoch
    }

    /// Show `Waiting` and ignore every classification started so far.
    pub fn reset(&self) {
        let mut shown = self.lock();
        shown.epoch += 1;
        shown.ticket = 0;
        self.text.send_replace(LiveText::Waiting);
    }

    /// Show `text` unless it is from an old epoch or older than what is shown.
    fn publish(&self, epoch: u64, ticket: u64, text: LiveText) -> bool {
        let mut shown = self.lock();
        if epoch != shown.epoch || ticket < shown.ticket {
            return false;
        }
        shown.ticket = ticket;
        self.text.send_replace(text);
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Shown> {
        self.shown.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Start classifying live frames from `frames`, publishing into `display`.
///
/// At most one classification starts per `window`. Frames arriving inside a
/// window are dropped except the newest, which is classified when the window
/// ends. Frames are skipped entirely while `paused` is set. Results that
/// complete after a newer one are discarded.
///
/// Results are tied to the display epoch current at spawn: after
/// [`LiveDisplay::reset`], nothing from this task reaches the display, even
/// a classification that was mid-poll when the task was aborted.
pub fn spawn_live<C: Classify>(
    frames: FrameSlot,
    classifier: Arc<C>,
    window: Duration,
    paused: Arc<AtomicBool>,
    display: Arc<LiveDisplay>,
) -> JoinHandle<()> {
    let epoch = display.epoch();
    tokio::spawn(run_live(frames, classifier, window, paused, display, epoch))
}

async fn run_live<C: Classify>(
    mut frames: FrameSlot,
    classifier: Arc<C>,
    window: Duration,
    paused: Arc<AtomicBool>,
    display: Arc<LiveDisplay>,
    epoch: u64,
) {
    let mut running = JoinSet::new();
    let mut next_start: Option<Instant> = None;
    let mut ticket = 0u64;

    while frames.changed().await.is_ok() {
        if let Some(at) = next_start {
            tokio::time::sleep_until(at).await;
        }
        let Some(frame) = frames.borrow_and_update().clone() else {
            continue;
        };
        if paused.load(Ordering::Acquire) {
            log_debug!("live frame {} skipped during capture", frame.sequence);
            continue;
        }

        next_start = Some(Instant::now() + window);
        ticket += 1;
        let image = Arc::new(frame.image.clone());
        running.spawn({
            let classifier = Arc::clone(&classifier);
            let display = Arc::clone(&display);
            async move {
                let live = match classifier.classify(image).await {
                    Ok(classification) => LiveText::from(&classification),
                    Err(error) => {
                        log_debug!("live classification failed: {}", error);
                        LiveText::Failed
                    }
                };
                if !display.publish(epoch, ticket, live) {
                    log_debug!("stale live result {} discarded", ticket);
                }
            }
        });
        while running.try_join_next().is_some() {}
    }
}
