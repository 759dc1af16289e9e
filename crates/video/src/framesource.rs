use {
    crate::*,
    base::{log_error, log_info, log_warn},
    image::Image,
    std::{
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        time::Instant,
    },
    tokio::{
        sync::{mpsc, oneshot, watch},
        task::{JoinHandle, spawn_blocking},
    },
};

/// Receiving end of the single-slot latest-frame buffer.
///
/// Holds only the newest frame; a new frame overwrites the previous one.
/// `None` before the first frame and after the session stops.
pub type FrameSlot = watch::Receiver<Option<Arc<VideoFrame>>>;

type StillReply = oneshot::Sender<Result<Image, VideoError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Stopped,
    Starting,
    Running,
}

/// Owns a camera device and pumps its frames into the latest-frame slot.
///
/// Frames are acquired on a blocking worker at the device's own rate. The
/// device is only touched from that worker while the session runs; torch
/// requests are handed over through an atomic flag and applied between frames.
pub struct FrameSource {
    config: CameraConfig,
    device: Option<Box<dyn CameraDevice>>,
    state: SessionState,
    info: Option<DeviceInfo>,
    slot: watch::Sender<Option<Arc<VideoFrame>>>,
    cancel: Arc<AtomicBool>,
    torch: Arc<AtomicBool>,
    stills: Option<mpsc::UnboundedSender<StillReply>>,
    join_handle: Option<JoinHandle<Box<dyn CameraDevice>>>,
}

impl FrameSource {
    pub fn new(device: impl CameraDevice, config: CameraConfig) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            config,
            device: Some(Box::new(device)),
            state: SessionState::Stopped,
            info: None,
            slot,
            cancel: Arc::new(AtomicBool::new(false)),
            torch: Arc::new(AtomicBool::new(false)),
            stills: None,
            join_handle: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// What the device negotiated, while running.
    pub fn info(&self) -> Option<&DeviceInfo> {
        self.info.as_ref()
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn torch_on(&self) -> bool {
        self.torch.load(Ordering::Relaxed)
    }

    /// The most recently acquired frame, if any.
    pub fn latest_frame(&self) -> Option<Arc<VideoFrame>> {
        self.slot.borrow().clone()
    }

    /// Subscribe to the latest-frame slot.
    pub fn subscribe(&self) -> FrameSlot {
        self.slot.subscribe()
    }

    /// Open the device and start acquiring frames.
    ///
    /// Returns once the device is open (or failed to open). Calling it on a
    /// running source does nothing.
    pub async fn start(&mut self) -> Result<(), VideoError> {
        if self.state == SessionState::Running {
            return Ok(());
        }
        let device = self.device.take().ok_or_else(|| {
            VideoError::DeviceUnavailable("device was lost by a previous session".to_string())
        })?;

        self.state = SessionState::Starting;
        self.cancel.store(false, Ordering::Relaxed);
        self.torch.store(false, Ordering::Relaxed);

        let (init_tx, init_rx) = oneshot::channel::<Result<DeviceInfo, VideoError>>();
        let (stills_tx, stills_rx) = mpsc::unbounded_channel();
        let join_handle = spawn_blocking({
            let config = self.config.clone();
            let slot = self.slot.clone();
            let cancel = Arc::clone(&self.cancel);
            let torch = Arc::clone(&self.torch);
            move || run_worker(device, config, slot, cancel, torch, stills_rx, init_tx)
        });

        match init_rx.await {
            Ok(Ok(info)) => {
                log_info!(
                    "camera {} running: {}x{} {:?} @ {} fps, torch: {}",
                    info.name,
                    info.size.x,
                    info.size.y,
                    info.format,
                    info.frame_rate,
                    info.has_torch
                );
                self.info = Some(info);
                self.stills = Some(stills_tx);
                self.join_handle = Some(join_handle);
                self.state = SessionState::Running;
                Ok(())
            }
            Ok(Err(error)) => {
                log_error!("camera open failed: {}", error);
                self.device = join_handle.await.ok();
                self.state = SessionState::Stopped;
                Err(error)
            }
            Err(_) => {
                self.device = join_handle.await.ok();
                self.state = SessionState::Stopped;
                Err(VideoError::Stream("frame worker died during open".to_string()))
            }
        }
    }

    /// Stop acquiring frames and release the device.
    ///
    /// Waits for the worker to finish its current frame and close the device.
    /// Safe to call when already stopped.
    pub async fn stop(&mut self) {
        let Some(join_handle) = self.join_handle.take() else {
            self.state = SessionState::Stopped;
            return;
        };
        self.cancel.store(true, Ordering::Relaxed);
        self.stills = None;
        match join_handle.await {
            Ok(device) => self.device = Some(device),
            Err(error) => log_error!("frame worker failed: {}", error),
        }
        self.slot.send_replace(None);
        self.torch.store(false, Ordering::Relaxed);
        self.info = None;
        self.state = SessionState::Stopped;
        log_info!("camera stopped");
    }

    /// Take one still picture through the device's photo path.
    ///
    /// Served by the frame worker between frames, so it waits at most about
    /// one frame interval plus the capture itself. The configured mounting
    /// orientation is stamped on the result as on streamed frames.
    pub async fn capture_still(&self) -> Result<Image, VideoError> {
        let stills = self
            .stills
            .as_ref()
            .ok_or_else(|| VideoError::Stream("camera is not running".to_string()))?;
        let (reply_tx, reply_rx) = oneshot::channel();
        stills
            .send(reply_tx)
            .map_err(|_| VideoError::Stream("frame worker stopped".to_string()))?;
        reply_rx
            .await
            .map_err(|_| VideoError::Stream("frame worker stopped".to_string()))?
    }

    /// Flip the torch, returning whether it is now requested on.
    ///
    /// Does nothing while stopped. Fails with `TorchUnavailable` when the
    /// device has no torch; callers should treat that as a status, not a fault.
    pub fn toggle_torch(&self) -> Result<bool, VideoError> {
        if self.state != SessionState::Running {
            return Ok(false);
        }
        match &self.info {
            Some(info) if info.has_torch => {
                let on = !self.torch.fetch_xor(true, Ordering::Relaxed);
                log_info!("torch requested {}", if on { "on" } else { "off" });
                Ok(on)
            }
            _ => {
                log_warn!("torch not available");
                Err(VideoError::TorchUnavailable)
            }
        }
    }
}

impl Drop for FrameSource {
    fn drop(&mut self) {
        // the worker notices on its next frame and closes the device
        self.cancel.store(true, Ordering::Relaxed);
    }
}

fn run_worker(
    mut device: Box<dyn CameraDevice>,
    config: CameraConfig,
    slot: watch::Sender<Option<Arc<VideoFrame>>>,
    cancel: Arc<AtomicBool>,
    torch: Arc<AtomicBool>,
    mut stills: mpsc::UnboundedReceiver<StillReply>,
    init_tx: oneshot::Sender<Result<DeviceInfo, VideoError>>,
) -> Box<dyn CameraDevice> {
    // open on the worker thread, some backends are thread-affine
    match device.open(&config) {
        Ok(info) => {
            let _ = init_tx.send(Ok(info));
        }
        Err(error) => {
            let _ = init_tx.send(Err(error));
            return device;
        }
    }

    let mut sequence = 0u64;
    let mut torch_on = false;
    let mut is_open = true;

    while !cancel.load(Ordering::Relaxed) {
        let wanted = torch.load(Ordering::Relaxed);
        if wanted != torch_on {
            match device.set_torch(wanted) {
                Ok(()) => torch_on = wanted,
                Err(error) => {
                    log_warn!("torch change failed: {}", error);
                    torch.store(torch_on, Ordering::Relaxed);
                }
            }
        }

        while let Ok(reply) = stills.try_recv() {
            let still = device
                .capture_still()
                .map(|image| stamp_orientation(image, &config));
            if let Err(error) = &still {
                log_warn!("still capture failed: {}", error);
            }
            let _ = reply.send(still);
        }

        match device.blocking_capture() {
            Ok(image) => {
                let image = stamp_orientation(image, &config);
                sequence += 1;
                slot.send_replace(Some(Arc::new(VideoFrame {
                    image,
                    sequence,
                    captured_at: Instant::now(),
                })));
            }
            Err(error) => {
                log_error!("capture failed: {}", error);
                // close, wait, and reopen the device
                while !cancel.load(Ordering::Relaxed) {
                    log_info!("camera reconnecting...");
                    if is_open {
                        device.close();
                        is_open = false;
                        torch_on = false;
                    }
                    std::thread::sleep(config.reconnect_delay());
                    if device.open(&config).is_ok() {
                        is_open = true;
                        break;
                    }
                }
            }
        }
    }

    if is_open {
        if torch_on {
            let _ = device.set_torch(false);
        }
        device.close();
    }
    device
}

fn stamp_orientation(image: Image, config: &CameraConfig) -> Image {
    match config.orientation() {
        Some(orientation) => image.with_orientation(orientation),
        None => image,
    }
}
