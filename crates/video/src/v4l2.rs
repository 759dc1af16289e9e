use {
    crate::*,
    base::Vec2,
    image::{Image, PixelFormat, fourcc_to_string},
    v4l::{
        Device, Format, FourCC, buffer::Type, io::mmap::Stream as MmapStream,
        io::traits::CaptureStream, video::Capture,
    },
};

// buffers queued in the kernel
const BUFFER_COUNT: u32 = 4;

/// Video4Linux2 capture device. Has no torch.
pub struct V4l2Device {
    stream: Option<MmapStream<'static>>,
    size: Vec2<usize>,
    format: PixelFormat,
}

impl V4l2Device {
    pub fn new() -> Self {
        Self {
            stream: None,
            size: Vec2::zero(),
            format: PixelFormat::Yuyv,
        }
    }
}

impl Default for V4l2Device {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraDevice for V4l2Device {
    fn open(&mut self, config: &CameraConfig) -> Result<DeviceInfo, VideoError> {
        self.stream.take();

        let (device, name) = match config.device() {
            Some(path) => (Device::with_path(path)?, path.display().to_string()),
            None => (Device::new(0)?, "/dev/video0".to_string()),
        };
        let device_format = Capture::format(&device)?;

        let desired_size = config.size().unwrap_or(Vec2::new(
            device_format.width as usize,
            device_format.height as usize,
        ));

        // prefer MJPG, fall back to whatever YUYV the driver gives us
        let requested = FourCC::new(&PixelFormat::Jpeg.as_fourcc().to_le_bytes());
        let actual_format = Capture::set_format(
            &device,
            &Format::new(desired_size.x as u32, desired_size.y as u32, requested),
        )?;
        self.size = Vec2::new(actual_format.width as usize, actual_format.height as usize);
        let fourcc = u32::from_le_bytes(actual_format.fourcc.repr);
        self.format = match PixelFormat::from_fourcc(fourcc) {
            Some(format @ (PixelFormat::Yuyv | PixelFormat::Jpeg)) => format,
            _ => {
                return Err(VideoError::DeviceBusy(format!(
                    "unsupported pixel format: {}",
                    fourcc_to_string(fourcc)
                )));
            }
        };

        if let Some(frame_rate) = config.frame_rate() {
            Capture::set_params(
                &device,
                &v4l::video::capture::Parameters::with_fps(frame_rate as u32),
            )?;
        }
        let params = Capture::params(&device)?;
        let frame_rate = params.interval.denominator as f32 / params.interval.numerator.max(1) as f32;

        self.stream = Some(
            MmapStream::with_buffers(&device, Type::VideoCapture, BUFFER_COUNT)
                .map_err(|e| VideoError::DeviceBusy(e.to_string()))?,
        );

        Ok(DeviceInfo {
            name,
            size: self.size,
            format: self.format,
            frame_rate,
            has_torch: false,
        })
    }

    fn close(&mut self) {
        self.stream.take();
    }

    fn blocking_capture(&mut self) -> Result<Image, VideoError> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| VideoError::Stream("no stream".to_string()))?;
        let (data, _metadata) =
            CaptureStream::next(stream).map_err(|e| VideoError::Stream(e.to_string()))?;
        Ok(Image::new(self.size, data.to_vec(), self.format))
    }
}
