use {
    anyhow::{Context, Result, bail},
    base::*,
    inference::{Classifier, ModelConfig},
    ripeness::*,
    std::{env, path::PathBuf},
    tokio::io::{AsyncBufReadExt, BufReader},
    video::{CameraConfig, FrameSource},
};

const USAGE: &str = "usage: apple-scan scan <image> | apple-scan live [<image>]";

fn print_result(result: &PredictionResult) {
    let summary = result.summary();
    println!("{}", summary.headline);
    if !result.is_degraded() {
        println!("  {}: {}", summary.title, summary.description);
    }
    println!("  confidence {}, {}, {}", summary.confidence, summary.color, summary.date);
}

fn load_classifier() -> Result<Classifier> {
    let path: PathBuf = env::var("APPLE_SCAN_MODEL")
        .unwrap_or_else(|_| "models/apple_ripeness.json".to_string())
        .into();
    let config = ModelConfig::from_file(&path)
        .with_context(|| format!("reading model config {}", path.display()))?;
    Ok(Classifier::load(&config))
}

async fn scan(path: &str) -> Result<()> {
    let classifier = load_classifier()?;
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path))?;
    match import_image(&classifier, &data).await {
        Ok(result) => print_result(&result),
        Err(error) => println!("{}", error),
    }
    Ok(())
}

#[cfg(feature = "v4l2")]
async fn open_source(replay: Option<&str>, config: CameraConfig) -> Result<FrameSource> {
    match replay {
        Some(path) => replay_source(path, config).await,
        None => Ok(FrameSource::new(video::V4l2Device::new(), config)),
    }
}

#[cfg(not(feature = "v4l2"))]
async fn open_source(replay: Option<&str>, config: CameraConfig) -> Result<FrameSource> {
    match replay {
        Some(path) => replay_source(path, config).await,
        None => bail!("no camera backend built in, pass an image to replay"),
    }
}

async fn replay_source(path: &str, config: CameraConfig) -> Result<FrameSource> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path))?;
    let image = image::decode_image(&data).await?;
    Ok(FrameSource::new(video::ReplayDevice::new(image), config))
}

async fn live(replay: Option<&str>) -> Result<()> {
    let classifier = load_classifier()?;
    let source = open_source(replay, CameraConfig::default()).await?;
    let pipeline = CapturePipeline::new(source, classifier, PipelineConfig::default());
    pipeline.start().await?;

    tokio::spawn({
        let mut live = pipeline.live_updates();
        async move {
            while live.changed().await.is_ok() {
                let text = live.borrow_and_update().to_string();
                println!("> {}", text);
            }
        }
    });

    println!("enter: capture, t: torch, q: quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };
        match line.trim() {
            "" => match pipeline.request_capture().await {
                Ok(result) => print_result(&result),
                Err(error) => println!("{}", error),
            },
            "t" => match pipeline.toggle_torch().await {
                Ok(on) => println!("torch {}", if on { "on" } else { "off" }),
                Err(error) => println!("{}", error),
            },
            "q" => break,
            other => println!("unknown command {:?}", other),
        }
    }

    pipeline.stop().await;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_stdout_logger();
    if env::var("APPLE_SCAN_DEBUG").is_err() {
        set_max_level(Level::Info);
    }

    let args: Vec<String> = env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["scan", path] => scan(path).await,
        ["live"] => live(None).await,
        ["live", path] => live(Some(*path)).await,
        _ => bail!(USAGE),
    }
}
