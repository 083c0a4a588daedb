use {
    anyhow::Context,
    clap::Parser,
    base::log::{self, LevelFilter},
    roadscan::*,
    sensor::{ReplayConfig, ReplayDevice, SensorIn},
    std::path::PathBuf,
};

/// Classify potholes and lane markings in a recorded drive and republish
/// their depth.
#[derive(Parser)]
#[command(name = "roadscan")]
struct Args {
    /// Directory of recorded color_*.png and depth_*.png frames
    #[arg(long)]
    replay: PathBuf,

    /// Node configuration (JSON); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where published outputs are written
    #[arg(long, default_value = "out")]
    out: PathBuf,

    /// Also write every intermediate mask here
    #[arg(long)]
    diagnostics: Option<PathBuf>,

    /// Log to daily files in this directory instead of stdout
    #[arg(long)]
    log: Option<PathBuf>,

    /// Replay speed in color frames per second, 0 for as fast as possible
    #[arg(long, default_value_t = 30.0)]
    rate: f32,

    /// Start over after the last frame
    #[arg(long = "loop")]
    looping: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match &args.log {
        Some(dir) => base::init_file_logger(dir.clone(), LevelFilter::Info)
            .with_context(|| format!("cannot log to {}", dir.display()))?,
        None => base::init_stdout_logger(LevelFilter::Info),
    }

    let config = match &args.config {
        Some(path) => NodeConfig::load(path)
            .with_context(|| format!("cannot load configuration {}", path.display()))?,
        None => NodeConfig::default(),
    };
    let node = Node::new(config)?;

    log::info!("opening replay from {}", args.replay.display());
    let sensorin = SensorIn::open(ReplayDevice::new(ReplayConfig {
        dir: args.replay.clone(),
        frame_rate: args.rate,
        looping: args.looping,
    }))
    .await?;
    let info = sensorin.info();
    if info.size != node.config().frame_size {
        log::warn!(
            "sensor delivers {}x{}, node expects {}x{}; frames will be rejected",
            info.size.x,
            info.size.y,
            node.config().frame_size.x,
            node.config().frame_size.y
        );
    }

    log::info!("writing outputs to {}", args.out.display());
    let publisher = PngPublisher::new(&args.out)?;
    let diagnostics = match &args.diagnostics {
        Some(dir) => Some(Box::new(PngDiagnostics::new(dir)?) as DiagnosticsSink),
        None => None,
    };

    node.run(sensorin, publisher, diagnostics).await?;
    Ok(())
}
