use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use snapbooth::{
    BoothConfig, CAPTURE_ASPECT, CapturePipeline, DirectoryUploadSink, FilterType, FrameType,
    ImageFileSource, LAYOUT_CONFIGS, LayoutController, LayoutType, OutputFormat, PhotoUploadSink,
    RasterBuffer, STICKER_OPTIONS, StickerType, export_layout,
};

#[derive(Parser, Debug)]
#[command(name = "snapbooth", version, about = "Photobooth capture and layout pipeline")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one image per slot through the capture pipeline and export the framed layout as JPEG.
    Compose(ComposeArgs),
    /// Center-crop an image to an aspect ratio.
    Crop(CropArgs),
    /// Crop, filter and sticker a single image.
    Filter(FilterArgs),
    /// Print the layout, filter, sticker and frame catalogs as JSON.
    Catalog,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Booth config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured layout.
    #[arg(long)]
    layout: Option<LayoutType>,

    /// Override the configured frame (built-in name or custom frame id).
    #[arg(long)]
    frame: Option<String>,

    /// Override the configured filter.
    #[arg(long)]
    filter: Option<FilterType>,

    /// Override the configured sticker.
    #[arg(long)]
    sticker: Option<StickerType>,

    /// Do not mirror captures.
    #[arg(long)]
    no_mirror: bool,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,

    /// Also store the result in this directory, printing the upload receipt.
    #[arg(long)]
    upload_dir: Option<PathBuf>,

    /// Slot images in row-major order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct CropArgs {
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Target width / height.
    #[arg(long, default_value_t = CAPTURE_ASPECT)]
    aspect: f64,
}

#[derive(Parser, Debug)]
struct FilterArgs {
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value = "none")]
    filter: FilterType,

    #[arg(long, default_value = "none")]
    sticker: StickerType,

    /// Mirror horizontally before cropping.
    #[arg(long)]
    mirror: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Crop(args) => cmd_crop(args),
        Command::Filter(args) => cmd_filter(args),
        Command::Catalog => cmd_catalog(),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<BoothConfig> {
    let cfg = match path {
        Some(p) => BoothConfig::from_path(p)?,
        None => BoothConfig::default(),
    };
    Ok(cfg.with_env_overrides())
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(buf: &RasterBuffer, out: &Path) -> anyhow::Result<()> {
    ensure_parent(out)?;
    let encoded = snapbooth::encode(buf, OutputFormat::Png, 0)?;
    std::fs::write(out, &encoded.bytes).with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {} ({}x{})", out.display(), buf.width(), buf.height());
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(layout) = args.layout {
        cfg.layout = layout;
    }
    if let Some(frame) = args.frame {
        cfg.frame = frame;
    }
    if let Some(filter) = args.filter {
        cfg.filter = filter;
    }
    if let Some(sticker) = args.sticker {
        cfg.sticker = sticker;
    }
    if args.no_mirror {
        cfg.mirror = false;
    }
    cfg.validate()?;

    let frames = cfg.frame_registry()?;
    let pipeline = CapturePipeline::new(cfg.capture_settings());
    let mut controller = LayoutController::new();
    let total = controller.initialize(cfg.layout).total_slots();
    if args.inputs.len() > total {
        anyhow::bail!(
            "layout '{}' has {total} slots but {} images were given",
            cfg.layout,
            args.inputs.len()
        );
    }

    for (slot, input) in args.inputs.iter().enumerate() {
        let source = ImageFileSource::open(input)?;
        let shot = pipeline
            .capture(&source)
            .with_context(|| format!("capture slot {slot} from '{}'", input.display()))?;
        controller.capture_slot(Some(slot), shot)?;
    }

    let state = controller
        .state()
        .context("layout session was not initialized")?;
    if !state.is_complete {
        eprintln!(
            "note: {} of {total} slots filled; empty slots are left white",
            state.captured_count()
        );
    }

    let encoded = export_layout(state, &cfg.frame, &frames, None, cfg.jpeg_quality)?;
    ensure_parent(&args.out)?;
    std::fs::write(&args.out, &encoded.bytes)
        .with_context(|| format!("write jpeg '{}'", args.out.display()))?;
    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        encoded.width,
        encoded.height
    );

    if let Some(dir) = args.upload_dir {
        let mut sink = DirectoryUploadSink::new(dir)?;
        let receipt = sink.upload(&encoded, &mut |p| {
            tracing::info!(
                loaded = p.loaded,
                total = p.total,
                percentage = p.percentage,
                "upload progress"
            );
        })?;
        println!("{}", serde_json::to_string(&receipt)?);
    }
    Ok(())
}

fn cmd_crop(args: CropArgs) -> anyhow::Result<()> {
    let src = RasterBuffer::open(&args.in_path)?;
    let out = snapbooth::crop_to_aspect(&src, args.aspect)?;
    write_png(&out, &args.out)
}

fn cmd_filter(args: FilterArgs) -> anyhow::Result<()> {
    let source = ImageFileSource::open(&args.in_path)?;
    let pipeline = CapturePipeline::new(snapbooth::CaptureSettings {
        mirror: args.mirror,
        aspect: CAPTURE_ASPECT,
        filter: args.filter,
        sticker: args.sticker,
    });
    let out = pipeline.capture(&source)?;
    write_png(&out, &args.out)
}

fn cmd_catalog() -> anyhow::Result<()> {
    let filters: Vec<_> = FilterType::ALL
        .iter()
        .map(|f| serde_json::json!({ "type": f, "label": f.label(), "css": f.css_preview() }))
        .collect();
    let frames: Vec<_> = FrameType::ALL
        .iter()
        .map(|f| serde_json::json!({ "type": f, "style": f.style() }))
        .collect();
    let catalog = serde_json::json!({
        "layouts": LAYOUT_CONFIGS,
        "filters": filters,
        "stickers": STICKER_OPTIONS,
        "frames": frames,
    });
    println!("{}", serde_json::to_string_pretty(&catalog)?);
    Ok(())
}
