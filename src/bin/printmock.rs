use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sha2::{Digest, Sha256};

use printmock::{
    EditorNudge, ExportFormat, Gesture, ImageSource, MockupConfig, PlacementBook, ProductKind,
    TemplateAssetStore, load_source, render_all, render_product, write_encoded,
};

#[derive(Parser, Debug)]
#[command(name = "printmock", version, about = "Composite a design onto product mockups")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the auto-fit placement for one product as JSON.
    Fit(FitArgs),
    /// Render one product mockup.
    Render(RenderArgs),
    /// Render every product mockup into a directory.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Source design image.
    #[arg(long)]
    source: PathBuf,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding template backgrounds and masks (overrides config and env).
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Editor-relative horizontal nudge applied to the auto-fit.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    nudge_x: f64,

    /// Editor-relative vertical nudge applied to the auto-fit.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    nudge_y: f64,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output format (defaults to the config's).
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// JPEG quality 1..=100.
    #[arg(long)]
    quality: Option<u8>,

    /// Print the SHA-256 of every written file.
    #[arg(long, default_value_t = false)]
    digest: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Jpeg,
    Png,
}

#[derive(Args, Debug)]
struct FitArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[arg(long)]
    product: ProductKind,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[arg(long)]
    product: ProductKind,

    /// Output file.
    #[arg(long)]
    out: PathBuf,

    /// Drag by this many pixels horizontally.
    #[arg(long, allow_hyphen_values = true)]
    dx: Option<f64>,

    /// Drag by this many pixels vertically.
    #[arg(long, allow_hyphen_values = true)]
    dy: Option<f64>,

    /// Uniform resize: change width by this much, height follows.
    #[arg(long, allow_hyphen_values = true)]
    dw: Option<f64>,

    /// Rotate by this many degrees.
    #[arg(long, allow_hyphen_values = true)]
    rotate: Option<f64>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Output directory; files are named `<product>.<ext>`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Fit(args) => cmd_fit(args),
        Command::Render(args) => cmd_render(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

struct Session {
    config: MockupConfig,
    book: PlacementBook,
    source: std::sync::Arc<printmock::PreparedImage>,
}

fn open_session(common: &CommonArgs) -> anyhow::Result<Session> {
    let config = match &common.config {
        Some(path) => MockupConfig::load(path)?,
        None => MockupConfig::default(),
    };
    let mut config = config.with_env_overrides();
    if let Some(dir) = &common.assets {
        config.assets_root = dir.clone();
    }
    config.validate()?;

    let source = load_source(&ImageSource::Path(common.source.clone()))
        .with_context(|| format!("load source '{}'", common.source.display()))?;
    let mut book = PlacementBook::new();
    book.set_source(source.size())?;
    book.set_nudge(EditorNudge::new(common.nudge_x, common.nudge_y));
    Ok(Session {
        config,
        book,
        source,
    })
}

fn export_format(config: &MockupConfig, output: &OutputArgs) -> anyhow::Result<ExportFormat> {
    let configured_quality = match config.export.format {
        ExportFormat::Jpeg { quality } => quality,
        ExportFormat::Png => printmock::encode::raster::DEFAULT_JPEG_QUALITY,
    };
    let format = match (output.format, output.quality) {
        (Some(FormatArg::Png), _) => ExportFormat::Png,
        (Some(FormatArg::Jpeg), q) => ExportFormat::Jpeg {
            quality: q.unwrap_or(configured_quality),
        },
        (None, Some(q)) => ExportFormat::Jpeg { quality: q },
        (None, None) => config.export.format,
    };
    format.validate()?;
    Ok(format)
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.common)?;
    let catalog = session.config.catalog()?;
    let placement = session.book.ensure(&catalog, args.product)?;
    println!("{}", serde_json::to_string_pretty(&placement)?);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.common)?;
    let format = export_format(&session.config, &args.output)?;
    let catalog = session.config.catalog()?;
    let store = TemplateAssetStore::prepare(&catalog, session.config.assets_root.clone())?;

    session.book.select(args.product);
    let mut placement = session.book.ensure(&catalog, args.product)?;
    if args.dx.is_some() || args.dy.is_some() {
        placement = session.book.adjust_active(
            &catalog,
            Gesture::Drag {
                dx: args.dx.unwrap_or(0.0),
                dy: args.dy.unwrap_or(0.0),
            },
        )?;
    }
    if let Some(dw) = args.dw {
        placement = session
            .book
            .adjust_active(&catalog, Gesture::ResizeUniform { dw })?;
    }
    if let Some(degrees) = args.rotate {
        placement = session
            .book
            .adjust_active(&catalog, Gesture::Rotate { degrees })?;
    }

    let bytes = render_product(&store, &session.source, args.product, &placement, format)?;
    write_output(&args.out, &bytes, args.output.digest)
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.common)?;
    let mut settings = session.config.export.clone();
    settings.format = export_format(&session.config, &args.output)?;
    if args.threads.is_some() {
        settings.threads = args.threads;
    }
    let catalog = session.config.catalog()?;
    let store = TemplateAssetStore::prepare(&catalog, session.config.assets_root.clone())?;

    let placements = session.book.snapshot_all(&catalog)?;
    let rendered = render_all(&store, &session.source, &placements, &settings)?;
    for (kind, bytes) in &rendered {
        let path = args
            .out_dir
            .join(format!("{kind}.{}", settings.format.extension()));
        write_output(&path, bytes, args.output.digest)?;
    }
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8], digest: bool) -> anyhow::Result<()> {
    write_encoded(path, bytes)?;
    if digest {
        let hash = Sha256::digest(bytes);
        let hex: String = hash.iter().map(|b| format!("{b:02x}")).collect();
        println!("{hex}  {}", path.display());
    }
    eprintln!("wrote {}", path.display());
    Ok(())
}
