use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use hypno_edit::{EditorSession, EditorUpdate, PatternSettings, SessionOpts, TextEngine};

#[derive(Parser, Debug)]
#[command(name = "hypno", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame over a photo and write it as PNG.
    Render(RenderArgs),
    /// Print the default settings document.
    Defaults,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Source photo (PNG, JPEG, ...).
    #[arg(long)]
    image: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Settings JSON in the export format.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// TTF/OTF font for label glyphs.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Sparkle seed (overrides HYPNO_SPARKLE_SEED).
    #[arg(long)]
    seed: Option<u64>,

    /// Aspect-ratio token, e.g. `16:9` or `original`.
    #[arg(long)]
    aspect: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Defaults => cmd_defaults(),
    }
}

fn cmd_defaults() -> anyhow::Result<()> {
    let json = hypno_edit::export_settings_json(&PatternSettings::default(), &[])?;
    println!("{json}");
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut opts = SessionOpts::from_env();
    if args.seed.is_some() {
        opts = opts.with_sparkle_seed(args.seed);
    }

    let mut session = EditorSession::new(opts);
    if let Some(font_path) = &args.font {
        let bytes = std::fs::read(font_path)
            .with_context(|| format!("read font '{}'", font_path.display()))?;
        session = session.with_text_engine(TextEngine::with_font_bytes(bytes)?);
    }

    let photo = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;
    session.load_image(&photo)?;

    if let Some(settings_path) = &args.settings {
        let json = std::fs::read_to_string(settings_path)
            .with_context(|| format!("read settings '{}'", settings_path.display()))?;
        session
            .import_settings(&json)
            .with_context(|| format!("import settings '{}'", settings_path.display()))?;
        // An aspect change during import recenters; keep the file's center instead.
        let wanted = hypno_edit::import_settings_json(&json, &PatternSettings::default())?;
        session.apply(EditorUpdate::SetCenter(wanted.spiral.center()))?;
    }

    if let Some(aspect) = args.aspect {
        session.apply(EditorUpdate::SetField {
            field: "aspectRatio".to_owned(),
            value: serde_json::Value::String(aspect),
        })?;
    }

    let mut rng = session.sparkle_rng();
    let png = session
        .render_png(&mut rng)?
        .context("no canvas for the loaded image")?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
