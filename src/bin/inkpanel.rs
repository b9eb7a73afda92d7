use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use inkpanel::{
    BubbleCompositor, BubbleStyle, Canvas, DialogueTurn, FontSource, PageCompositor, Panel,
    PngDirSink, RunConfig, Scene, SceneRunner,
};

#[derive(Parser, Debug)]
#[command(name = "inkpanel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Letter dialogue onto one panel image.
    Letter(LetterArgs),
    /// Compose up to three panel images onto a page.
    Page(PageArgs),
    /// Generate, letter and paginate a whole scene.
    Scene(SceneArgs),
}

#[derive(Parser, Debug)]
struct LetterArgs {
    /// Panel artwork (any format `image` can decode).
    #[arg(long)]
    image: PathBuf,

    /// Dialogue JSON: an array of `{ "speaker"?, "text" }` objects.
    #[arg(long)]
    dialogue: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Bubble style: `outline` or `glass`.
    #[arg(long, default_value = "outline")]
    style: BubbleStyle,

    /// TrueType font; the default font is searched for when omitted.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PageArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Page width in pixels.
    #[arg(long, default_value_t = inkpanel::DEFAULT_PAGE_SIZE.width)]
    width: u32,

    /// Page height in pixels.
    #[arg(long, default_value_t = inkpanel::DEFAULT_PAGE_SIZE.height)]
    height: u32,

    /// Panel images in placement order. Only the first three are placed.
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Scene JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Run configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output root; panels and pages land in `panels/` and `pages/` below it.
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,

    /// Override the configured bubble style.
    #[arg(long)]
    style: Option<BubbleStyle>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Letter(args) => cmd_letter(args),
        Command::Page(args) => cmd_page(args),
        Command::Scene(args) => cmd_scene(args),
    }
}

fn cmd_letter(args: LetterArgs) -> anyhow::Result<()> {
    let artwork = load_image(&args.image)?;
    let text = std::fs::read_to_string(&args.dialogue)
        .with_context(|| format!("read dialogue '{}'", args.dialogue.display()))?;
    let dialogue: Vec<DialogueTurn> = serde_json::from_str(&text)
        .with_context(|| format!("parse dialogue '{}'", args.dialogue.display()))?;

    let id = args
        .image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "panel".to_string());
    let font = FontSource::load_or_builtin(args.font.as_deref());
    let lettered =
        BubbleCompositor::new(args.style, font).composite(&Panel::new(id, artwork, dialogue))?;

    save_png(&args.out, &lettered)
}

fn cmd_page(args: PageArgs) -> anyhow::Result<()> {
    let images = args
        .images
        .iter()
        .map(|p| load_image(p))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let layout = inkpanel::PageLayout::new(Canvas::new(args.width, args.height)?);
    let page = PageCompositor::new(layout).compose(&images)?;
    if page.dropped > 0 {
        eprintln!(
            "warning: page holds {} panels; ignored {} image(s)",
            inkpanel::PAGE_CAPACITY,
            page.dropped
        );
    }
    save_png(&args.out, &page.image)
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let scene = Scene::from_path(&args.scene)?;
    let mut config = match &args.config {
        Some(path) => RunConfig::from_path(path)?,
        None => RunConfig::default(),
    };
    if let Some(style) = args.style {
        config.bubble_style = style;
    }

    let mut sink = PngDirSink::new(&args.out_dir);
    let report = SceneRunner::new(config)?.run(&scene, &mut sink)?;
    eprintln!(
        "wrote {} panel(s) and {} page(s) under {}",
        report.panels.len(),
        report.pages.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn load_image(path: &Path) -> anyhow::Result<inkpanel::RasterImage> {
    let img = image::open(path).with_context(|| format!("read image '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

fn save_png(path: &Path, img: &inkpanel::RasterImage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
