use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fates-widget", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one widget card.
    Render(RenderArgs),
    /// Render every entry of a JSON manifest in parallel.
    Batch(BatchArgs),
    /// Re-encode an image into another container.
    Convert(ConvertArgs),
    /// Load the shared font and logo and report what was loaded.
    Assets(AssetsArgs),
}

#[derive(Parser, Debug)]
struct AssetOverrides {
    /// Render config JSON (font_path, logo_path, logo_size, canvas_pool_capacity, text_color).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file, overriding the config and environment.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Logo file, overriding the config and environment.
    #[arg(long)]
    logo: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Avatar image (PNG, JPEG, GIF or WebP).
    #[arg(long)]
    avatar: PathBuf,

    /// Name drawn under the avatar.
    #[arg(long)]
    username: String,

    /// Entity id, used for logging only.
    #[arg(long, default_value = "0")]
    id: String,

    /// Background color (hex, rgb()/rgba() or a CSS name).
    #[arg(long)]
    bgcolor: Option<String>,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = FormatChoice::Webp)]
    format: FormatChoice,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    assets: AssetOverrides,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// JSON array of `{ "id", "username", "avatar", "bgcolor"? }`. Avatar paths are relative
    /// to the manifest.
    #[arg(long)]
    manifest: PathBuf,

    /// Directory receiving `<id>.<ext>` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = FormatChoice::Webp)]
    format: FormatChoice,

    /// Worker threads (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,

    #[command(flatten)]
    assets: AssetOverrides,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Target container.
    #[arg(long, value_enum)]
    to: FormatChoice,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct AssetsArgs {
    /// Also print the font SHA-256 and logo details.
    #[arg(long)]
    dump: bool,

    #[command(flatten)]
    assets: AssetOverrides,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Webp,
    Jpeg,
}

impl From<FormatChoice> for fates_widgets::OutputFormat {
    fn from(c: FormatChoice) -> Self {
        match c {
            FormatChoice::Png => Self::Png,
            FormatChoice::Webp => Self::WebP,
            FormatChoice::Jpeg => Self::Jpeg,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestEntry {
    id: String,
    username: String,
    avatar: PathBuf,
    #[serde(default)]
    bgcolor: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Convert(args) => cmd_convert(args),
        Command::Assets(args) => cmd_assets(args),
    }
}

fn load_context(o: &AssetOverrides) -> anyhow::Result<fates_widgets::RenderContext> {
    let base = match &o.config {
        Some(path) => fates_widgets::RenderConfig::from_json_path(path)?,
        None => fates_widgets::RenderConfig::default(),
    };
    let mut cfg = base.with_env_overrides()?;
    if let Some(font) = &o.font {
        cfg.font_path = font.clone();
    }
    if let Some(logo) = &o.logo {
        cfg.logo_path = logo.clone();
    }
    Ok(fates_widgets::RenderContext::load(&cfg)?)
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let ctx = load_context(&args.assets)?;

    let avatar = std::fs::read(&args.avatar)
        .with_context(|| format!("read avatar '{}'", args.avatar.display()))?;
    let user = fates_widgets::WidgetUser::from_avatar_bytes(args.id, args.username, &avatar)?;
    let opts = fates_widgets::WidgetOptions {
        bgcolor: args.bgcolor,
    };

    let out = ctx.render_widget(&user, &opts, args.format.into())?;
    write_output(&args.out, &out.bytes)?;

    eprintln!("wrote {} ({})", args.out.display(), out.content_type());
    Ok(())
}

fn read_manifest(path: &Path) -> anyhow::Result<Vec<ManifestEntry>> {
    let f = File::open(path).with_context(|| format!("open manifest '{}'", path.display()))?;
    let entries: Vec<ManifestEntry> = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse manifest '{}'", path.display()))?;
    Ok(entries)
}

/// Manifest ids become file names inside `--out-dir`; anything that could name another
/// directory is rejected.
fn check_entry_id(id: &str) -> anyhow::Result<()> {
    anyhow::ensure!(!id.trim().is_empty(), "manifest id must be non-empty");
    anyhow::ensure!(
        !id.contains(['/', '\\', '\0']) && !id.contains(".."),
        "manifest id {id:?} must not contain path separators or '..'"
    );
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let entries = read_manifest(&args.manifest)?;
    for entry in &entries {
        check_entry_id(&entry.id)?;
    }
    let ctx = load_context(&args.assets)?;
    let root = args.manifest.parent().unwrap_or_else(|| Path::new("."));
    let format = fates_widgets::OutputFormat::from(args.format);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = args.threads {
        anyhow::ensure!(n > 0, "--threads must be > 0");
        builder = builder.num_threads(n);
    }
    let pool = builder.build().context("build rayon thread pool")?;

    let results: Vec<anyhow::Result<PathBuf>> = pool.install(|| {
        entries
            .par_iter()
            .map(|entry| render_entry(&ctx, root, &args.out_dir, entry, format))
            .collect()
    });

    let mut failed = 0usize;
    for (entry, result) in entries.iter().zip(results) {
        match result {
            Ok(path) => eprintln!("wrote {}", path.display()),
            Err(e) => {
                failed += 1;
                eprintln!("failed {}: {e:#}", entry.id);
            }
        }
    }

    let stats = ctx.pool_stats();
    tracing::info!(
        rendered = entries.len() - failed,
        failed,
        canvases_allocated = stats.allocated,
        canvases_reused = stats.reused,
        "batch finished"
    );
    anyhow::ensure!(failed == 0, "{failed} of {} widgets failed", entries.len());
    Ok(())
}

fn render_entry(
    ctx: &fates_widgets::RenderContext,
    root: &Path,
    out_dir: &Path,
    entry: &ManifestEntry,
    format: fates_widgets::OutputFormat,
) -> anyhow::Result<PathBuf> {
    let avatar_path = root.join(&entry.avatar);
    let avatar = std::fs::read(&avatar_path)
        .with_context(|| format!("read avatar '{}'", avatar_path.display()))?;
    let user = fates_widgets::WidgetUser::from_avatar_bytes(
        entry.id.clone(),
        entry.username.clone(),
        &avatar,
    )?;
    let opts = fates_widgets::WidgetOptions {
        bgcolor: entry.bgcolor.clone(),
    };

    let out = ctx.render_widget(&user, &opts, format)?;
    let path = out_dir.join(format!("{}.{}", entry.id, format.extension()));
    write_output(&path, &out.bytes)?;
    Ok(path)
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read '{}'", args.in_path.display()))?;
    let source = fates_widgets::detect(&bytes)
        .with_context(|| format!("detect format of '{}'", args.in_path.display()))?;
    let target = fates_widgets::OutputFormat::from(args.to);

    let converted = fates_widgets::convert(&bytes, target.kind())?;
    write_output(&args.out, &converted)?;

    eprintln!("converted {source} -> {target}: wrote {}", args.out.display());
    Ok(())
}

fn cmd_assets(args: AssetsArgs) -> anyhow::Result<()> {
    let ctx = load_context(&args.assets)?;
    let font = ctx.font();
    let (logo_w, logo_h) = ctx.logo().dimensions();

    eprintln!("assets loaded:");
    eprintln!("  font_family: {}", font.family());
    eprintln!("  logo_size:   {logo_w}x{logo_h}");
    if args.dump {
        eprintln!("  font_bytes:  {}", font.bytes().len());
        eprintln!("  font_sha256: {}", font.sha256_hex());
        let [r, g, b, a] = ctx.text_color().0;
        eprintln!("  text_color:  #{r:02x}{g:02x}{b:02x}{a:02x}");
    }
    Ok(())
}
