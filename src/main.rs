use clap::Parser;
use daybook::markdown::CmarkRenderer;
use daybook::site::SiteConfig;
use daybook::{deploy, site};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Static blog generator for date-organized markdown journals")]
#[command(long_about = "\
Static blog generator for date-organized markdown journals

Every markdown file under the content directory becomes a post. An
optional YAML frontmatter block supplies title, date, and tags:

  ---
  title: Hello, world
  date: 2024-06-15
  tags: [intro]
  ---
  Body starts here.

All fields are optional: the title defaults to the file name, the date
to the build time, the tags to none. Posts land at /YYYY/MM/DD/, the
index shows the latest post, and feed.xml carries the full RSS feed.

Bad metadata never aborts a build — it degrades to a default with a
warning. Set RUST_LOG=warn (or info) to see diagnostics.")]
#[command(version)]
struct Cli {
    /// Directory containing markdown files
    content_dir: PathBuf,

    /// Site name (default: content directory base name)
    #[arg(long)]
    site_name: Option<String>,

    /// Local output directory (default: /tmp/daybook-build-{site_name})
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Deploy to the server after building
    #[arg(long)]
    deploy: bool,

    /// Server to deploy to
    #[arg(long, default_value = "root@YOUR_DIGITAL_OCEAN_IP")]
    server: String,

    /// Remote path template ({site_name} is replaced)
    #[arg(long, default_value = "/var/www/{site_name}")]
    remote_path: String,

    /// Build locally without deploying
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let site_name = cli
        .site_name
        .clone()
        .unwrap_or_else(|| base_name(&cli.content_dir));
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(format!("daybook-build-{site_name}")));

    let config = SiteConfig {
        site_name: site_name.clone(),
        content_dir: cli.content_dir.clone(),
        output_dir: output_dir.clone(),
    };

    println!("Building site: {site_name}");
    println!("Content directory: {}", config.content_dir.display());
    println!("Output directory: {}", output_dir.display());

    let now = chrono::Local::now().naive_local();
    let summary = site::build(&config, now, &CmarkRenderer)?;
    println!(
        "Build complete: {} posts, {} images",
        summary.post_count, summary.image_count
    );

    if cli.deploy && !cli.dry_run {
        let remote_path = deploy::resolve_remote_path(&cli.remote_path, &site_name);
        deploy::deploy(&output_dir, &cli.server, &remote_path)?;
        println!("Deployment complete! Site is live at https://{site_name}/");
    } else if cli.dry_run {
        println!("Dry run complete. Site built at {}", output_dir.display());
    } else {
        println!("Build complete. To deploy, run with --deploy");
    }

    Ok(())
}

/// Base name of the content directory, used as the default site name.
/// Canonicalized first so `daybook .` and trailing-slash paths resolve
/// to the real directory name rather than the fallback.
fn base_name(path: &Path) -> String {
    let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "daybook".to_string())
}
