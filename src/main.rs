use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use context::Context;
use log::{error, info};
use manifest::{build_manifest, ManifestOutcome};
use sitemap::build_sitemap;
use std::path::PathBuf;

mod context;
mod date;
mod manifest;
mod metadata;
mod sitemap;
mod store;

const MANIFEST_FILE_NAME: &str = "blog-manifest.json";

fn cli() -> Command {
    command!()
        .about("Generates blog-manifest.json and sitemap.xml for the site")
        .args(&[
            Arg::new("content_dir")
                .long("content-dir")
                .help("Directory containing the blog posts (*.md)")
                .env("SITEMETA_CONTENT_DIR")
                .value_parser(value_parser!(PathBuf))
                .default_value("blog/content")
                .global(true),
            Arg::new("manifest")
                .long("manifest")
                .help("Path of the manifest [default: <content-dir>/blog-manifest.json]")
                .env("SITEMETA_MANIFEST")
                .value_parser(value_parser!(PathBuf))
                .global(true),
            Arg::new("sitemap")
                .long("sitemap")
                .help("Path of the generated sitemap")
                .env("SITEMETA_SITEMAP")
                .value_parser(value_parser!(PathBuf))
                .default_value("sitemap.xml")
                .global(true),
            Arg::new("base_url")
                .long("base-url")
                .help("Site URL prefixed to every sitemap entry")
                .env("SITE_BASE_URL")
                .default_value("https://pinkhuff.com")
                .global(true),
            Arg::new("default_author")
                .long("default-author")
                .help("Author used when a post has no **Author:** line")
                .env("SITEMETA_DEFAULT_AUTHOR")
                .default_value("Pinkhuff Team")
                .global(true),
            Arg::new("calendar_sort")
                .long("calendar-sort")
                .help("Sort the manifest by parsed date instead of the raw date text")
                .action(ArgAction::SetTrue)
                .global(true),
        ])
        .subcommand(Command::new("manifest").about("Only generate the blog manifest"))
        .subcommand(Command::new("sitemap").about("Only generate the sitemap"))
}

fn context_from(matches: &ArgMatches) -> Context {
    let content_dir = matches
        .get_one::<PathBuf>("content_dir")
        .cloned()
        .unwrap_or_default();
    let manifest_path = matches
        .get_one::<PathBuf>("manifest")
        .cloned()
        .unwrap_or_else(|| content_dir.join(MANIFEST_FILE_NAME));

    Context {
        manifest_path,
        content_dir,
        sitemap_path: matches
            .get_one::<PathBuf>("sitemap")
            .cloned()
            .unwrap_or_default(),
        base_url: matches
            .get_one::<String>("base_url")
            .cloned()
            .unwrap_or_default(),
        default_author: matches
            .get_one::<String>("default_author")
            .cloned()
            .unwrap_or_default(),
        calendar_sort: matches.get_flag("calendar_sort"),
    }
}

fn run_manifest(ctx: &Context) -> anyhow::Result<()> {
    match build_manifest(ctx)? {
        ManifestOutcome::Written { path, posts } => {
            info!("Wrote {posts} post(s) to {path:?}")
        }
        ManifestOutcome::NoPosts => info!("Manifest left unchanged"),
    }
    Ok(())
}

fn run_sitemap(ctx: &Context) -> anyhow::Result<()> {
    let outcome = build_sitemap(ctx, date::today())?;
    info!("Wrote {} URL(s) to {:?}", outcome.urls, outcome.path);
    Ok(())
}

/// Without a subcommand both stages run; the sitemap is still written when
/// the manifest stage fails, and the manifest error is returned afterwards.
fn run(ctx: &Context, subcommand: Option<&str>) -> anyhow::Result<()> {
    match subcommand {
        Some("manifest") => run_manifest(ctx),
        Some("sitemap") => run_sitemap(ctx),
        _ => {
            let manifest = run_manifest(ctx);
            if let Err(e) = &manifest {
                error!("Manifest stage failed: {e:#}");
            }
            run_sitemap(ctx)?;
            manifest
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let matches = cli().get_matches();
    let ctx = context_from(&matches);

    run(&ctx, matches.subcommand_name())
}
