use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use blogfeed::config::Config;
use blogfeed::{FeedSynthesizer, HttpTransport};

#[derive(Parser, Debug)]
#[command(name = "blogfeed", about = "Generate Atom and RSS feeds from a blog's HTML pages")]
struct Args {
    /// Config file (TOML)
    #[arg(long, value_name = "FILE", default_value = "blogfeed.toml")]
    config: PathBuf,

    /// Blog index URL, with trailing slash (overrides feed.url)
    #[arg(long)]
    url: Option<String>,

    /// Author name (overrides feed.name)
    #[arg(long)]
    name: Option<String>,

    /// Author email (overrides feed.email)
    #[arg(long)]
    email: Option<String>,

    /// Feed title; defaults to the blog page title (overrides feed.title)
    #[arg(long)]
    title: Option<String>,

    /// Atom output file (overrides output.atom)
    #[arg(long, value_name = "FILE")]
    atom_out: Option<PathBuf>,

    /// RSS output file (overrides output.rss)
    #[arg(long, value_name = "FILE")]
    rss_out: Option<PathBuf>,

    /// Print both feeds to stdout instead of writing files
    #[arg(long)]
    stdout: bool,
}

impl Args {
    fn apply(self, config: &mut Config) -> bool {
        if let Some(url) = self.url {
            config.feed.url = url;
        }
        if let Some(name) = self.name {
            config.feed.name = name;
        }
        if let Some(email) = self.email {
            config.feed.email = email;
        }
        if self.title.is_some() {
            config.feed.title = self.title;
        }
        if let Some(atom) = self.atom_out {
            config.output.atom = atom;
        }
        if let Some(rss) = self.rss_out {
            config.output.rss = rss;
        }
        self.stdout
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so --stdout output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    let to_stdout = args.apply(&mut config);
    config.validate()?;

    let client = reqwest::Client::builder()
        .user_agent(concat!("blogfeed/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;
    let transport = HttpTransport::new(client)
        .with_timeout(config.fetch.timeout())
        .with_max_page_size(config.fetch.max_page_size);

    let mut feed = FeedSynthesizer::new(config.feed);
    let url = feed.metadata().url.clone();
    let added = feed
        .add_from_blog(&transport, &url)
        .await
        .with_context(|| format!("Failed to build feed from {url}"))?;
    tracing::info!(entries = added, "Feed ready");

    if to_stdout {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&feed.atom()?)?;
        stdout.write_all(b"\n")?;
        stdout.write_all(&feed.rss()?)?;
        stdout.write_all(b"\n")?;
        return Ok(());
    }

    feed.write_atom(Some(&config.output.atom))?;
    feed.write_rss(Some(&config.output.rss))?;
    println!(
        "Wrote {} and {} ({} entries)",
        config.output.atom.display(),
        config.output.rss.display(),
        added
    );

    Ok(())
}
