//! Bee Jumble - CLI
//!
//! Scrapes daily Spelling Bee answers into an XML archive, publishes a
//! jumbled copy and renders printable puzzle pages.

use anyhow::{Context, Result, bail};
use bee_jumble::{
    archive::{ArchiveStore, Merger},
    commands::{
        ScrapeOptions, latest_puzzle, run_backfill, run_harvest, run_jumble, run_publish,
        run_render, run_scrape,
    },
    config::{
        ARCHIVE_FILE, DEFAULT_FTP_PORT, DEFAULT_HARVEST_DAYS, DEFAULT_TIMEOUT, DEFAULT_WORKERS,
        INDEX_FILE, JUMBLED_FILE, REMOTE_PAGE_DIR,
    },
    jumble::{RandomShuffle, Scrambler},
    output::{
        print_jumble_summary, print_latest, print_publish_summary, print_render_result,
        print_scrape_report, print_scrape_summary,
    },
    publish::FtpSettings,
    scrape::HttpFetcher,
};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bee_jumble",
    about = "Spelling Bee archive scraper, word jumbler and publisher",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Archive of scraped puzzles
    #[arg(long, global = true, default_value = ARCHIVE_FILE)]
    archive: PathBuf,

    /// Jumbled copy of the archive
    #[arg(long, global = true, default_value = JUMBLED_FILE)]
    jumbled: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape sbsolver's current month and today's NYT puzzle
    Scrape(ScrapeArgs),

    /// Scrape an sbsolver id range
    Backfill {
        #[arg(long)]
        from_id: i64,

        #[arg(long)]
        to_id: i64,

        /// Concurrent page fetches
        #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,
    },

    /// Scrape NYT pages for the last few days
    Harvest {
        /// Days to walk back, today included
        #[arg(short, long, default_value_t = DEFAULT_HARVEST_DAYS)]
        days: u32,

        /// Concurrent page fetches
        #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,
    },

    /// Copy new puzzles into the jumbled archive and scramble them
    Jumble,

    /// Write a printable page for a jumbled puzzle
    Render {
        /// Puzzle date (YYYY-MM-DD); latest if omitted
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Index page to link the new page from, if it exists
        #[arg(long, default_value = INDEX_FILE)]
        index: PathBuf,
    },

    /// Upload files over FTP (index page and jumbled archive by default)
    Publish {
        files: Vec<PathBuf>,

        /// Remote directory for rendered puzzle pages (empty for the root)
        #[arg(long, default_value = REMOTE_PAGE_DIR)]
        page_dir: String,

        #[command(flatten)]
        ftp: FtpArgs,
    },

    /// Scrape, jumble and publish
    Go {
        #[command(flatten)]
        scrape: ScrapeArgs,

        #[command(flatten)]
        ftp: FtpArgs,
    },

    /// Show the newest jumbled puzzle and its play link
    Latest,
}

#[derive(Args)]
struct ScrapeArgs {
    /// Concurrent page fetches
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Leave out today's NYT puzzle
    #[arg(long)]
    skip_nyt: bool,

    /// Leave out sbsolver's current month
    #[arg(long)]
    skip_sbsolver: bool,
}

#[derive(Args)]
struct FtpArgs {
    #[arg(long, env = "BEE_FTP_HOST")]
    ftp_host: Option<String>,

    #[arg(long, env = "BEE_FTP_PORT", default_value_t = DEFAULT_FTP_PORT)]
    ftp_port: u16,

    #[arg(long, env = "BEE_FTP_USER")]
    ftp_user: Option<String>,

    #[arg(long, env = "BEE_FTP_PASSWORD", hide_env_values = true)]
    ftp_password: Option<String>,
}

impl FtpArgs {
    fn settings(self, timeout: Duration) -> Result<FtpSettings> {
        Ok(FtpSettings {
            host: self
                .ftp_host
                .context("FTP host missing (--ftp-host or BEE_FTP_HOST)")?,
            port: self.ftp_port,
            user: self
                .ftp_user
                .context("FTP user missing (--ftp-user or BEE_FTP_USER)")?,
            password: self
                .ftp_password
                .context("FTP password missing (--ftp-password or BEE_FTP_PASSWORD)")?,
            timeout,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();
    let archive = ArchiveStore::new(&cli.archive);
    let jumbled = ArchiveStore::new(&cli.jumbled);
    let timeout = Duration::from_secs(cli.timeout);

    match cli.command {
        Commands::Scrape(args) => run_scrape_command(&archive, timeout, &args),
        Commands::Backfill {
            from_id,
            to_id,
            workers,
        } => {
            let mut merger = Merger::open(archive)?;
            let fetcher = HttpFetcher::new(timeout);
            let summary = run_backfill(&mut merger, &fetcher, from_id, to_id, workers)?;
            print_scrape_summary("sbsolver", &summary);
            Ok(())
        }
        Commands::Harvest { days, workers } => {
            let mut merger = Merger::open(archive)?;
            let fetcher = HttpFetcher::new(timeout);
            let today = Local::now().date_naive();
            let summary = run_harvest(&mut merger, &fetcher, today, days, workers)?;
            print_scrape_summary("nyt", &summary);
            Ok(())
        }
        Commands::Jumble => run_jumble_command(&archive, &jumbled),
        Commands::Render { date, out, index } => {
            let result = run_render(&jumbled, date, &out, &index)?;
            print_render_result(&result);
            Ok(())
        }
        Commands::Publish {
            files,
            page_dir,
            ftp,
        } => {
            let files = if files.is_empty() {
                default_publish_files(&cli.jumbled)
            } else {
                files
            };
            publish_with(&ftp.settings(timeout)?, &files, &page_dir)
        }
        Commands::Go { scrape, ftp } => {
            let settings = ftp.settings(timeout)?;
            run_scrape_command(&archive, timeout, &scrape)?;
            run_jumble_command(&archive, &jumbled)?;
            publish_with(
                &settings,
                &default_publish_files(&cli.jumbled),
                REMOTE_PAGE_DIR,
            )
        }
        Commands::Latest => {
            let archive = jumbled.load()?;
            print_latest(latest_puzzle(&archive).as_ref());
            Ok(())
        }
    }
}

fn default_publish_files(jumbled: &Path) -> Vec<PathBuf> {
    vec![PathBuf::from(INDEX_FILE), jumbled.to_path_buf()]
}

fn run_scrape_command(archive: &ArchiveStore, timeout: Duration, args: &ScrapeArgs) -> Result<()> {
    let mut merger = Merger::open(archive.clone())?;
    let fetcher = HttpFetcher::new(timeout);
    let options = ScrapeOptions {
        today: Local::now().date_naive(),
        workers: args.workers,
        sbsolver: !args.skip_sbsolver,
        nyt: !args.skip_nyt,
    };

    let report = run_scrape(&mut merger, &fetcher, &options)?;
    print_scrape_report(&report);
    Ok(())
}

fn run_jumble_command(archive: &ArchiveStore, jumbled: &ArchiveStore) -> Result<()> {
    let mut scrambler = Scrambler::new(RandomShuffle::thread());
    let summary = run_jumble(archive, jumbled, &mut scrambler)?;
    print_jumble_summary(&summary);
    Ok(())
}

fn publish_with(settings: &FtpSettings, files: &[PathBuf], page_dir: &str) -> Result<()> {
    let summary = run_publish(settings, files, page_dir)?;
    print_publish_summary(&summary);
    if !summary.is_complete() {
        bail!("{} of {} files failed to upload", summary.failed.len(), files.len());
    }
    Ok(())
}
