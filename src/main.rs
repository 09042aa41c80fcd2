use anyhow::Context;
use auctionboard::rendering::TextGrid;
use auctionboard::search::{Debouncer, Input};
use auctionboard::{BoardConfig, Dashboard};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

/// Browse marketplace auctions with resolved seller names
#[derive(Parser, Debug)]
#[command(name = "auctionboard", version, about)]
struct Args {
    /// Auctions endpoint (JSON array or `{ "auctions": [...] }`)
    #[arg(long)]
    auctions_url: Option<String>,

    /// Profile endpoint template; `{uuid}` is the undashed UUID, `{uuid_dashed}` the dashed one
    #[arg(long)]
    profile_url: Option<String>,

    /// Name cache file
    #[arg(long, conflicts_with = "no_cache")]
    cache: Option<PathBuf>,

    /// Keep resolved names in memory only
    #[arg(long)]
    no_cache: bool,

    /// Concurrent name lookups
    #[arg(long)]
    workers: Option<usize>,

    /// Cards rendered per step
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Cards per row
    #[arg(long)]
    columns: Option<usize>,

    /// Card width in characters
    #[arg(long)]
    card_width: Option<usize>,

    /// Per-request timeout
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Quiet period before interactive search input is applied
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Initial search term
    #[arg(long, short)]
    search: Option<String>,

    /// Write an HTML page here instead of printing the grid
    #[arg(long)]
    html: Option<PathBuf>,

    /// Read search terms from stdin (`:refresh` re-fetches, `:quit` exits)
    #[arg(long, short)]
    interactive: bool,
}

impl Args {
    fn into_config(self) -> (BoardConfig, Option<String>, Option<PathBuf>, bool) {
        let mut config = BoardConfig::default();
        if let Some(v) = self.auctions_url {
            config.auctions_url = v;
        }
        if let Some(v) = self.profile_url {
            config.profile_url = v;
        }
        if self.no_cache {
            config.cache_path = None;
        } else if let Some(path) = self.cache {
            config.cache_path = Some(path);
        }
        if let Some(v) = self.workers {
            config.worker_limit = v;
        }
        if let Some(v) = self.chunk_size {
            config.chunk_size = v;
        }
        if let Some(v) = self.columns {
            config.columns = v;
        }
        if let Some(v) = self.card_width {
            config.card_width = v;
        }
        if let Some(v) = self.timeout_ms {
            config.timeout_ms = v;
        }
        if let Some(v) = self.debounce_ms {
            config.debounce_ms = v;
        }
        (config, self.search, self.html, self.interactive)
    }
}

async fn show(board: &Dashboard, html: Option<&PathBuf>) -> anyhow::Result<()> {
    if let Some(path) = html {
        std::fs::write(path, board.render_html())
            .with_context(|| format!("writing {}", path.display()))?;
        println!("{} (written to {})", board.status_line(), path.display());
        return Ok(());
    }

    println!("{}", board.status_line());
    let config = board.config();
    let mut grid = TextGrid::new(io::stdout(), config.columns, config.card_width);
    board.render_to(&mut grid).await?;
    Ok(())
}

async fn interactive(board: &mut Dashboard, html: Option<&PathBuf>) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel::<Input>(64);
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(Input::parse(&line)).is_err() {
                break;
            }
        }
    });

    let mut input = Debouncer::new(rx, Duration::from_millis(board.config().debounce_ms));
    prompt();
    while let Some(next) = input.next().await {
        match next {
            Input::Quit => break,
            Input::Refresh => refresh(board).await,
            Input::Search(term) => board.set_search(&term),
        }
        show(board, html).await?;
        prompt();
    }
    Ok(())
}

async fn refresh(board: &mut Dashboard) {
    board.refresh_reporting(|loading| println!("{}", loading)).await;
}

fn prompt() {
    print!("search> ");
    let _ = io::stdout().flush();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let (config, search, html, is_interactive) = Args::parse().into_config();
    let mut board = Dashboard::new(config).context("invalid configuration")?;

    refresh(&mut board).await;
    if let Some(term) = search {
        board.set_search(&term);
    }
    show(&board, html.as_ref()).await?;

    if is_interactive {
        interactive(&mut board, html.as_ref()).await?;
    }
    Ok(())
}
