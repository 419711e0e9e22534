use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

mod extract;
mod fetch;
mod filter;
mod local;
mod record;
mod server;

use fetch::Fetcher;
use server::Config;

#[derive(Parser, Debug)]
#[command(name = "cardscrape")]
#[command(about = "JSON API over scraped player cards and redeem codes")]
struct Args {
    /// HTTP server port
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Base URL of the player-stats site
    #[arg(long, default_value = "https://renderz.app/24")]
    upstream: String,

    /// URL of the redeem-codes forum page
    #[arg(long, default_value = "https://www.fcmobileforum.com/fcmobile-redeem-codes")]
    codes_url: String,

    /// Local JSON fallback file of player records
    #[arg(long, default_value = "data/players.json")]
    data_file: PathBuf,

    /// Outbound request timeout in seconds
    #[arg(long, default_value = "15")]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let fetcher = Arc::new(Fetcher::new(Duration::from_secs(args.timeout))?);

    let config = Arc::new(Config {
        upstream: args.upstream,
        codes_url: args.codes_url,
        data_file: args.data_file,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));

    println!("[server] Listening on http://localhost:{}", args.port);
    println!("  Healthcheck:    http://localhost:{}/health", args.port);
    println!(
        "  Player list:    http://localhost:{}/api/renderz-players",
        args.port
    );
    println!(
        "  Player details: http://localhost:{}/api/player-details/:id",
        args.port
    );
    println!(
        "  Search players: http://localhost:{}/api/search-players?name=messi",
        args.port
    );
    println!(
        "  Local players:  http://localhost:{}/api/local-players",
        args.port
    );
    println!(
        "  Redeem codes:   http://localhost:{}/api/fetch-codes",
        args.port
    );
    println!();

    server::run_server(addr, fetcher, config).await?;

    println!("Done.");
    Ok(())
}
