use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bannerfield_shared::api::ApiClient;
use bannerfield_shared::session::SessionStore;
use bannerfield_shared::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "bannerfield", version, about = "Field client for banner surveys")]
struct Cli {
    /// Base URL of the banner API (falls back to BANNERFIELD_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Directory holding the persisted session (falls back to BANNERFIELD_DATA_DIR,
    /// then the platform data directory)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in with phone number and PIN
    Login {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        pin: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the stored worker profile
    Whoami,
    /// List previously submitted banners, newest first
    Banners,
    /// Run the capture wizard from staged photo files
    Submit(SubmitArgs),
}

#[derive(Args)]
pub struct SubmitArgs {
    /// Banner height, in feet
    #[arg(long)]
    pub height: String,

    /// Banner width, in feet
    #[arg(long)]
    pub width: String,

    /// Kind of banner (hoarding, wall wrap, ...)
    #[arg(long = "type")]
    pub banner_type: String,

    /// Name of the site
    #[arg(long)]
    pub site: String,

    /// Staged JPEG frames, captured in the order given
    #[arg(long = "photo", required = true)]
    pub photos: Vec<PathBuf>,

    /// Latitude of the banner, if known
    #[arg(long, requires = "lng")]
    pub lat: Option<f64>,

    /// Longitude of the banner, if known
    #[arg(long, requires = "lat")]
    pub lng: Option<f64>,

    /// Orientation correction applied to each frame, in degrees
    #[arg(long, default_value_t = 0)]
    pub correction: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let api_url = match cli
        .api_url
        .or_else(|| std::env::var("BANNERFIELD_API_URL").ok())
    {
        Some(url) => url,
        None => bail!("no API endpoint configured; pass --api-url or set BANNERFIELD_API_URL"),
    };
    let sessions = match cli
        .data_dir
        .or_else(|| std::env::var("BANNERFIELD_DATA_DIR").ok().map(PathBuf::from))
    {
        Some(dir) => SessionStore::open(dir),
        None => SessionStore::open_default(),
    };
    let state = AppState::new(ApiClient::new(api_url), sessions);

    match cli.command {
        Command::Login { phone, pin } => commands::login(&state, &phone, &pin).await,
        Command::Logout => commands::logout(&state),
        Command::Whoami => commands::whoami(&state),
        Command::Banners => commands::banners(&state).await,
        Command::Submit(args) => commands::submit(&state, args).await,
    }
}
