use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use paysession::application::dispatcher::{ButtonDispatcher, Dispatch};
use paysession::application::reactor::SessionReactor;
use paysession::config::Config;
use paysession::domain::checkout::{CheckoutStage, SessionSnapshot};
use paysession::domain::session::{ButtonName, SessionName};
use paysession::infrastructure::http::HttpRpcGateway;
use paysession::interfaces::jsonl::event_reader::EventReader;
use paysession::interfaces::terminal::renderer::TerminalView;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Feed a JSON Lines file of checkout events through the status reactor
    Replay {
        /// Input events file, one event per line
        input: PathBuf,
    },
    /// Print the checkout page stage for a session snapshot
    Stage {
        /// Session snapshot JSON file
        snapshot: PathBuf,
    },
    /// Record the payer's choice of payment button
    Select {
        /// Payment button name
        #[arg(long)]
        button: String,

        /// Payment session name
        #[arg(long, conflicts_with = "page_url", required_unless_present = "page_url")]
        session: Option<String>,

        /// Checkout page URL carrying the session as `?s=<name>`
        #[arg(long)]
        page_url: Option<String>,

        /// Backend base URL (defaults to PAYSESSION_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,

        /// Request timeout in milliseconds (defaults to PAYSESSION_TIMEOUT_MS)
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay { input } => replay(input).await,
        Command::Stage { snapshot } => stage(snapshot),
        Command::Select {
            button,
            session,
            page_url,
            base_url,
            timeout_ms,
        } => {
            let mut config = Config::from_env();
            if let Some(base_url) = base_url {
                config.base_url = base_url;
            }
            if let Some(timeout_ms) = timeout_ms {
                config.timeout_ms = timeout_ms;
            }

            let session = match (session, page_url) {
                (Some(session), _) => SessionName::new(session).into_diagnostic()?,
                (None, Some(url)) => SessionName::from_page_url(&url)
                    .into_diagnostic()?
                    .ok_or_else(|| miette!("page URL carries no payment session"))?,
                (None, None) => return Err(miette!("a payment session is required")),
            };

            select(config, session, ButtonName::new(button)).await
        }
    }
}

async fn replay(input: PathBuf) -> Result<()> {
    let file = File::open(input).into_diagnostic()?;
    let reader = EventReader::new(BufReader::new(file));

    let page = Arc::new(TerminalView::new(io::stdout()));
    let reactor = SessionReactor::new(page.clone(), page);

    let (tx, rx) = mpsc::channel(16);
    let rendering = tokio::spawn(reactor.run(rx));

    for event in reader.events() {
        match event {
            Ok(event) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                eprintln!("Error reading event: {}", e);
            }
        }
    }

    // Closing the channel lets the reactor finish any scheduled redirect.
    drop(tx);
    rendering.await.into_diagnostic()?;

    Ok(())
}

fn stage(snapshot: PathBuf) -> Result<()> {
    let file = File::open(snapshot).into_diagnostic()?;
    let snapshot: SessionSnapshot = serde_json::from_reader(BufReader::new(file)).into_diagnostic()?;

    let stage = CheckoutStage::resolve(&snapshot);
    tracing::debug!(session = %snapshot.name, "resolved checkout stage");
    println!("stage: {}", stage);
    println!(
        "buttons: {}",
        if stage.renders_buttons() { "shown" } else { "hidden" }
    );
    Ok(())
}

async fn select(config: Config, session: SessionName, button: ButtonName) -> Result<()> {
    let page = Arc::new(TerminalView::new(io::stdout()));
    let gateway = Arc::new(HttpRpcGateway::new(config.base_url.clone(), config.timeout()));
    let dispatcher = ButtonDispatcher::new(gateway, page, session);

    match dispatcher.select(&button).await {
        Dispatch::Reloaded | Dispatch::Unchanged => Ok(()),
        Dispatch::Busy => Err(miette!("a button selection is already pending")),
        Dispatch::Failed => Err(miette!(
            "selecting button {} failed against {}",
            button,
            config.base_url
        )),
    }
}
