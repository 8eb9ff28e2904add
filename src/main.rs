use anyhow::Result;
use clap::Parser;
use orderflow::{checkout::Checkout, config::Settings, events::request_stream::serve};
use tokio::{
    io::{BufReader, stdin, stdout},
    signal::unix::{SignalKind, signal},
};
use tracing::info;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Parser)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Args {
    #[arg(long, help = "(Optional) Sets the configuration file path.")]
    pub config: Option<String>,

    #[arg(
        long,
        help = "(Optional) Overrides the grace period in milliseconds.",
        required = false
    )]
    pub grace_period_ms: Option<u64>,

    #[arg(
        long,
        help = "(Optional) Cancels pending grace periods when an order is cancelled or refunded.",
        required = false
    )]
    pub preempt_grace: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let mut settings = Settings::load(&args.config)?;
    if let Some(millis) = args.grace_period_ms {
        settings.grace_period.millis = millis;
    }
    if args.preempt_grace {
        settings.grace_period.preempt_on_terminal = true;
    }

    info!(
        grace_period_ms = settings.grace_period.millis,
        processed_by = %settings.payment.processed_by,
        "Starting"
    );

    let checkout = Checkout::new(&settings);

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        result = serve(checkout, BufReader::new(stdin()), stdout()) => {
            result?;
            info!("Input closed. Shutting down...");
        },
        _ = sigterm.recv() => {
            info!("Received SIGTERM. Shutting down...");
        },
        _ = sigint.recv() => {
            info!("Received SIGINT. Shutting down...");
        }
    }

    Ok(())
}
