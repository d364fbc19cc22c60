//! Service entry point.

use std::sync::Arc;

use clap::Parser;
use log::{info, warn};

use paginita::delivery::{Deliverer, RetryPolicy};
use paginita::font::FontBook;
use paginita::notify::{LogOnlySink, NotificationSink, SupervisorNotifier};
use paginita::printer::{PrinterConfig, PrinterModel};
use paginita::server::{self, AppState, ServiceConfig};
use paginita::transport::{is_valid_mac, RfcommTransport};

/// Print service for PeriPage thermal printers.
#[derive(Parser, Debug)]
#[command(name = "paginita", version, about)]
struct Cli {
    /// Printer Bluetooth MAC address (AA:BB:CC:DD:EE:FF)
    #[arg(long)]
    mac: String,

    /// Printer model: A6, A6+, A40 or A40+
    #[arg(long, default_value = "A6")]
    model: String,

    /// Address to bind the HTTP server
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: String,

    /// Default font family
    #[arg(long, default_value = "DejaVu")]
    font: String,

    /// Default font size in pixels
    #[arg(long, default_value_t = 24)]
    font_size: u32,
}

#[tokio::main]
async fn run(cli: Cli) -> Result<(), String> {
    let model = PrinterModel::parse(&cli.model)?;

    if !is_valid_mac(&cli.mac) {
        return Err(format!(
            "'{}' is not a usable printer MAC address. Set the real address of your printer",
            cli.mac
        ));
    }

    let book = FontBook::with_system_fonts(&cli.font);
    book.probe();
    let fonts = Arc::new(book);

    let sink: Arc<dyn NotificationSink> = match SupervisorNotifier::from_env() {
        Some(notifier) => {
            info!("Supervisor notifications enabled");
            Arc::new(notifier)
        }
        None => {
            warn!("SUPERVISOR_TOKEN not set, print failures will only be logged");
            Arc::new(LogOnlySink)
        }
    };

    let transport = Arc::new(RfcommTransport::new(&cli.mac));
    let deliverer = Arc::new(Deliverer::new(transport, sink, RetryPolicy::default()));

    let state = Arc::new(AppState {
        config: ServiceConfig {
            mac: cli.mac,
            model,
            listen_addr: cli.listen,
            font_name: cli.font,
            font_size: cli.font_size,
        },
        printer: PrinterConfig::for_model(model),
        fonts,
        deliverer,
    });

    info!(
        "starting for {} ({} dots wide)",
        state.config.model.name(),
        state.printer.width_dots
    );
    server::serve(state).await.map_err(|e| e.to_string())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
