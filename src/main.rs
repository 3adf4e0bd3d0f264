use stockdash::application::agents::dashboard_agent::DashboardAgent;
use stockdash::application::dispatcher::PredictionDispatcher;
use stockdash::application::session::Session;
use stockdash::config::Config;
use stockdash::infrastructure::HttpPredictionClient;

use anyhow::Context;
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

// A writer that sends logs to the UI via a crossbeam channel
struct ChannelWriter {
    sender: crossbeam_channel::Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).to_string();
        let _ = self.sender.try_send(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// Cloneable wrapper for MakeWriter
#[derive(Clone)]
struct ChannelWriterFactory {
    sender: crossbeam_channel::Sender<String>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // 0. Load Env (before starting anything)
    dotenvy::dotenv().ok();

    // 1. Create Log Channel
    let (log_tx, log_rx) = crossbeam_channel::unbounded();

    // 2. Setup Logging (Stdout + UI)
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(ChannelWriterFactory { sender: log_tx })
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .with(ui_layer)
        .init();

    info!("Stock Price Prediction Dashboard {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load config")?;
    info!("Prediction service: {}", config.prediction_api_url);

    // 3. Create Tokio Runtime in a background thread
    let (handle_tx, handle_rx) = crossbeam_channel::bounded(1);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let runtime_thread = std::thread::spawn(move || -> anyhow::Result<()> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .context("Failed to build Tokio runtime")?;

        let _ = handle_tx.send(rt.handle().clone());
        info!("Background Runtime Started.");

        rt.block_on(async move {
            let _ = shutdown_rx.await;
        });
        Ok(())
    });

    let runtime = handle_rx
        .recv()
        .context("Failed to receive runtime handle (did background thread fail?)")?;

    // 4. Prediction client
    let client = Arc::new(HttpPredictionClient::new(config.prediction_api_url.clone()));

    if config.prediction_health_check {
        let health_client = client.clone();
        runtime.spawn(async move {
            if let Err(e) = health_client.check_health().await {
                warn!("Prediction service not reachable yet: {:#}", e);
            }
        });
    }

    // 5. Session + Agent
    let dispatcher = PredictionDispatcher::new(client, runtime);
    let agent = DashboardAgent::new(Session::new(config.dark_mode), dispatcher)
        .with_logs(log_rx, config.log_capacity);

    // 6. Run UI (Blocks Main Thread)
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title("Stock Price Prediction Dashboard"),
        ..Default::default()
    };

    let ui_result = eframe::run_native(
        "Stock Price Prediction Dashboard",
        native_options,
        Box::new(|cc| {
            stockdash::interfaces::ui::configure_fonts(&cc.egui_ctx);
            Ok(Box::new(agent))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e));

    info!("Window closed. Shutting down...");
    let _ = shutdown_tx.send(());
    match runtime_thread.join() {
        Ok(result) => result?,
        Err(_) => warn!("Runtime thread panicked during shutdown"),
    }

    ui_result
}
