//! Storefront session replay entry point.

use metrics_exporter_prometheus::PrometheusBuilder;
use storefront::Config;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(error = %e, "failed to install Prometheus recorder");
            std::process::exit(1);
        }
    };

    // 3. Replay the session
    let report = match storefront::run(&config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "session replay failed");
            std::process::exit(1);
        }
    };

    tracing::info!(
        orders = report.orders.len(),
        rejected = report.rejected_checkouts.len(),
        "session finished"
    );

    // 4. Print the report on stdout and the metrics on stderr
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize report");
            std::process::exit(1);
        }
    }
    eprint!("{}", metrics_handle.render());
}
