use std::io;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use humantime::format_rfc3339;
use log::{info, LevelFilter};
use tokio::net::TcpListener;

const LOG_ENV: &str = "BDAPP_LOG";

fn log_level() -> LevelFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn init_logger() -> io::Result<()> {
    let colors = ColoredLevelConfig::new()
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
        .trace(Color::Magenta);

    fern::Dispatch::new()
        .level(log_level())
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                format_rfc3339(SystemTime::now()),
                colors.color(record.level()),
                record.target(),
                message,
            ))
        })
        .chain(io::stdout())
        .apply()
        .map_err(io::Error::other)
}

#[tokio::main]
async fn main() -> io::Result<()> {
    init_logger()?;
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {addr}");
    mock_server::run(listener).await
}
