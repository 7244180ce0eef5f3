//! `mailring` - read commands from a menu and hand them to polling workers
//! through a shared fixed-size ring buffer.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use dispatch::{standard_workers, telemetry, Console, DispatchConfig, Dispatcher};
use ring_queue::RingBuffer;
use tracing::{info, warn};

/// Menu-driven RTC and network interface reader
#[derive(Parser, Debug)]
#[command(name = "mailring", version, about)]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Queue capacity (overrides the config file)
    #[arg(long)]
    capacity: Option<usize>,

    /// Worker poll interval in milliseconds (overrides the config file)
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Interface for the IP address command (overrides the config file)
    #[arg(long)]
    interface: Option<String>,

    /// RTC device for the clock commands (overrides the config file)
    #[arg(long)]
    rtc_device: Option<PathBuf>,

    /// How long to let workers drain queued commands after input ends
    #[arg(long, default_value_t = 3_000)]
    drain_timeout_ms: u64,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = telemetry::DEFAULT_FILTER)]
    log_level: String,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<DispatchConfig> {
        let mut config = match &self.config {
            Some(path) => DispatchConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => DispatchConfig::default(),
        };

        if let Some(capacity) = self.capacity {
            config.capacity = capacity;
        }
        if let Some(poll_interval_ms) = self.poll_interval_ms {
            config.poll_interval_ms = poll_interval_ms;
        }
        if let Some(interface) = &self.interface {
            config.interface.clone_from(interface);
        }
        if let Some(rtc_device) = &self.rtc_device {
            config.rtc_device.clone_from(rtc_device);
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init_tracing(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    info!(?config, "starting");

    let queue = Arc::new(RingBuffer::new(config.capacity)?);
    println!("Occupied: {}, Total size: {}", queue.len(), queue.capacity());

    let handle = Dispatcher::spawn(standard_workers(&queue, &config))?;

    let reports = handle.reports().clone();
    let printer = thread::Builder::new()
        .name("reports".to_owned())
        .spawn(move || {
            for report in reports {
                println!("\n{report}");
            }
        })
        .context("starting report printer")?;

    let summary = Console::new(Arc::clone(&queue)).run(io::stdin().lock(), io::stdout())?;

    let deadline = Instant::now() + Duration::from_millis(cli.drain_timeout_ms);
    while !queue.is_empty() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    if !queue.is_empty() {
        warn!(pending = queue.len(), "commands left unhandled at shutdown");
    }

    let stats = handle.shutdown()?;
    if printer.join().is_err() {
        warn!("report printer panicked");
    }

    for (name, worker) in &stats {
        info!(
            worker = %name,
            handled = worker.handled,
            failed = worker.failed,
            returned = worker.returned,
            "worker summary"
        );
    }
    info!(
        submitted = summary.submitted,
        rejected = summary.rejected,
        dropped = queue.dropped(),
        "session finished"
    );
    Ok(())
}
