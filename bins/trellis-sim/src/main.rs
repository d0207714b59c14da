use clap::Parser;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use trellis_config::{SimConfig, toml_config};
use trellis_core::debug;

mod sim;

use sim::Simulator;

/// Load configuration file
fn load_config_from_toml(cfg_path: &str) -> SimConfig {
    match toml_config::from_file(cfg_path) {
        Ok(c) => c,
        Err(e) => {
            println!("Failed to load configuration from {}: {}", cfg_path, e);
            std::process::exit(1);
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Trellis code simulator",
    long_about = "Encodes a message with a K=3 or V.32 style trellis code, adds channel noise and Viterbi decodes it again"
)]
struct Args {
    /// Config file (required)
    #[arg(help = "TOML config with decoder, channel and message parameters")]
    config: String,

    /// Overrides the noise amplitude from the config file
    #[arg(long)]
    noise: Option<f64>,

    /// Keep running passes until Ctrl+C
    #[arg(long)]
    continuous: bool,
}

fn main() {
    eprintln!("    trellis-sim, Viterbi decoding over a noisy channel\n");

    let args = Args::parse();
    let mut cfg = load_config_from_toml(&args.config);
    if let Some(noise) = args.noise {
        if !noise.is_finite() || noise < 0.0 {
            println!("Invalid noise amplitude: {}", noise);
            std::process::exit(1);
        }
        cfg.channel.noise = noise;
    }
    let _log_guard = debug::setup_logging_default(cfg.debug_log.clone());

    let mut sim = match Simulator::new(&cfg) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to set up decoder: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "{:?} decoder, trace-back depth {}, normalise {:?}, noise {}, flush {} bytes",
        cfg.decoder.variant,
        cfg.decoder.params.trace_back_depth,
        cfg.normalise_policy(),
        cfg.channel.noise,
        sim.flush_bytes()
    );

    // Set up Ctrl+C handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("failed to set Ctrl+C handler");

    let message = cfg.source.message.as_bytes();
    let mut passes: u64 = 0;
    let mut clean_passes: u64 = 0;
    let mut total_bit_errors: u64 = 0;

    while running.load(Ordering::SeqCst) {
        passes += 1;
        let report = sim.run_pass(message);
        total_bit_errors += report.bit_errors as u64;
        if report.is_clean() {
            clean_passes += 1;
            tracing::info!("pass {}: ok \"{}\"", passes, report.decoded_text());
        } else {
            tracing::warn!(
                "pass {}: {} byte errors, {} bit errors \"{}\"",
                passes,
                report.byte_errors,
                report.bit_errors,
                report.decoded_text()
            );
        }

        if !args.continuous && passes >= cfg.source.repeat as u64 {
            break;
        }
    }

    let total_bits = passes * message.len() as u64 * 8;
    tracing::info!(
        "{} passes, {} clean, bit error rate {:.2e} ({} of {})",
        passes,
        clean_passes,
        total_bit_errors as f64 / total_bits.max(1) as f64,
        total_bit_errors,
        total_bits
    );
}
