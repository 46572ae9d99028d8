use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Subcommand};

use crate::exit::{CliError, CliResult, INTERNAL, USAGE};
use crate::output::OutputFormat;

pub mod decode;
pub mod listen;
pub mod relay;
pub mod simulate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode and print records from a serial port.
    Listen(ListenArgs),
    /// Decode a capture file (or stdin) and print records.
    Decode(DecodeArgs),
    /// Write synthetic HI91 frames.
    Simulate(SimulateArgs),
    /// Stream samples to VOFA+ over UDP.
    Relay(RelayArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Listen(args) => listen::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Simulate(args) => simulate::run(args),
        Command::Relay(args) => relay::run(args),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ListenArgs {
    /// Serial port path (e.g. /dev/ttyUSB0, COM3).
    #[arg(env = "CHLINK_SERIAL_PORT")]
    pub port: String,
    /// Baud rate.
    #[arg(long, default_value_t = chlink_source::serial::DEFAULT_BAUD_RATE)]
    pub baud: u32,
    /// Read timeout per poll (e.g. 1s, 200ms).
    #[arg(long, default_value = "1s")]
    pub timeout: String,
    /// Exit after printing N records.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Capture file. Reads stdin when omitted or "-".
    pub file: Option<PathBuf>,
    /// Bytes requested per read.
    #[arg(long, default_value_t = chlink_frame::DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Number of frames to write.
    #[arg(long, default_value = "10")]
    pub count: usize,
    /// Output file. Writes stdout when omitted.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
    /// Waveform phase step between frames, in seconds.
    #[arg(long, default_value = "0.1")]
    pub step: f64,
    /// Noise bytes written before each frame.
    #[arg(long, default_value = "0")]
    pub garbage: usize,
}

#[derive(Args, Debug)]
pub struct RelayArgs {
    /// JSON config file. Built-in defaults apply when omitted.
    #[arg(long, env = "CHLINK_CONFIG")]
    pub config: Option<PathBuf>,
    /// Exit after sending N datagrams.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub(crate) fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}

/// Flag cleared by Ctrl-C. Long-running commands poll it between reads.
pub(crate) fn install_ctrlc_handler() -> CliResult<Arc<AtomicBool>> {
    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || {
        flag.store(false, Ordering::SeqCst);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))?;
    Ok(running)
}
