use std::io::ErrorKind;
use std::sync::atomic::Ordering;
use std::time::Duration;

use chlink_source::{
    AhrsSource, FloatStreamSource, SampleSource, SourceError, UdpFloatSource, Waveform,
};
use chlink_vofa::VofaSender;

use crate::cmd::{install_ctrlc_handler, RelayArgs};
use crate::config::{DataSource, RelayConfig};
use crate::exit::{source_error, vofa_error, CliResult, SUCCESS};

/// Transport read timeout for serial and UDP sources.
const SOURCE_TIMEOUT: Duration = Duration::from_secs(1);

pub fn run(args: RelayArgs) -> CliResult<i32> {
    let config = match &args.config {
        Some(path) => RelayConfig::load(path)?,
        None => RelayConfig::default(),
    };

    let mut source = build_source(&config).map_err(|err| source_error("source setup failed", err))?;
    let sender =
        VofaSender::connect(&config.ip, config.port).map_err(|err| vofa_error("sink setup failed", err))?;
    let interval = config.interval();

    tracing::info!(
        source = ?config.data_source,
        dest = %sender.target(),
        channels = config.channel_count,
        interval_ms = interval.as_millis() as u64,
        "relay started"
    );

    let running = install_ctrlc_handler()?;
    let mut sent = 0usize;

    while running.load(Ordering::SeqCst) {
        if args.count.is_some_and(|count| sent >= count) {
            break;
        }

        let batch = match source.next_batch() {
            Ok(batch) => batch,
            Err(SourceError::Closed) => {
                tracing::info!("source closed");
                break;
            }
            Err(SourceError::Io(err))
                if matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) =>
            {
                Vec::new()
            }
            Err(err) => return Err(source_error("read failed", err)),
        };

        if batch.is_empty() {
            tracing::debug!("empty batch, nothing sent");
        } else {
            sender
                .send(&batch)
                .map_err(|err| vofa_error("send failed", err))?;
            sent = sent.saturating_add(1);
        }

        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }

    tracing::info!(datagrams = sent, "relay stopped");
    Ok(SUCCESS)
}

fn build_source(config: &RelayConfig) -> chlink_source::Result<Box<dyn SampleSource>> {
    let source: Box<dyn SampleSource> = match config.data_source {
        DataSource::Generated => Box::new(Waveform::new(
            config.func_type.into(),
            config.channel_count,
            config.interval,
        )),
        DataSource::Serial => {
            let port =
                chlink_source::serial::open(&config.serial_port, config.baudrate, SOURCE_TIMEOUT)?;
            Box::new(FloatStreamSource::new(port, config.channel_count))
        }
        DataSource::Udp => {
            let source =
                UdpFloatSource::bind(&config.udp_host, config.udp_port, config.channel_count)?;
            source.set_read_timeout(Some(SOURCE_TIMEOUT))?;
            Box::new(source)
        }
        DataSource::Ahrs => {
            let port =
                chlink_source::serial::open(&config.serial_port, config.baudrate, SOURCE_TIMEOUT)?;
            Box::new(AhrsSource::new(port))
        }
    };
    Ok(source)
}
