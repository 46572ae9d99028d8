use std::sync::atomic::Ordering;

use chlink_frame::{FrameError, RecordReader};

use crate::cmd::{install_ctrlc_handler, parse_duration, ListenArgs};
use crate::exit::{frame_error, source_error, CliResult, SUCCESS};
use crate::output::{log_stats, print_record, OutputFormat};

pub fn run(args: ListenArgs, format: OutputFormat) -> CliResult<i32> {
    let timeout = parse_duration(&args.timeout)?;
    let port = chlink_source::serial::open(&args.port, args.baud, timeout)
        .map_err(|err| source_error("open failed", err))?;

    let running = install_ctrlc_handler()?;
    let mut reader = RecordReader::new(port);
    let mut printed = 0usize;

    while running.load(Ordering::SeqCst) {
        let records = match reader.poll() {
            Ok(records) => records,
            Err(FrameError::ConnectionClosed) => {
                tracing::info!(port = %args.port, "serial port closed");
                break;
            }
            Err(err) => {
                log_stats(&reader.stats());
                return Err(frame_error("read failed", err));
            }
        };

        for record in &records {
            print_record(record, format);
            printed = printed.saturating_add(1);

            if args.count.is_some_and(|count| printed >= count) {
                log_stats(&reader.stats());
                return Ok(SUCCESS);
            }
        }
    }

    log_stats(&reader.stats());
    Ok(SUCCESS)
}
