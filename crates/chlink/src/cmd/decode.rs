use std::fs::File;
use std::io::{self, Read};

use chlink_frame::{FrameError, ReaderConfig, RecordReader};

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{log_stats, print_record, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    if args.chunk_size == 0 {
        return Err(CliError::new(USAGE, "--chunk-size must be greater than zero"));
    }

    let input: Box<dyn Read> = match &args.file {
        Some(path) if path.as_os_str() != "-" => Box::new(File::open(path).map_err(|err| {
            io_error(&format!("failed opening {}", path.display()), err)
        })?),
        _ => Box::new(io::stdin().lock()),
    };

    let config = ReaderConfig {
        chunk_size: args.chunk_size,
    };
    let mut reader = RecordReader::with_config(input, config);

    loop {
        match reader.read_record() {
            Ok(record) => print_record(&record, format),
            Err(FrameError::ConnectionClosed) => break,
            Err(err) => {
                log_stats(&reader.stats());
                return Err(frame_error("read failed", err));
            }
        }
    }

    log_stats(&reader.stats());
    Ok(SUCCESS)
}
