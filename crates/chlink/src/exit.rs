use std::fmt;
use std::io;

use chlink_frame::FrameError;
use chlink_source::SourceError;
use chlink_vofa::VofaError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn source_error(context: &str, err: SourceError) -> CliError {
    match err {
        SourceError::Io(source) | SourceError::Bind { source, .. } => io_error(context, source),
        SourceError::Frame(err) => frame_error(context, err),
        SourceError::Open { .. } => CliError::new(TRANSPORT_ERROR, format!("{context}: {err}")),
        SourceError::Resolve(_) | SourceError::InvalidWaveform(_) => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        SourceError::Closed => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

pub fn vofa_error(context: &str, err: VofaError) -> CliError {
    match err {
        VofaError::Bind { source, .. } | VofaError::Send { source, .. } => {
            io_error(context, source)
        }
        VofaError::Resolve(_) => CliError::new(USAGE, format!("{context}: {err}")),
    }
}
