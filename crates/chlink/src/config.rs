use std::path::Path;
use std::time::Duration;

use chlink_source::WaveKind;
use serde::Deserialize;

use crate::exit::{io_error, CliError, CliResult, DATA_INVALID, USAGE};

/// Where relay batches come from.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Synthetic sine/cosine channels.
    #[default]
    Generated,
    /// Raw little-endian floats read from `serial_port`.
    Serial,
    /// Little-endian floats received on `udp_host:udp_port`.
    Udp,
    /// Roll/pitch/yaw decoded from a CH100 on `serial_port`.
    Ahrs,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FuncType {
    #[default]
    Sin,
    Cos,
}

impl From<FuncType> for WaveKind {
    fn from(func: FuncType) -> Self {
        match func {
            FuncType::Sin => WaveKind::Sin,
            FuncType::Cos => WaveKind::Cos,
        }
    }
}

/// Relay configuration, read from a JSON file. Every key is optional.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RelayConfig {
    /// VOFA+ host.
    pub ip: String,
    /// VOFA+ UDP port.
    pub port: u16,
    pub channel_count: usize,
    pub func_type: FuncType,
    /// Seconds between datagrams; also the waveform phase step.
    pub interval: f64,
    pub data_source: DataSource,
    pub serial_port: String,
    pub baudrate: u32,
    pub udp_host: String,
    pub udp_port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 5000,
            channel_count: 4,
            func_type: FuncType::Sin,
            interval: 0.1,
            data_source: DataSource::Generated,
            serial_port: "/dev/ttyUSB0".to_string(),
            baudrate: chlink_source::serial::DEFAULT_BAUD_RATE,
            udp_host: "127.0.0.1".to_string(),
            udp_port: 5001,
        }
    }
}

impl RelayConfig {
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
        Self::from_json(&text)
            .map_err(|err| CliError::new(err.code, format!("{}: {}", path.display(), err)))
    }

    pub fn from_json(text: &str) -> CliResult<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|err| CliError::new(DATA_INVALID, format!("invalid config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        Duration::try_from_secs_f64(self.interval).map_err(|err| {
            CliError::new(
                USAGE,
                format!("interval must be a non-negative number of seconds, got {}: {err}", self.interval),
            )
        })?;
        Ok(())
    }

    /// `interval` as a `Duration`; zero if the field no longer holds a valid
    /// duration.
    pub fn interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.interval).unwrap_or_default()
    }
}
