use std::io::IsTerminal;
use std::time::{SystemTime, UNIX_EPOCH};

use chlink_frame::{DecoderStats, Hi91Record, Record};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct Hi91Output<'a> {
    frame_type: &'a str,
    sync_time: f64,
    temperature: i8,
    pressure: f32,
    system_time_ms: u32,
    acc: [f32; 3],
    gyr: [f32; 3],
    mag: [f32; 3],
    roll: f32,
    pitch: f32,
    yaw: f32,
    quat: [f32; 4],
    received_at: u64,
}

impl<'a> From<&'a Hi91Record> for Hi91Output<'a> {
    fn from(r: &'a Hi91Record) -> Self {
        Self {
            frame_type: "HI91",
            sync_time: r.sync_time,
            temperature: r.temperature,
            pressure: r.pressure,
            system_time_ms: r.system_time_ms,
            acc: r.acc,
            gyr: r.gyr,
            mag: r.mag,
            roll: r.roll,
            pitch: r.pitch,
            yaw: r.yaw,
            quat: r.quat,
            received_at: now_unix_seconds(),
        }
    }
}

pub fn print_record(record: &Record, format: OutputFormat) {
    match record {
        Record::Hi91(r) => print_hi91(r, format),
    }
}

fn print_hi91(r: &Hi91Record, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&Hi91Output::from(r)).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec![
                    "TYPE", "SYNC TIME", "TEMP", "PRESSURE", "ROLL", "PITCH", "YAW",
                ])
                .add_row(vec![
                    "HI91".to_string(),
                    format!("{:.3}", r.sync_time),
                    r.temperature.to_string(),
                    format!("{:.1}", r.pressure),
                    format!("{:.2}", r.roll),
                    format!("{:.2}", r.pitch),
                    format!("{:.2}", r.yaw),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("{}", pretty_line(r));
        }
    }
}

fn pretty_line(r: &Hi91Record) -> String {
    format!(
        "HI91 t={:.3}s sys={}ms temp={}°C pressure={:.1} roll={:.2} pitch={:.2} yaw={:.2} \
         acc={:?} gyr={:?} mag={:?} quat={:?}",
        r.sync_time,
        r.system_time_ms,
        r.temperature,
        r.pressure,
        r.roll,
        r.pitch,
        r.yaw,
        r.acc,
        r.gyr,
        r.mag,
        r.quat
    )
}

pub fn log_stats(stats: &DecoderStats) {
    tracing::info!(
        frames = stats.frames,
        records = stats.records,
        crc_errors = stats.crc_errors,
        unknown_frames = stats.unknown_frames,
        rejected_payloads = stats.rejected_payloads,
        discarded_bytes = stats.discarded_bytes,
        "decoder stats"
    );
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_output_carries_every_field() {
        let record = Hi91Record {
            temperature: 21,
            roll: 1.0,
            pitch: 2.0,
            yaw: 3.0,
            quat: [1.0, 0.0, 0.0, 0.0],
            ..Hi91Record::default()
        };
        let value = serde_json::to_value(Hi91Output::from(&record)).unwrap();

        assert_eq!(value["frame_type"], "HI91");
        assert_eq!(value["temperature"], 21);
        assert_eq!(value["yaw"], 3.0);
        assert_eq!(value["quat"][0], 1.0);
        assert!(value.get("received_at").is_some());
    }

    #[test]
    fn pretty_line_mentions_orientation() {
        let record = Hi91Record {
            roll: -1.5,
            ..Hi91Record::default()
        };
        let line = pretty_line(&record);
        assert!(line.starts_with("HI91 "));
        assert!(line.contains("roll=-1.50"));
    }
}
