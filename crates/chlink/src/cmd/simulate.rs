use std::fs::File;
use std::io::{self, BufWriter, Write};

use bytes::BytesMut;
use chlink_frame::Hi91Record;
use chlink_source::{SampleSource, WaveKind, Waveform};

use crate::cmd::SimulateArgs;
use crate::exit::{frame_error, io_error, source_error, CliError, CliResult, SUCCESS, USAGE};

/// Peak roll/pitch/yaw in degrees.
const AMPLITUDE_DEG: f32 = 45.0;

pub fn run(args: SimulateArgs) -> CliResult<i32> {
    if !args.step.is_finite() || args.step < 0.0 {
        return Err(CliError::new(USAGE, "--step must be a non-negative number"));
    }

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|err| {
            io_error(&format!("failed creating {}", path.display()), err)
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut wave = Waveform::new(WaveKind::Sin, 3, args.step);
    let mut wire = BytesMut::new();

    for n in 0..args.count {
        let t = wave.phase();
        let samples = wave
            .next_batch()
            .map_err(|err| source_error("waveform failed", err))?;

        wire.clear();
        push_noise(n, args.garbage, &mut wire);
        simulated_record(&samples, t)
            .encode_frame(&mut wire)
            .map_err(|err| frame_error("encode failed", err))?;
        out.write_all(&wire)
            .map_err(|err| io_error("write failed", err))?;
    }
    out.flush().map_err(|err| io_error("flush failed", err))?;

    tracing::info!(frames = args.count, garbage = args.garbage, "simulation written");
    Ok(SUCCESS)
}

/// Noise bytes all have the high bit set, so they never contain the first
/// sync byte.
fn push_noise(n: usize, len: usize, dst: &mut BytesMut) {
    dst.extend((0..len).map(|i| 0x80 | ((n + i) & 0x7F) as u8));
}

/// One record at phase `t`, oriented by three waveform channels.
fn simulated_record(samples: &[f32], t: f64) -> Hi91Record {
    let [roll, pitch, yaw] = match *samples {
        [a, b, c] => [a * AMPLITUDE_DEG, b * AMPLITUDE_DEG, c * AMPLITUDE_DEG],
        _ => [0.0; 3],
    };
    let millis = (t * 1000.0).round();

    Hi91Record {
        // The raw sync counter is 16 bits of milliseconds.
        sync_time: (millis % 65_536.0) * 1e-3,
        temperature: 25,
        pressure: 101_325.0,
        system_time_ms: millis as u32,
        acc: [0.0, 0.0, 1.0],
        gyr: [0.0; 3],
        mag: [0.0; 3],
        roll,
        pitch,
        yaw,
        quat: quat_from_euler(roll, pitch, yaw),
    }
}

/// ZYX Euler angles in degrees to a `[w, x, y, z]` quaternion.
fn quat_from_euler(roll: f32, pitch: f32, yaw: f32) -> [f32; 4] {
    let (sr, cr) = (roll.to_radians() / 2.0).sin_cos();
    let (sp, cp) = (pitch.to_radians() / 2.0).sin_cos();
    let (sy, cy) = (yaw.to_radians() / 2.0).sin_cos();

    [
        cr * cp * cy + sr * sp * sy,
        sr * cp * cy - cr * sp * sy,
        cr * sp * cy + sr * cp * sy,
        cr * cp * sy - sr * sp * cy,
    ]
}

#[cfg(test)]
mod tests {
    use chlink_frame::{FrameDecoder, Record};

    use super::*;

    #[test]
    fn identity_orientation_is_unit_quaternion() {
        assert_eq!(quat_from_euler(0.0, 0.0, 0.0), [1.0, 0.0, 0.0, 0.0]);

        let q = quat_from_euler(10.0, -20.0, 30.0);
        let norm: f32 = q.iter().map(|v| v * v).sum();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn noise_never_contains_sync_byte() {
        let mut buf = BytesMut::new();
        for n in 0..300 {
            push_noise(n, 200, &mut buf);
        }
        assert!(buf.iter().all(|b| *b >= 0x80));
    }

    #[test]
    fn simulated_frames_decode_back() {
        let mut wave = Waveform::new(WaveKind::Sin, 3, 0.1);
        let mut wire = BytesMut::new();
        let mut expected = Vec::new();
        for n in 0..5 {
            push_noise(n, 3, &mut wire);
            let t = wave.phase();
            let record = simulated_record(&wave.next_batch().unwrap(), t);
            record.encode_frame(&mut wire).unwrap();
            expected.push(record);
        }

        let mut decoder = FrameDecoder::new();
        let records = decoder.feed(&wire);
        assert_eq!(records.len(), 5);
        for (Record::Hi91(got), want) in records.iter().zip(&expected) {
            assert_eq!(got.euler(), want.euler());
            assert_eq!(got.system_time_ms, want.system_time_ms);
            assert!((got.sync_time - want.sync_time).abs() < 1e-9);
        }
        assert_eq!(decoder.stats().discarded_bytes, 15);
    }

    #[test]
    fn orientation_follows_waveform_step() {
        let mut wave = Waveform::new(WaveKind::Sin, 3, 0.5);
        let first = simulated_record(&wave.next_batch().unwrap(), 0.0);
        let t = wave.phase();
        let second = simulated_record(&wave.next_batch().unwrap(), t);

        assert_eq!(first.euler(), [0.0; 3]);
        assert_eq!(t, 0.5);
        assert_eq!(second.system_time_ms, 500);
        assert!((second.roll - 0.5f32.sin() * AMPLITUDE_DEG).abs() < 1e-4);
        assert!((second.yaw - 1.5f32.sin() * AMPLITUDE_DEG).abs() < 1e-4);
    }
}
