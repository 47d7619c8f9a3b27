use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use serde_json::json;

/// Seeded sensor noise (splitmix64), so the sample log is reproducible.
struct Noise(u64);

impl Noise {
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Zero-mean gaussian jitter with standard deviation `sd`.
    fn jitter(&mut self, sd: f64) -> f64 {
        let r = (-2.0 * self.next_unit().max(f64::MIN_POSITIVE).ln()).sqrt();
        let theta = std::f64::consts::TAU * self.next_unit();
        sd * r * theta.cos()
    }
}

/// One averaged metrics sample, as the teleop stack writes every 100 ms.
fn sample_line(noise: &mut Noise, step: u64, t_us: i64) -> serde_json::Value {
    let phase = step as f64 / 50.0;
    let speed = (8.0 + 6.0 * phase.sin() + noise.jitter(0.3)).max(0.0);
    let gear = if speed < 0.5 { 0 } else { ((speed / 4.0) as i64 + 1).min(5) };
    let steering = 25.0 * (phase * 0.7).sin() + noise.jitter(1.5);
    let gas = (speed / 14.0 * 100.0 + noise.jitter(2.0)).clamp(0.0, 100.0);

    let mut line = json!({
        "timestamp": t_us,
        "vehicle_state_avg": if speed < 0.5 { 1 } else { 2 },
        "speed_avg": speed,
        "gear_avg": gear,
        "gas_pedal_avg": gas,
        "steering_wheel_avg": steering,
    });
    // Hazard signal is only reported every tenth sample; a few come back null.
    if step % 10 == 0 {
        line["hazard_signal_avg"] = if step % 70 == 0 { json!(null) } else { json!(0) };
    }
    line
}

fn main() -> Result<()> {
    let output_path = std::env::args().nth(1).unwrap_or_else(|| "ato_log.log".to_string());
    let mut noise = Noise(42);

    let file = File::create(&output_path).with_context(|| format!("creating {output_path}"))?;
    let mut out = BufWriter::new(file);

    // 2024-05-01 08:00:00 UTC, 10 Hz for five minutes.
    let start_us: i64 = 1_714_550_400_000_000;
    let steps = 3000u64;
    let mut malformed = 0;

    for step in 0..steps {
        let t_us = start_us + step as i64 * 100_000;
        let line = sample_line(&mut noise, step, t_us);
        writeln!(out, "{line}")?;

        // Sprinkle in what a crashed writer leaves behind.
        if step % 997 == 500 {
            let text = line.to_string();
            writeln!(out, "{}", &text[..text.len() / 2])?;
            malformed += 1;
        }
        if step % 613 == 0 {
            writeln!(out)?;
        }
    }
    out.flush().context("flushing sample log")?;

    println!("Wrote {steps} samples ({malformed} truncated lines) to {output_path}");
    Ok(())
}
