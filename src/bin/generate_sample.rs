use std::fmt::Write as _;

use anyhow::{Context, Result};

/// Loudness envelope for one part of a service: (start second, end second, mean dB).
const SEGMENTS: &[(u32, u32, f64)] = &[
    (0, 900, 68.0),     // walk-in music
    (900, 2400, 91.0),  // band set
    (2400, 4500, 74.0), // talk
    (4500, 5400, 94.0), // closing set
    (5400, 6300, 66.0), // walk-out
];

/// Seeded meter jitter so every run writes the same log.
struct MeterNoise {
    state: [u64; 4],
}

impl MeterNoise {
    fn seeded(seed: u64) -> Self {
        let mut x = seed;
        let state = std::array::from_fn(|_| {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            x
        });
        MeterNoise { state }
    }

    fn step(&mut self) -> u64 {
        let [a, b, c, d] = &mut self.state;
        let out = b.wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = *b << 17;
        *c ^= *a;
        *d ^= *b;
        *b ^= *c;
        *a ^= *d;
        *c ^= t;
        *d = d.rotate_left(45);
        out
    }

    fn unit(&mut self) -> f64 {
        (self.step() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Gaussian offset in dB around `mean`.
    fn jitter(&mut self, mean: f64, spread_db: f64) -> f64 {
        let u1 = self.unit().max(1e-15);
        let u2 = self.unit();
        mean + spread_db * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

fn level_at(second: u32, noise: &mut MeterNoise) -> f64 {
    let base = SEGMENTS
        .iter()
        .find(|(start, end, _)| (*start..*end).contains(&second))
        .map(|(_, _, level)| *level)
        .unwrap_or(60.0);
    // Occasional transients (drum hits, applause).
    let spike = if noise.unit() < 0.002 { noise.jitter(12.0, 3.0) } else { 0.0 };
    (base + noise.jitter(0.0, 2.5) + spike).clamp(35.0, 130.0)
}

fn main() -> Result<()> {
    let mut noise = MeterNoise::seeded(42);

    // Service starts at 09:30:00, one reading per second, REW-style columns.
    let start_secs: u32 = 9 * 3600 + 30 * 60;
    let total = SEGMENTS.last().map(|(_, end, _)| *end).unwrap_or(0);

    let mut out = String::new();
    writeln!(out, "* SPL log exported from meter")?;
    writeln!(out, "* Weighting: A, Slow")?;
    writeln!(out, "Index\tTime\tSPL [dB]")?;
    for second in 0..total {
        let t = start_secs + second;
        let level = level_at(second, &mut noise);
        writeln!(
            out,
            "{}\t{:02}:{:02}:{:02}.000\t{level:.1}",
            second + 1,
            t / 3600,
            (t % 3600) / 60,
            t % 60
        )?;
    }

    let output_path = "20231025 Sunday Service.txt";
    std::fs::write(output_path, out).with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {total} SPL readings to {output_path}");
    Ok(())
}
