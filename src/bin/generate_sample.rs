use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "generate-sample")]
#[command(about = "Write a synthetic piston gap pressure file")]
struct Args {
    /// Output file
    #[arg(long, default_value = "Piston_Gap_Pressure.txt")]
    output: PathBuf,

    /// Number of %PHI sections (one per degree)
    #[arg(long, default_value_t = 720)]
    sections: usize,

    /// Circumferential samples per section
    #[arg(long, default_value_t = 36)]
    rows: usize,

    /// Radial samples per row
    #[arg(long, default_value_t = 12)]
    cols: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Pressure in bar at one grid point. The high pressure zone follows the
/// shaft angle around the gap and decays towards the outer radius.
fn pressure(phi_deg: f64, row: usize, rows: usize, col: usize, cols: usize) -> f64 {
    let circ = row as f64 / rows as f64 * 360.0;
    // shortest angular distance to the peak
    let delta = ((circ - phi_deg).rem_euclid(360.0) + 180.0).rem_euclid(360.0) - 180.0;
    let radial = 1.0 - col as f64 / cols.max(1) as f64;
    1.0 + gaussian(delta, 0.0, 40.0, 250.0) * radial
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "% Synthetic piston gap pressure [bar]")?;
    writeln!(
        out,
        "% {} sections, {} x {} values each",
        args.sections, args.rows, args.cols
    )?;

    for s in 0..args.sections {
        let phi = s as f64;
        writeln!(out, "%PHI: {phi:.1} deg")?;
        for row in 0..args.rows {
            let line: Vec<String> = (0..args.cols)
                .map(|col| {
                    let p = pressure(phi, row, args.rows, col, args.cols) + rng.gauss(0.0, 0.05);
                    format!("{p:.4}")
                })
                .collect();
            writeln!(out, "{}", line.join(" "))?;
        }
    }
    out.flush()?;

    println!(
        "Wrote {} sections ({} x {} values each) to {}",
        args.sections,
        args.rows,
        args.cols,
        args.output.display()
    );
    Ok(())
}
