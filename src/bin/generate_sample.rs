use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Closure depths (km) used to derive predicted ages: AHe, AFT, ZHe, ZFT.
const CLOSURE_DEPTHS: [f64; 4] = [2.0, 3.5, 6.0, 9.0];
const SURFACE_TEMP: f64 = 10.0;
const GEOTHERM: f64 = 25.0;
const PATH_START_MYR: f64 = 30.0;
const PATH_STEP_MYR: f64 = 0.5;

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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

struct Sample {
    lon: f64,
    lat: f64,
    elev: f64,
    /// Exhumation rate in km/Myr, constant over the path.
    rate: f64,
}

/// Depth below the final surface (km) at `age`.
fn depth_at(sample: &Sample, age: f64) -> f64 {
    sample.rate * age
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let samples: Vec<Sample> = (0..6)
        .map(|_| Sample {
            lon: rng.uniform(-123.0, -121.0),
            lat: rng.uniform(47.0, 48.5),
            elev: rng.uniform(200.0, 2500.0).round(),
            rate: rng.uniform(0.2, 1.5),
        })
        .collect();

    // ---- <run>/Comparison.txt ----
    let mut comparison = format!("{}\n", samples.len());
    for (i, s) in samples.iter().enumerate() {
        write!(comparison, "{:.4} {:.4} {:.1} {}", s.lon, s.lat, s.elev, i + 1).unwrap();
        for (sys, depth) in CLOSURE_DEPTHS.iter().enumerate() {
            let predicted = if i == 0 && sys == 3 { 0.0 } else { depth / s.rate };
            // Leave a few systems unobserved.
            let observed = if (i + sys) % 3 == 2 {
                -999.0
            } else {
                predicted * rng.uniform(0.9, 1.1)
            };
            write!(comparison, " {observed:.3} {predicted:.3}").unwrap();
        }
        comparison.push('\n');
    }

    // ---- Ttpaths.txt: old → young, blank line after each sample ----
    let mut ttpaths = String::from("Age(Myr) Temperature(C) Depth(km)\n");
    for s in &samples {
        let steps = (PATH_START_MYR / PATH_STEP_MYR) as usize;
        for k in (0..=steps).rev() {
            let age = k as f64 * PATH_STEP_MYR;
            let depth = depth_at(s, age) + s.elev / 1000.0;
            let temp = SURFACE_TEMP + GEOTHERM * depth_at(s, age);
            writeln!(ttpaths, "{age:.2} {temp:.2} {depth:.4}").unwrap();
        }
        ttpaths.push('\n');
    }

    let run_dir = Path::new("demo_run");
    fs::create_dir_all(run_dir).expect("Failed to create run directory");
    fs::write(run_dir.join("Comparison.txt"), comparison).expect("Failed to write Comparison.txt");
    fs::write("Ttpaths.txt", ttpaths).expect("Failed to write Ttpaths.txt");

    println!(
        "Wrote {} samples to {}/Comparison.txt and Ttpaths.txt",
        samples.len(),
        run_dir.display()
    );
}
