use anyhow::{Context, Result};
use serde::Serialize;

/// One row of a CRDS analyzer export, in the analyzer's column order.
#[derive(Serialize)]
struct ExportRow {
    #[serde(rename = "Sample Id")]
    sample_id: String,
    #[serde(rename = "Peak Number")]
    peak_number: u32,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Max 12CO2 (ppm)")]
    max_12co2: String,
    #[serde(rename = "12CO2 Integral")]
    integral_12co2: String,
    #[serde(rename = "13CO2 Integral")]
    integral_13co2: String,
    #[serde(rename = "Delta CRDS")]
    delta_crds: String,
    #[serde(rename = "12CO2 Baseline")]
    baseline_12co2: String,
    #[serde(rename = "13CO2 Baseline")]
    baseline_13co2: String,
    #[serde(rename = "Threshold")]
    threshold: String,
    #[serde(rename = "Number of data points")]
    data_points: u32,
    #[serde(rename = "Time interval (seconds)")]
    time_interval: String,
}

/// One row of the leaf 13C reference table.
#[derive(Serialize)]
struct SpeciesRow {
    species: &'static str,
    #[serde(rename = "little.d13.org")]
    literature_value: &'static str,
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

/// `HH:MM:SS` on the run day, `minutes` after 11:00.
fn timestamp(minutes: f64) -> String {
    let total = (11.0 * 3600.0 + minutes * 60.0) as u32;
    format!(
        "2024/07/03 {:02}:{:02}:{:02}",
        total / 3600,
        (total / 60) % 60,
        total % 60
    )
}

fn export_row(rng: &mut SimpleRng, index: u32, delta: f64) -> ExportRow {
    let start = index as f64 * 15.5;
    let duration = rng.gauss(7.6, 0.3);
    let integral_12 = rng.gauss(640_000.0, 50_000.0);
    let points = 420 + (rng.next_f64() * 45.0) as u32;

    ExportRow {
        sample_id: (index + 1).to_string(),
        peak_number: 1,
        description: String::new(),
        start_time: timestamp(start),
        end_time: timestamp(start + duration),
        max_12co2: format!("{:.3}", rng.gauss(3400.0, 300.0)),
        integral_12co2: format!("{integral_12:.3}"),
        integral_13co2: format!("{:.3}", integral_12 * 0.01117),
        delta_crds: format!("{delta:.3}"),
        baseline_12co2: format!("{:.3}", rng.gauss(4.0, 1.0).abs()),
        baseline_13co2: format!("{:.3}", rng.gauss(0.08, 0.02).abs()),
        threshold: "70.000".to_string(),
        data_points: points,
        time_interval: format!("{:.3}", duration * 60.0),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    // Glucose standards read around -6.76 on this analyzer.
    let mut rows: Vec<ExportRow> = (0..3)
        .map(|i| {
            let delta = rng.gauss(-6.762, 0.03);
            export_row(&mut rng, i, delta)
        })
        .collect();

    // Two leaf populations: C3 (sun) and C3 (shade), six leaves each.
    let populations = [(-10.2, 0.6), (-12.1, 0.7)];
    let mut index = rows.len() as u32;
    for &(mean, spread) in &populations {
        for _ in 0..6 {
            let delta = rng.gauss(mean, spread);
            rows.push(export_row(&mut rng, index, delta));
            index += 1;
        }
    }

    let export_path = "sample_isotopes.csv";
    let mut writer = csv::Writer::from_path(export_path)
        .with_context(|| format!("creating {export_path}"))?;
    for row in &rows {
        writer.serialize(row).context("writing export row")?;
    }
    writer.flush().context("flushing export")?;

    let species = [
        SpeciesRow { species: "Acer saccharum", literature_value: "-28.9" },
        SpeciesRow { species: "Quercus robur", literature_value: "-27.4" },
        SpeciesRow { species: "Zea mays", literature_value: "-12.6" },
        SpeciesRow { species: "Fagus sylvatica", literature_value: "NA" },
        SpeciesRow { species: "Pinus sylvestris", literature_value: "-26.8" },
        SpeciesRow { species: "Saccharum officinarum", literature_value: "NA" },
    ];

    let reference_path = "leaf13C_database.csv";
    let mut writer = csv::Writer::from_path(reference_path)
        .with_context(|| format!("creating {reference_path}"))?;
    for row in &species {
        writer.serialize(row).context("writing species row")?;
    }
    writer.flush().context("flushing reference table")?;

    log::info!("Generated {} export rows and {} species", rows.len(), species.len());
    println!(
        "Wrote {} rows (3 standards + {} samples) to {export_path} and {} species to {reference_path}",
        rows.len(),
        rows.len() - 3,
        species.len()
    );
    Ok(())
}
