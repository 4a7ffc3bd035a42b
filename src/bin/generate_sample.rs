use anyhow::{Context, Result};
use chrono::{DateTime, Duration, FixedOffset};
use serde_json::{Map, Value};

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

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Generate a synthetic `data.json` of particulate-matter readings at 30
/// minute intervals.  Field spellings rotate between known sensor schemas so
/// the viewer's alias resolution is exercised, and PM4 drops out now and
/// then the way it does on sensors that don't report that channel.
fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let start: DateTime<FixedOffset> = DateTime::parse_from_rfc3339("2025-12-10T08:36:46+04:00")
        .context("parsing start timestamp")?;

    // Key spellings per source schema, cycled across records.
    let spellings: [(&str, &str, &str, &str); 3] = [
        ("pm1_0", "pm2_5", "pm4_0", "pm10"),
        ("PM1", "PM2.5", "PM4", "PM10"),
        ("pm1", "pm2_5", "pm4_0", "pm10"),
    ];

    // Slow random walk around typical urban concentrations (µg/m³).
    let mut pm1 = 8.0;
    let mut pm2_5 = 14.0;
    let mut pm4 = 17.0;
    let mut pm10 = 21.0;

    let mut readings: Vec<Value> = Vec::new();

    for i in 0..48i64 {
        pm1 = (pm1 + rng.gauss(0.0, 0.6)).max(0.0);
        pm2_5 = (pm2_5 + rng.gauss(0.0, 1.1)).max(pm1);
        pm4 = (pm4 + rng.gauss(0.0, 1.3)).max(pm2_5);
        pm10 = (pm10 + rng.gauss(0.0, 1.6)).max(pm4);

        let timestamp = start + Duration::minutes(30 * i);
        let (k1, k25, k4, k10) = spellings[i as usize % spellings.len()];

        let mut record = Map::new();
        record.insert("timestamp".to_string(), Value::from(timestamp.to_rfc3339()));
        record.insert(k1.to_string(), Value::from(round2(pm1)));
        record.insert(k25.to_string(), Value::from(round2(pm2_5)));
        if rng.next_f64() >= 0.15 {
            record.insert(k4.to_string(), Value::from(round2(pm4)));
        }
        record.insert(k10.to_string(), Value::from(round2(pm10)));

        readings.push(Value::Object(record));
    }

    let output_path = "data.json";
    let body = serde_json::to_string_pretty(&Value::Array(readings))
        .context("serializing readings")?;
    std::fs::write(output_path, body).with_context(|| format!("writing {output_path}"))?;

    println!("Wrote 48 readings to {output_path}");
    Ok(())
}
