use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const DEFAULT_OUTPUT: &str = "files/input/shipping-data.csv";
const ROWS: usize = 2000;

/// One generated row, with the column names of the real export.
#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "Warehouse_block")]
    warehouse_block: &'static str,
    #[serde(rename = "Mode_of_Shipment")]
    mode_of_shipment: &'static str,
    #[serde(rename = "Customer_care_calls")]
    customer_care_calls: i64,
    #[serde(rename = "Customer_rating")]
    customer_rating: i64,
    #[serde(rename = "Cost_of_the_Product")]
    cost_of_the_product: i64,
    #[serde(rename = "Weight_in_gms")]
    weight_in_gms: f64,
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

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }

    /// Pick from `(item, weight)` pairs proportionally to weight.
    fn weighted<T: Copy>(&mut self, items: &[(T, f64)]) -> T {
        let total: f64 = items.iter().map(|(_, w)| w).sum();
        let mut r = self.next_f64() * total;
        for &(item, w) in items {
            if r < w {
                return item;
            }
            r -= w;
        }
        items[items.len() - 1].0
    }
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let blocks = [("A", 1.0), ("B", 1.0), ("C", 1.0), ("D", 1.0), ("F", 2.0)];
    let modes = [("Ship", 0.68), ("Flight", 0.16), ("Road", 0.16)];

    (0..ROWS)
        .map(|i| {
            // Shipments cluster into a light and a heavy group.
            let heavy = rng.next_f64() < 0.6;
            let weight_in_gms = if heavy {
                rng.range(4000, 6000) as f64
            } else {
                let spread = rng.range(0, 2000);
                rng.range(1000, 2000 + spread) as f64
            };

            Row {
                id: i as i64 + 1,
                warehouse_block: rng.weighted(&blocks),
                mode_of_shipment: rng.weighted(&modes),
                customer_care_calls: rng.range(2, 7),
                customer_rating: rng.range(1, 5),
                cost_of_the_product: rng.range(96, 310),
                weight_in_gms,
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("ID", DataType::Int64, false),
        Field::new("Warehouse_block", DataType::Utf8, false),
        Field::new("Mode_of_Shipment", DataType::Utf8, false),
        Field::new("Customer_care_calls", DataType::Int64, false),
        Field::new("Customer_rating", DataType::Int64, false),
        Field::new("Cost_of_the_Product", DataType::Int64, false),
        Field::new("Weight_in_gms", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.id))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.warehouse_block))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.mode_of_shipment))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.customer_care_calls))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.customer_rating))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.cost_of_the_product))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.weight_in_gms))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    let ext = output_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(&output_path, &rows)?,
        "parquet" | "pq" => write_parquet(&output_path, &rows)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    log::info!("Wrote {} shipments to {}", rows.len(), output_path.display());
    println!("Wrote {} shipments to {}", rows.len(), output_path.display());
    Ok(())
}
