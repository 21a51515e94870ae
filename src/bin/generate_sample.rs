use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const LAUNCHES: usize = 56;

/// (site, share of launches)
const SITES: [(&str, f64); 4] = [
    ("CCAFS LC-40", 0.47),
    ("CCAFS SLC-40", 0.13),
    ("KSC LC-39A", 0.23),
    ("VAFB SLC-4E", 0.17),
];

/// (booster category, payload ceiling in kg, success rate), in flight order.
const BOOSTERS: [(&str, f64, f64); 5] = [
    ("v1.0", 700.0, 0.2),
    ("v1.1", 4500.0, 0.35),
    ("FT", 9600.0, 0.65),
    ("B4", 7000.0, 0.55),
    ("B5", 15600.0, 0.9),
];

#[derive(Serialize)]
struct Row {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    site: &'static str,
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload: f64,
    #[serde(rename = "Booster Version Category")]
    booster: &'static str,
}

fn pick_site(rng: &mut StdRng) -> &'static str {
    let mut r: f64 = rng.gen();
    for (site, share) in SITES {
        if r < share {
            return site;
        }
        r -= share;
    }
    SITES[SITES.len() - 1].0
}

fn generate(rng: &mut StdRng) -> Vec<Row> {
    (0..LAUNCHES)
        .map(|i| {
            // Booster generations follow each other over the flight history.
            let generation = (i * BOOSTERS.len() / LAUNCHES).min(BOOSTERS.len() - 1);
            let (booster, ceiling, success_rate) = BOOSTERS[generation];
            let payload = if rng.gen_bool(0.05) {
                0.0
            } else {
                (rng.gen_range(0.05..1.0) * ceiling).round()
            };
            Row {
                flight_number: i as i64 + 1,
                site: pick_site(rng),
                class: i64::from(rng.gen_bool(success_rate)),
                payload,
                booster,
            }
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.booster))),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "spacex_launch_dash.csv")?;
    write_parquet(&rows, "spacex_launch_dash.parquet")?;

    println!(
        "Wrote {} launches to spacex_launch_dash.csv and spacex_launch_dash.parquet",
        rows.len()
    );
    Ok(())
}
