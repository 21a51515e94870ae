use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::{DataType, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{LaunchDataset, LaunchRecord, Outcome};
use crate::error::DatasetError;

const SITE_COLUMN: [&str; 2] = ["Launch Site", "site"];
const PAYLOAD_COLUMN: [&str; 2] = ["Payload Mass (kg)", "payload_mass_kg"];
const BOOSTER_COLUMN: [&str; 2] = ["Booster Version Category", "booster_version_category"];
const CLASS_COLUMN: [&str; 2] = ["class", "outcome"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per line (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one launch per row, as written by `df.to_parquet()`
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    Ok(LaunchDataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// Row layout shared by CSV and JSON
// ---------------------------------------------------------------------------

/// A launch as it appears in a text file. Column names follow the published
/// launch table; the snake_case aliases allow hand-written JSON. `class` is
/// kept raw so that a bad value is reported the same way for every format.
#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site", alias = "site")]
    site: String,

    #[serde(rename = "Payload Mass (kg)", alias = "payload_mass_kg")]
    payload_mass_kg: f64,

    #[serde(rename = "Booster Version Category", alias = "booster_version_category")]
    booster_version_category: String,

    #[serde(rename = "class", alias = "outcome")]
    class: i64,
}

impl RawRecord {
    fn into_record(self, row: usize) -> Result<LaunchRecord, DatasetError> {
        let outcome = Outcome::try_from(self.class)
            .map_err(|_| DatasetError::InvalidOutcome { row, value: self.class })?;
        Ok(LaunchRecord {
            site: self.site,
            payload_mass_kg: self.payload_mass_kg,
            booster_version_category: self.booster_version_category,
            outcome,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with at least `Launch Site`, `Payload Mass (kg)`,
/// `Booster Version Category` and `class`.
fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    reader
        .deserialize::<RawRecord>()
        .enumerate()
        .map(|(row_no, result)| -> Result<LaunchRecord> {
            let raw = result.with_context(|| format!("CSV row {row_no}"))?;
            Ok(raw.into_record(row_no)?)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 0.0,
///     "Booster Version Category": "v1.0", "class": 0 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = File::open(path).context("opening JSON file")?;
    let raw: Vec<RawRecord> =
        serde_json::from_reader(BufReader::new(file)).context("parsing JSON launch records")?;
    raw.into_iter()
        .enumerate()
        .map(|(row, rec)| -> Result<LaunchRecord> {
            Ok(rec.into_record(row)?)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load launches from Parquet.
///
/// Accepted column types:
/// - site / booster: Utf8 or LargeUtf8
/// - payload: Float64, Float32, Int64 or Int32
/// - class: Int64, Int32, Float64 or Boolean
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let site_col = batch.column(column_index(&schema, &SITE_COLUMN)?);
        let payload_col = batch.column(column_index(&schema, &PAYLOAD_COLUMN)?);
        let booster_col = batch.column(column_index(&schema, &BOOSTER_COLUMN)?);
        let class_col = batch.column(column_index(&schema, &CLASS_COLUMN)?);

        for i in 0..batch.num_rows() {
            let row = records.len();
            records.push(LaunchRecord {
                site: string_at(site_col, i).with_context(|| format!("Row {row}: site"))?,
                payload_mass_kg: f64_at(payload_col, i)
                    .with_context(|| format!("Row {row}: payload"))?,
                booster_version_category: string_at(booster_col, i)
                    .with_context(|| format!("Row {row}: booster version category"))?,
                outcome: outcome_at(class_col, i, row)?,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// Position of the first matching column name.
fn column_index(schema: &Schema, names: &[&str]) -> Result<usize> {
    names
        .iter()
        .find_map(|name| schema.index_of(name).ok())
        .with_context(|| format!("Parquet file missing '{}' column", names[0]))
}

fn downcast<T: Array + 'static>(col: &ArrayRef) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array layout for {:?}", col.data_type()))
}

fn string_at(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("expected a string column, got {other:?}"),
    }
}

fn f64_at(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    let value = match col.data_type() {
        DataType::Float64 => downcast::<Float64Array>(col)?.value(row),
        DataType::Float32 => downcast::<Float32Array>(col)?.value(row) as f64,
        DataType::Int64 => downcast::<Int64Array>(col)?.value(row) as f64,
        DataType::Int32 => downcast::<Int32Array>(col)?.value(row) as f64,
        other => bail!("expected a numeric column, got {other:?}"),
    };
    Ok(value)
}

fn outcome_at(col: &ArrayRef, i: usize, row: usize) -> Result<Outcome> {
    if col.is_null(i) {
        bail!("Row {row}: null class");
    }
    let value = match col.data_type() {
        DataType::Int64 => downcast::<Int64Array>(col)?.value(i),
        DataType::Int32 => downcast::<Int32Array>(col)?.value(i) as i64,
        DataType::Boolean => downcast::<BooleanArray>(col)?.value(i) as i64,
        DataType::Float64 => {
            let v = downcast::<Float64Array>(col)?.value(i);
            if v.fract() != 0.0 {
                bail!("Row {row}: class {v} is not an integer");
            }
            v as i64
        }
        other => bail!("Row {row}: expected an integer class column, got {other:?}"),
    };
    Outcome::try_from(value).map_err(|_| DatasetError::InvalidOutcome { row, value }.into())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::StringArray;
    use arrow::datatypes::Field;
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_csv_with_extra_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "launches.csv",
            "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category\n\
             1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0\n\
             2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0\n\
             3,VAFB SLC-4E,1,9600.0,F9 FT  B1029.1,FT\n",
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(ds.min_payload(), 0.0);
        assert_eq!(ds.max_payload(), 9600.0);
        assert_eq!(ds.records()[2].outcome, Outcome::Success);
        assert_eq!(ds.records()[2].booster_version_category, "FT");
    }

    #[test]
    fn csv_with_bad_class_reports_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "bad.csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
             CCAFS LC-40,0,0.0,v1.0\n\
             CCAFS LC-40,7,525.0,v1.0\n",
        );

        let err = load_file(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::InvalidOutcome { row: 1, value: 7 })
        );
    }

    #[test]
    fn json_with_bad_class_reports_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "bad.json",
            r#"[
                {"site": "A", "payload_mass_kg": 500, "booster_version_category": "v1", "class": 1},
                {"site": "A", "payload_mass_kg": 600, "booster_version_category": "v1", "class": -1}
            ]"#,
        );

        let err = load_file(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::InvalidOutcome { row: 1, value: -1 })
        );
    }

    #[test]
    fn csv_with_unparsable_field_reports_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "bad.csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
             CCAFS LC-40,0,heavy,v1.0\n",
        );

        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"), "{err:#}");
    }

    #[test]
    fn header_only_csv_is_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "empty.csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\n",
        );

        let err = load_file(&path).unwrap_err();
        assert_eq!(err.downcast_ref::<DatasetError>(), Some(&DatasetError::Empty));
    }

    #[test]
    fn loads_json_records_with_either_key_style() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "launches.json",
            r#"[
                {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 3100.0,
                 "Booster Version Category": "FT", "class": 1},
                {"site": "KSC LC-39A", "payload_mass_kg": 5300,
                 "booster_version_category": "B5", "outcome": 0}
            ]"#,
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(
            ds.records(),
            [
                LaunchRecord::new("KSC LC-39A", 3100.0, "FT", Outcome::Success),
                LaunchRecord::new("KSC LC-39A", 5300.0, "B5", Outcome::Failure),
            ]
        );
    }

    #[test]
    fn loads_parquet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launches.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("Launch Site", DataType::Utf8, false),
            Field::new("Payload Mass (kg)", DataType::Float64, false),
            Field::new("Booster Version Category", DataType::Utf8, false),
            Field::new("class", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "B"])),
                Arc::new(Float64Array::from(vec![500.0, 700.0])),
                Arc::new(StringArray::from(vec!["v1", "v2"])),
                Arc::new(Int64Array::from(vec![1, 0])),
            ],
        )
        .unwrap();
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(
            ds.records(),
            [
                LaunchRecord::new("A", 500.0, "v1", Outcome::Success),
                LaunchRecord::new("B", 700.0, "v2", Outcome::Failure),
            ]
        );
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file extension: .xlsx");
    }
}
