//! Save decoded drops to a parquet file.

use std::{fs::File, path::Path, sync::Arc};

use anyhow::Result;
use arrow::{
    array::{ArrayRef, Float64Array, Int32Array, StringArray, TimestampSecondArray},
    datatypes::{DataType, Field, Schema, TimeUnit},
    record_batch::RecordBatch,
};
use chrono::NaiveDateTime;
use parquet::{arrow::ArrowWriter, file::properties::WriterProperties};

use crate::bulletin::DecodedDrop;

fn schema() -> Schema {
    let timestamp = DataType::Timestamp(TimeUnit::Second, None);

    Schema::new(vec![
        Field::new("pressure", DataType::Int32, true),
        Field::new("geopotential", DataType::Int32, true),
        Field::new("temperature", DataType::Float64, true),
        Field::new("dewpoint", DataType::Float64, true),
        Field::new("u", DataType::Float64, true),
        Field::new("v", DataType::Float64, true),
        Field::new("aircraft", DataType::Utf8, true),
        Field::new("flight_id", DataType::Utf8, true),
        Field::new("storm", DataType::Utf8, true),
        Field::new("obs_id", DataType::Utf8, true),
        Field::new("start_time", timestamp.clone(), true),
        Field::new("start_lat", DataType::Float64, true),
        Field::new("start_lon", DataType::Float64, true),
        Field::new("end_time", timestamp, true),
        Field::new("end_lat", DataType::Float64, true),
        Field::new("end_lon", DataType::Float64, true),
    ])
}

pub fn save_parquet(drops: &[DecodedDrop], file_path: &Path) -> Result<()> {
    let num_rows: usize = drops.iter().map(|d| d.levels.len()).sum();

    // Initialize the Parquet writer
    let file = File::create(file_path)?;
    let schema = Arc::new(schema());
    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

    let mut pressures = Vec::with_capacity(num_rows);
    let mut geopotentials = Vec::with_capacity(num_rows);
    let mut temperatures = Vec::with_capacity(num_rows);
    let mut dewpoints = Vec::with_capacity(num_rows);
    let mut us = Vec::with_capacity(num_rows);
    let mut vs = Vec::with_capacity(num_rows);
    let mut aircraft = Vec::with_capacity(num_rows);
    let mut flight_ids = Vec::with_capacity(num_rows);
    let mut storms = Vec::with_capacity(num_rows);
    let mut obs_ids = Vec::with_capacity(num_rows);
    let mut start_times = Vec::with_capacity(num_rows);
    let mut start_lats = Vec::with_capacity(num_rows);
    let mut start_lons = Vec::with_capacity(num_rows);
    let mut end_times = Vec::with_capacity(num_rows);
    let mut end_lats = Vec::with_capacity(num_rows);
    let mut end_lons = Vec::with_capacity(num_rows);

    for drop in drops {
        let metadata = &drop.metadata;
        let release = metadata.release.unwrap_or_default();
        let splash = metadata.splash.unwrap_or_default();

        for level in &drop.levels {
            pressures.push(level.pressure);
            geopotentials.push(level.geopotential);
            temperatures.push(level.temperature);
            dewpoints.push(level.dewpoint);
            us.push(level.u);
            vs.push(level.v);
            aircraft.push(metadata.aircraft.clone());
            flight_ids.push(metadata.flight_id.clone());
            storms.push(metadata.storm.clone());
            obs_ids.push(metadata.obs_id.clone());
            start_times.push(release.time.map(epoch_seconds));
            start_lats.push(release.lat);
            start_lons.push(release.lon);
            end_times.push(splash.time.map(epoch_seconds));
            end_lats.push(splash.lat);
            end_lons.push(splash.lon);
        }
    }

    // Columns in schema order
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int32Array::from(pressures)),
        Arc::new(Int32Array::from(geopotentials)),
        Arc::new(Float64Array::from(temperatures)),
        Arc::new(Float64Array::from(dewpoints)),
        Arc::new(Float64Array::from(us)),
        Arc::new(Float64Array::from(vs)),
        Arc::new(StringArray::from(aircraft)),
        Arc::new(StringArray::from(flight_ids)),
        Arc::new(StringArray::from(storms)),
        Arc::new(StringArray::from(obs_ids)),
        Arc::new(TimestampSecondArray::from(start_times)),
        Arc::new(Float64Array::from(start_lats)),
        Arc::new(Float64Array::from(start_lons)),
        Arc::new(TimestampSecondArray::from(end_times)),
        Arc::new(Float64Array::from(end_lats)),
        Arc::new(Float64Array::from(end_lons)),
    ];

    let batch = RecordBatch::try_new(schema, columns)?;

    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

fn epoch_seconds(time: NaiveDateTime) -> i64 {
    time.and_utc().timestamp()
}

// -- Tests -------------------------------------------------------------------
