use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_writer::ArrowWriter;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::problem::{path_distance, route_distance};
use crate::solution::AlgorithmStep;
use crate::solution::route::path_ids;
use crate::types::Kilometers;

/// One row of an exported step trace.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub step: usize,
    pub description: String,
    /// Location ids along the current path, comma separated.
    pub current_path: String,
    pub best_path: String,
    /// Length of the current path as drawn, without a closing leg.
    pub current_length: Kilometers,
    /// Tour length of the best path, absent while there is none.
    pub best_distance: Option<Kilometers>,
    pub edge_from: Option<String>,
    pub edge_to: Option<String>,
}

impl StepRecord {
    pub fn from_step(step: usize, snapshot: &AlgorithmStep) -> Self {
        let (edge_from, edge_to) = match &snapshot.evaluating_edge {
            Some((from, to)) => (Some(from.id.to_string()), Some(to.id.to_string())),
            None => (None, None),
        };

        StepRecord {
            step,
            description: snapshot.description.clone(),
            current_path: path_ids(&snapshot.current_path),
            best_path: path_ids(&snapshot.best_path_so_far),
            current_length: path_distance(&snapshot.current_path),
            best_distance: (!snapshot.best_path_so_far.is_empty())
                .then(|| route_distance(&snapshot.best_path_so_far)),
            edge_from,
            edge_to,
        }
    }
}

pub fn records_from_steps(steps: &[AlgorithmStep]) -> Vec<StepRecord> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| StepRecord::from_step(i, step))
        .collect()
}

pub fn serialize_to_parquet(records: &[StepRecord], filename: impl AsRef<Path>) -> Result<()> {
    let steps: Int64Array = records.iter().map(|r| Some(r.step as i64)).collect();
    let descriptions = StringArray::from(
        records.iter().map(|r| r.description.as_str()).collect::<Vec<_>>(),
    );
    let current_paths = StringArray::from(
        records.iter().map(|r| r.current_path.as_str()).collect::<Vec<_>>(),
    );
    let best_paths = StringArray::from(
        records.iter().map(|r| r.best_path.as_str()).collect::<Vec<_>>(),
    );
    let current_lengths: Float64Array = records.iter().map(|r| Some(r.current_length)).collect();
    let best_distances: Float64Array = records.iter().map(|r| r.best_distance).collect();
    let edge_from = StringArray::from(
        records.iter().map(|r| r.edge_from.as_deref()).collect::<Vec<_>>(),
    );
    let edge_to = StringArray::from(
        records.iter().map(|r| r.edge_to.as_deref()).collect::<Vec<_>>(),
    );

    // Arrow schema
    let schema = Schema::new(vec![
        Field::new("step", DataType::Int64, false),
        Field::new("description", DataType::Utf8, false),
        Field::new("current_path", DataType::Utf8, false),
        Field::new("best_path", DataType::Utf8, false),
        Field::new("current_length", DataType::Float64, false),
        Field::new("best_distance", DataType::Float64, true),
        Field::new("edge_from", DataType::Utf8, true),
        Field::new("edge_to", DataType::Utf8, true),
    ]);

    let batch = RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(steps),
            Arc::new(descriptions),
            Arc::new(current_paths),
            Arc::new(best_paths),
            Arc::new(current_lengths),
            Arc::new(best_distances),
            Arc::new(edge_from),
            Arc::new(edge_to),
        ],
    )?;

    let file = File::create(filename)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}
