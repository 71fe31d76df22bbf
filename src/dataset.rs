use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;

use crate::error::EvalError;
use crate::models::Dataset;
use crate::schema;

/// Position of every required column within the uploaded header row.
/// Built once per dataset; rows never carry column names themselves.
pub type ColumnIndex = HashMap<&'static str, usize>;

pub fn load(path: &Path) -> anyhow::Result<Dataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    from_reader(file)
}

pub fn from_reader<R: std::io::Read>(reader: R) -> anyhow::Result<Dataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        rows.push(result?);
    }

    Ok(Dataset { headers, rows })
}

/// The dataset-level schema check. Either every required column is present
/// and we get an index for the scoring pass, or the whole upload is
/// rejected with the full list of missing names.
pub fn validate_columns(dataset: &Dataset) -> Result<ColumnIndex, EvalError> {
    let required = schema::required_column_set();
    let mut index = ColumnIndex::new();
    for name in required.iter().copied() {
        if let Some(position) = dataset.headers.iter().position(|h| h == name) {
            index.insert(name, position);
        }
    }

    if index.len() < required.len() {
        let mut missing: Vec<String> = required
            .iter()
            .copied()
            .filter(|name| !index.contains_key(name))
            .map(str::to_string)
            .collect();
        missing.sort();
        return Err(EvalError::MissingColumns { columns: missing });
    }

    Ok(index)
}
