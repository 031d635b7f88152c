//! CSV-backed dataset loading

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use topictile_core::{
    AnnotationRow, Corpus, DatasetSelector, DatasetSource, TilingError, UtteranceRow,
};

/// File name of the utterance table inside a dataset directory
pub const UTTERANCES_FILE: &str = "utterances.csv";

/// File name of the annotation table inside a dataset directory
pub const ANNOTATIONS_FILE: &str = "annotations.csv";

/// Reads `<root>/<dataset>/utterances.csv` and `annotations.csv`
///
/// The utterance table has columns `meeting_id,caption_group_id,caption`,
/// the annotation table `meeting_id,st,en`. Annotation rows are kept in
/// file order.
#[derive(Debug, Clone)]
pub struct CsvDataset {
    root: PathBuf,
}

impl CsvDataset {
    /// Create a source rooted at a data directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding one dataset's tables
    pub fn dataset_dir(&self, dataset: DatasetSelector) -> PathBuf {
        self.root.join(dataset.name())
    }

    /// Read both tables of a dataset
    pub fn read_tables(
        &self,
        dataset: DatasetSelector,
    ) -> Result<(Vec<UtteranceRow>, Vec<AnnotationRow>)> {
        let dir = self.dataset_dir(dataset);
        let utterances: Vec<UtteranceRow> = read_table(&dir.join(UTTERANCES_FILE))?;
        if utterances.is_empty() {
            return Err(CliError::InvalidTable(format!(
                "{} has no rows",
                dir.join(UTTERANCES_FILE).display()
            ))
            .into());
        }
        let annotations: Vec<AnnotationRow> = read_table(&dir.join(ANNOTATIONS_FILE))?;

        log::debug!(
            "Read {} utterance rows and {} annotation rows from {}",
            utterances.len(),
            annotations.len(),
            dir.display()
        );
        Ok((utterances, annotations))
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.is_file() {
        return Err(CliError::DataFileNotFound(path.display().to_string()).into());
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for (line, record) in reader.deserialize().enumerate() {
        let row: T = record.map_err(|e| {
            CliError::InvalidTable(format!("{} row {}: {e}", path.display(), line + 1))
        })?;
        rows.push(row);
    }
    Ok(rows)
}

impl DatasetSource for CsvDataset {
    fn load(&self, dataset: DatasetSelector) -> topictile_core::Result<Corpus> {
        let (utterances, annotations) = self
            .read_tables(dataset)
            .map_err(|e| TilingError::InvalidInput(format!("{e:#}")))?;
        Corpus::from_rows(utterances, annotations)
    }
}
