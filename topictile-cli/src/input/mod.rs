//! Input handling module

pub mod csv_dataset;

pub use csv_dataset::CsvDataset;
