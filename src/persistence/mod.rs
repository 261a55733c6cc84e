use crate::error::GanError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not parse .gan file: {0}")]
    Gan(#[from] GanError),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub mod file;

pub use file::{
    load_project_from_gan, load_project_from_gan_with, project_to_json_string,
    save_project_to_json, save_tasks_to_csv, write_tasks_csv,
};
