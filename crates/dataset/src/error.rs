use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Invalid listing: {0}")]
    Listing(#[from] core_types::CoreError),

    #[error("Listing dates starting at {0} run past the end of the calendar")]
    DateOverflow(NaiveDate),
}
