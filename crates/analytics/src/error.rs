use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("No listings match the selected filters")]
    EmptySelection,

    #[error("'{value}' is not an available {field} option")]
    UnknownOption { field: &'static str, value: String },

    #[error("Error in calculation: {0}")]
    Calculation(String),
}
