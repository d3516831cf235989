use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to write dashboard output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize render model: {0}")]
    Serialize(#[from] serde_json::Error),
}
