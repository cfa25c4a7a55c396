use thiserror::Error;

#[derive(Error, Debug)]
pub enum FundError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Scheme not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type FundResult<T> = Result<T, FundError>;
