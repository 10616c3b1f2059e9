use thiserror::Error;

pub type PfResult<T> = Result<T, PfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Expected a positive value for {what}, got {value}")]
    NotPositive { what: &'static str, value: f64 },
}
