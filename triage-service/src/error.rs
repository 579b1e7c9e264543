use config_engine::ConfigError;
use error_common::TriageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Triage(#[from] TriageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Triage(e) => e.code(),
            ServiceError::Config(_) => error_common::codes::system::CONFIGURATION,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
