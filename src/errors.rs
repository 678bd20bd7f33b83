use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Error de xarxa: {0}")]
    Network(String),

    #[error("Error HTTP: estat {status}")]
    HttpStatus { status: u16 },

    #[error("Validació fallida: {0}")]
    Validation(String),

    #[error("Error d'emmagatzematge: {0}")]
    Storage(String),

    #[error("Error: {0}")]
    Internal(String),
}

impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
