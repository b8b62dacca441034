use thiserror::Error;

use crate::api::ApiError;
use crate::storage::StoreError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to persist session: {0}")]
    Store(#[from] StoreError),
}
