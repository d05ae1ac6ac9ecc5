use thiserror::Error;

use crate::modules::ModuleError;

#[derive(Debug, Error)]
pub enum CreateError {
    #[error("A candy machine with {0} items does not fit in an account")]
    TooManyItems(u64),

    #[error(transparent)]
    Module(#[from] ModuleError),
}
