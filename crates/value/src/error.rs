use thiserror::Error;

use crate::kind::Kind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    #[error("CIRCULAR_STRUCTURE")]
    Circular,

    #[error("UNSUPPORTED_KIND: {0}")]
    Unsupported(Kind),

    #[error("NON_FINITE_NUMBER: {0}")]
    NonFiniteNumber(f64),
}
