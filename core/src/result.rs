use crate::error::IrratError;

pub type FResult<T> = Result<T, IrratError>;
