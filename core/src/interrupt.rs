use crate::error::IrratError;

/// Polled by long-running computations (sieving, trial division, simplification).
/// Returning `true` aborts the computation with [`IrratError::Interrupted`].
pub trait Interrupt {
    fn should_interrupt(&self) -> bool;
}

pub(crate) fn test_int<I: Interrupt + ?Sized>(int: &I) -> Result<(), IrratError> {
    if int.should_interrupt() {
        Err(IrratError::Interrupted)
    } else {
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct Never {}
impl Interrupt for Never {
    fn should_interrupt(&self) -> bool {
        false
    }
}
