// helper struct for keeping track of which values are exact

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Exact<T: fmt::Debug> {
    pub value: T,
    pub exact: bool,
}

impl<T: fmt::Debug> fmt::Debug for Exact<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exact {
            write!(f, "exactly ")?;
        } else {
            write!(f, "approx. ")?;
        }
        write!(f, "{:?}", self.value)?;
        Ok(())
    }
}

impl<T: fmt::Debug> Exact<T> {
    pub fn new(value: T, exact: bool) -> Self {
        Self { value, exact }
    }
}
