//! Stream wrappers that enforce an exact byte budget.
//!
//! A chunk declares its payload length before the payload. Everything that
//! reads or writes a payload goes through one of these wrappers, so a record
//! implementation can't move more bytes than were declared, and can't stop
//! early without that being noticed when the wrapper is finished.

use std::io::{Read, Write};

use crate::XngError;

#[inline]
fn check_budget(requested: usize, remaining: usize) -> Result<(), XngError> {
  if requested > remaining {
    Err(XngError::BudgetExceeded { requested, remaining })
  } else {
    Ok(())
  }
}

/// Reads exactly a declared number of bytes from an inner reader.
#[derive(Debug)]
pub struct BoundedReader<R> {
  inner: R,
  remaining: usize,
}
impl<R: Read> BoundedReader<R> {
  /// Wraps `inner` with a budget of `budget` bytes.
  #[inline]
  #[must_use]
  pub const fn new(inner: R, budget: usize) -> Self {
    Self { inner, remaining: budget }
  }

  /// How many bytes of the budget are left.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> usize {
    self.remaining
  }

  /// Fills `buf` completely.
  ///
  /// ## Failure
  /// * Asking for more than the remaining budget fails without reading
  ///   anything.
  /// * The inner reader running out of data is a truncation error.
  #[inline]
  pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), XngError> {
    check_budget(buf.len(), self.remaining)?;
    self.inner.read_exact(buf)?;
    self.remaining -= buf.len();
    Ok(())
  }

  /// Ends use of the channel and gives back the inner reader.
  ///
  /// ## Failure
  /// * If any of the budget is unused.
  #[inline]
  pub fn finish(self) -> Result<R, XngError> {
    match self.remaining {
      0 => Ok(self.inner),
      remaining => Err(XngError::BudgetNotExhausted { remaining }),
    }
  }
}

/// Writes exactly a declared number of bytes to an inner writer.
#[derive(Debug)]
pub struct BoundedWriter<W> {
  inner: W,
  remaining: usize,
}
impl<W: Write> BoundedWriter<W> {
  /// Wraps `inner` with a budget of `budget` bytes.
  #[inline]
  #[must_use]
  pub const fn new(inner: W, budget: usize) -> Self {
    Self { inner, remaining: budget }
  }

  /// How many bytes of the budget are left.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> usize {
    self.remaining
  }

  /// Writes all of `bytes`.
  ///
  /// ## Failure
  /// * Writing more than the remaining budget fails without writing anything.
  #[inline]
  pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), XngError> {
    check_budget(bytes.len(), self.remaining)?;
    self.inner.write_all(bytes)?;
    self.remaining -= bytes.len();
    Ok(())
  }

  /// Ends use of the channel and gives back the inner writer.
  ///
  /// ## Failure
  /// * If any of the budget is unused.
  #[inline]
  pub fn finish(self) -> Result<W, XngError> {
    match self.remaining {
      0 => Ok(self.inner),
      remaining => Err(XngError::BudgetNotExhausted { remaining }),
    }
  }
}
