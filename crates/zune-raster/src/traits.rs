/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits shared by all buffer operations
use zune_core::log::trace;

use crate::buffer::RasterBuffer;
use crate::errors::RasterErrors;

/// An operation that mutates a raster buffer in place
///
/// Every pixel transform in `zune-raster` and `zune-vision` implements this trait,
/// this allows callers to chain them without caring what each one does
/// ```
/// use zune_raster::buffer::{RasterBuffer, Rgba};
/// use zune_raster::grayscale::Grayscale;
/// use zune_raster::traits::OperationsTrait;
///
/// let mut buffer = RasterBuffer::fill(Rgba::rgb(200, 10, 30), 10, 10).unwrap();
/// Grayscale::new().execute(&mut buffer).unwrap();
/// ```
pub trait OperationsTrait {
    /// Get the name of this operation
    fn name(&self) -> &'static str;

    /// Run the operation on `buffer`
    ///
    /// Implementers do the work here, callers should use [`execute`](Self::execute)
    ///
    /// # Errors
    /// Any error the operation encounters, the buffer may be left
    /// partially modified when an error is returned
    fn execute_impl(&self, buffer: &mut RasterBuffer) -> Result<(), RasterErrors>;

    /// Run the operation on `buffer`
    ///
    /// # Errors
    /// See [`execute_impl`](Self::execute_impl)
    fn execute(&self, buffer: &mut RasterBuffer) -> Result<(), RasterErrors> {
        trace!("Running {}", self.name());
        self.execute_impl(buffer)
    }

    /// Run the operation on a copy of `buffer`, leaving the original untouched
    ///
    /// # Errors
    /// See [`execute_impl`](Self::execute_impl)
    fn clone_and_execute(&self, buffer: &RasterBuffer) -> Result<RasterBuffer, RasterErrors> {
        let mut copy = buffer.clone();
        self.execute(&mut copy)?;
        Ok(copy)
    }
}
