/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Cooperative cancellation for long running operations
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::RasterErrors;

/// A token that can stop long loops early
///
/// Cloned tokens share the same flag, so one clone can be handed to
/// another thread and cancelled from there.
///
/// The default token can never be cancelled and costs nothing to check.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Option<Arc<AtomicBool>>
}

impl CancelToken {
    /// Create a token that can be cancelled
    #[must_use]
    pub fn new() -> CancelToken {
        CancelToken {
            flag: Some(Arc::new(AtomicBool::new(false)))
        }
    }

    /// Request that all operations holding a clone of this token stop
    pub fn cancel(&self) {
        if let Some(flag) = &self.flag {
            flag.store(true, Ordering::Relaxed);
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }

    /// Return an error naming `operation` if the token was cancelled
    ///
    /// # Errors
    /// [`RasterErrors::Cancelled`] once [`cancel`](Self::cancel) has been called
    pub fn check(&self, operation: &'static str) -> Result<(), RasterErrors> {
        if self.is_cancelled() {
            return Err(RasterErrors::Cancelled(operation));
        }
        Ok(())
    }
}

#[test]
fn test_clones_share_flag() {
    let token = CancelToken::new();
    let other = token.clone();

    assert!(token.check("test").is_ok());
    other.cancel();
    assert!(token.is_cancelled());
    assert!(matches!(
        token.check("test"),
        Err(RasterErrors::Cancelled("test"))
    ));
}

#[test]
fn test_default_never_cancels() {
    let token = CancelToken::default();
    token.cancel();
    assert!(!token.is_cancelled());
}
