/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Formatter};

use zune_raster::errors::RasterErrors;

/// Everything that can stop a command
pub enum CliErrors {
    Raster(RasterErrors),
    Json(serde_json::Error),
    Io(std::io::Error),
    /// A required argument was missing or malformed
    Arguments(String)
}

impl Debug for CliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raster(err) => writeln!(f, "{err:?}"),
            Self::Json(err) => writeln!(f, "Could not serialize output: {err}"),
            Self::Io(err) => writeln!(f, "I/O error: {err}"),
            Self::Arguments(reason) => writeln!(f, "Bad arguments: {reason}")
        }
    }
}

impl From<RasterErrors> for CliErrors {
    fn from(value: RasterErrors) -> Self {
        CliErrors::Raster(value)
    }
}

impl From<serde_json::Error> for CliErrors {
    fn from(value: serde_json::Error) -> Self {
        CliErrors::Json(value)
    }
}

impl From<std::io::Error> for CliErrors {
    fn from(value: std::io::Error) -> Self {
        CliErrors::Io(value)
    }
}
