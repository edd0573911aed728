/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::debug;
use zune_raster::canny::Canny;
use zune_raster::convolve::{Convolve, Kernel};
use zune_raster::crop::Crop;
use zune_raster::equalize::HistogramEqualization;
use zune_raster::gaussian_blur::GaussianBlur;
use zune_raster::grayscale::Grayscale;
use zune_raster::resize::Resize;
use zune_raster::sobel::Sobel;
use zune_raster::threshold::Threshold;
use zune_raster::traits::OperationsTrait;
use zune_vision::detect::{Closing, Dilate, Erode, Opening};

use crate::cmd_parsers::{get, get_many};
use crate::errors::CliErrors;

/// Turn one command line argument into an operation, `None` if it is not an operation
pub fn parse_options(
    argument: &str, args: &ArgMatches
) -> Result<Option<Box<dyn OperationsTrait>>, CliErrors> {
    let operation: Box<dyn OperationsTrait> = match argument {
        "grayscale" => Box::new(Grayscale::new()),
        "equalize" => Box::new(HistogramEqualization::new()),
        "sobel" => Box::new(Sobel::new()),
        "threshold" => Box::new(Threshold::new(get::<u8>(args, argument)?)),
        "blur" => Box::new(GaussianBlur::new(get::<f32>(args, argument)?)),
        "canny" => {
            let values = get_many::<f32>(args, argument)?;
            Box::new(Canny::new(values[0], values[1]))
        }
        "resize" => {
            let values = get_many::<usize>(args, argument)?;
            Box::new(Resize::new(values[0], values[1]))
        }
        "crop" => {
            let values = get_many::<usize>(args, argument)?;
            Box::new(Crop::new(values[0], values[1], values[2], values[3]))
        }
        "convolve" => {
            let weights = get_many::<f32>(args, argument)?;
            Box::new(Convolve::new(Kernel::square(weights)?))
        }
        "erode" => Box::new(Erode::new(get::<usize>(args, argument)?)),
        "dilate" => Box::new(Dilate::new(get::<usize>(args, argument)?)),
        "opening" => Box::new(Opening::new(get::<usize>(args, argument)?)),
        "closing" => Box::new(Closing::new(get::<usize>(args, argument)?)),
        _ => return Ok(None)
    };
    debug!("Added {} operation", operation.name());

    Ok(Some(operation))
}
