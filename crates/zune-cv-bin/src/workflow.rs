/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::{debug, info};
use serde::Serialize;
use zune_raster::buffer::RasterBuffer;
use zune_raster::codecs::{decode, encode};
use zune_vision::generate::blend;

use crate::cmd_args::arg_parsers::IBlendMode;
use crate::cmd_parsers::{fill_args, get};
use crate::errors::CliErrors;

mod analysis;
mod generators;

pub(crate) fn run_command(args: &ArgMatches) -> Result<(), CliErrors> {
    match args.subcommand() {
        Some(("filter", sub)) => run_filters(sub),
        Some(("features", sub)) => analysis::features(sub),
        Some(("compare", sub)) => analysis::compare(sub),
        Some(("hash", sub)) => analysis::hash(sub),
        Some(("detect", sub)) => analysis::detect(sub),
        Some(("generate", sub)) => generators::generate(sub),
        Some(("blend", sub)) => run_blend(sub),
        _ => Err(CliErrors::Arguments("No command given".to_string()))
    }
}

pub(crate) fn read_image(args: &ArgMatches, id: &str) -> Result<RasterBuffer, CliErrors> {
    let path = get::<String>(args, id)?;
    info!("Decoding {}", path);

    let image = decode(&path)?;
    debug!("Decoded {}x{} image", image.width(), image.height());

    Ok(image)
}

pub(crate) fn write_image(args: &ArgMatches, image: &RasterBuffer) -> Result<(), CliErrors> {
    let path = get::<String>(args, "out")?;
    let quality = get::<u8>(args, "quality")?;

    info!("Writing {}x{} image to {}", image.width(), image.height(), path);
    encode(image, &path, quality)?;

    Ok(())
}

/// Print a report as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), CliErrors> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

fn run_filters(args: &ArgMatches) -> Result<(), CliErrors> {
    let mut image = read_image(args, "in")?;

    for argument in fill_args(args) {
        if let Some(operation) = crate::cmd_parsers::filters::parse_options(&argument, args)? {
            operation.execute(&mut image)?;
        }
    }
    write_image(args, &image)
}

fn run_blend(args: &ArgMatches) -> Result<(), CliErrors> {
    let base = read_image(args, "base")?;
    let top = read_image(args, "top")?;

    let mode = get::<IBlendMode>(args, "mode")?.to_blend_mode();
    let opacity = get::<f32>(args, "opacity")?;

    let output = blend(&base, &top, mode, opacity)?;

    write_image(args, &output)
}
