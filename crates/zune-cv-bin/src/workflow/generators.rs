/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::info;
use nanorand::WyRand;
use num_complex::Complex64;
use zune_vision::generate::{
    checkerboard, julia, linear_gradient, mandelbrot, perlin_noise, radial_gradient,
    simplex_noise, sine_pattern, voronoi, white_noise, FractalOptions, NoiseOptions
};

use crate::cmd_parsers::{get, get_color, get_many};
use crate::errors::CliErrors;
use crate::workflow::write_image;

fn rng(args: &ArgMatches) -> Result<WyRand, CliErrors> {
    let seed = get::<u64>(args, "seed")?;
    info!("Using seed {}", seed);

    Ok(WyRand::new_seed(seed))
}

fn noise_options(args: &ArgMatches) -> Result<NoiseOptions, CliErrors> {
    Ok(NoiseOptions::default()
        .set_scale(get::<f64>(args, "scale")?)
        .set_octaves(get::<usize>(args, "octaves")?)
        .set_persistence(get::<f64>(args, "persistence")?))
}

fn fractal_options(args: &ArgMatches) -> Result<FractalOptions, CliErrors> {
    let center = get_many::<f64>(args, "center")?;

    Ok(FractalOptions::default()
        .set_center(center[0], center[1])
        .set_zoom(get::<f64>(args, "zoom")?)
        .set_max_iterations(get::<usize>(args, "iterations")?))
}

pub(crate) fn generate(args: &ArgMatches) -> Result<(), CliErrors> {
    let Some((name, sub)) = args.subcommand() else {
        return Err(CliErrors::Arguments("No generator given".to_string()));
    };
    let width = get::<usize>(sub, "width")?;
    let height = get::<usize>(sub, "height")?;

    info!("Generating {}x{} {} image", width, height, name);

    let image = match name {
        "noise" => white_noise(width, height, get::<bool>(sub, "color")?, &mut rng(sub)?)?,
        "perlin" => perlin_noise(width, height, &noise_options(sub)?, &mut rng(sub)?)?,
        "simplex" => simplex_noise(width, height, &noise_options(sub)?, &mut rng(sub)?)?,
        "gradient" => linear_gradient(
            width,
            height,
            get::<f64>(sub, "angle")?,
            get_color(sub, "from")?,
            get_color(sub, "to")?
        )?,
        "radial" => radial_gradient(width, height, get_color(sub, "from")?, get_color(sub, "to")?)?,
        "checkerboard" => checkerboard(
            width,
            height,
            get::<usize>(sub, "cell")?,
            get_color(sub, "from")?,
            get_color(sub, "to")?
        )?,
        "sine" => sine_pattern(width, height, get::<f64>(sub, "fx")?, get::<f64>(sub, "fy")?)?,
        "mandelbrot" => mandelbrot(width, height, &fractal_options(sub)?)?,
        "julia" => {
            let constant = get_many::<f64>(sub, "constant")?;
            let c = Complex64::new(constant[0], constant[1]);

            julia(width, height, c, &fractal_options(sub)?)?
        }
        "voronoi" => voronoi(width, height, get::<usize>(sub, "points")?, &mut rng(sub)?)?,
        _ => return Err(CliErrors::Arguments(format!("Unknown generator {name}")))
    };

    write_image(sub, &image)
}
