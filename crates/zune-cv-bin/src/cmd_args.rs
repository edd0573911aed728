/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};

use crate::cmd_args::arg_parsers::{IBlendMode, IHashKind, IHistogramMetric};
use crate::cmd_args::help_strings::{
    CONVOLVE_HELP, FILTER_HELP, HASH_HELP, SEED_HELP, TEMPLATE_HELP
};

pub mod arg_parsers;
pub mod help_strings;

fn input() -> Arg {
    Arg::new("in")
        .short('i')
        .long("input")
        .help("Input file to read data from")
        .required(true)
}

fn output() -> Arg {
    Arg::new("out")
        .short('o')
        .long("output")
        .help("Output to write the image to, format follows the extension")
        .required(true)
}

fn quality() -> Arg {
    Arg::new("quality")
        .short('q')
        .long("quality")
        .help("Encoder quality, 0 to 100")
        .value_parser(value_parser!(u8).range(0..=100))
        .default_value("90")
}

fn color(id: &'static str, default: [&'static str; 3]) -> Arg {
    Arg::new(id)
        .long(id)
        .num_args(3)
        .value_names(["R", "G", "B"])
        .value_parser(value_parser!(u8))
        .default_values(default)
}

fn min_area() -> Arg {
    Arg::new("min-area")
        .long("min-area")
        .help("Drop blobs smaller than this many pixels")
        .value_parser(value_parser!(usize))
        .default_value("100")
}

#[rustfmt::skip]
fn logging(cmd: Command) -> Command {
    cmd.arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display information about what each command does"))
}

#[rustfmt::skip]
fn filter_command() -> Command {
    Command::new("filter")
        .about("Apply pixel operations to an image")
        .long_about(FILTER_HELP)
        .arg(input())
        .arg(output())
        .arg(quality())
        .arg(Arg::new("grayscale")
            .long("grayscale")
            .help_heading("OPERATIONS")
            .action(ArgAction::SetTrue)
            .help("Convert the image to grayscale"))
        .arg(Arg::new("equalize")
            .long("equalize")
            .help_heading("OPERATIONS")
            .action(ArgAction::SetTrue)
            .help("Stretch the luma histogram over the full range"))
        .arg(Arg::new("threshold")
            .long("threshold")
            .help_heading("OPERATIONS")
            .value_name("LEVEL")
            .value_parser(value_parser!(u8))
            .help("Binarize, luma at or above LEVEL becomes white"))
        .arg(Arg::new("blur")
            .long("blur")
            .help_heading("OPERATIONS")
            .value_name("RADIUS")
            .value_parser(value_parser!(f32))
            .help("Gaussian blur"))
        .arg(Arg::new("sobel")
            .long("sobel")
            .help_heading("OPERATIONS")
            .action(ArgAction::SetTrue)
            .help("Replace the image with its gradient magnitude"))
        .arg(Arg::new("canny")
            .long("canny")
            .help_heading("OPERATIONS")
            .num_args(2)
            .value_names(["LOW", "HIGH"])
            .value_parser(value_parser!(f32))
            .help("Canny edge detection with hysteresis thresholds"))
        .arg(Arg::new("resize")
            .long("resize")
            .help_heading("OPERATIONS")
            .num_args(2)
            .value_names(["WIDTH", "HEIGHT"])
            .value_parser(value_parser!(usize))
            .help("Bilinear resize"))
        .arg(Arg::new("crop")
            .long("crop")
            .help_heading("OPERATIONS")
            .num_args(4)
            .value_names(["X", "Y", "WIDTH", "HEIGHT"])
            .value_parser(value_parser!(usize))
            .help("Crop to a rectangle"))
        .arg(Arg::new("convolve")
            .long("convolve")
            .help_heading("OPERATIONS")
            .num_args(1..)
            .allow_negative_numbers(true)
            .value_parser(value_parser!(f32))
            .help("Convolve with a square kernel")
            .long_help(CONVOLVE_HELP))
        .arg(Arg::new("erode")
            .long("erode")
            .help_heading("MORPHOLOGY")
            .value_name("SIZE")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("dilate")
            .long("dilate")
            .help_heading("MORPHOLOGY")
            .value_name("SIZE")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("opening")
            .long("opening")
            .help_heading("MORPHOLOGY")
            .value_name("SIZE")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("closing")
            .long("closing")
            .help_heading("MORPHOLOGY")
            .value_name("SIZE")
            .value_parser(value_parser!(usize)))
}

#[rustfmt::skip]
fn analysis_commands() -> Vec<Command> {
    vec![
        Command::new("features")
            .about("Print image descriptors as JSON")
            .arg(input())
            .arg(Arg::new("color-bins")
                .long("color-bins")
                .value_parser(value_parser!(usize))
                .default_value("16"))
            .arg(Arg::new("edge-bins")
                .long("edge-bins")
                .value_parser(value_parser!(usize))
                .default_value("8"))
            .arg(Arg::new("max-keypoints")
                .long("max-keypoints")
                .value_parser(value_parser!(usize))
                .default_value("100"))
            .arg(Arg::new("no-keypoints")
                .long("no-keypoints")
                .action(ArgAction::SetTrue)
                .help("Skip keypoint detection, which is the slowest descriptor")),
        Command::new("compare")
            .about("Compare two images and print a JSON report")
            .arg(Arg::new("first").required(true))
            .arg(Arg::new("second").required(true))
            .arg(Arg::new("metric")
                .long("metric")
                .value_parser(value_parser!(IHistogramMetric))
                .help("Also compare color histograms with this metric"))
            .arg(Arg::new("bins")
                .long("bins")
                .value_parser(value_parser!(usize))
                .default_value("32")),
        Command::new("hash")
            .about("Compute perceptual hashes")
            .long_about(HASH_HELP)
            .arg(Arg::new("in")
                .required(true)
                .num_args(1..))
            .arg(Arg::new("kind")
                .long("kind")
                .value_parser(value_parser!(IHashKind))
                .default_value("phash"))
            .arg(Arg::new("size")
                .long("size")
                .value_parser(value_parser!(usize))
                .default_value("8")),
        Command::new("detect")
            .about("Detect regions and objects")
            .subcommand_required(true)
            .subcommand(Command::new("blobs")
                .about("Connected regions of a mask")
                .arg(input())
                .arg(min_area())
                .arg(Arg::new("segment")
                    .long("segment")
                    .num_args(3)
                    .value_names(["R", "G", "B"])
                    .value_parser(value_parser!(u8))
                    .help("Build the mask from pixels close to this color first"))
                .arg(Arg::new("tolerance")
                    .long("tolerance")
                    .value_parser(value_parser!(f64))
                    .default_value("40")))
            .subcommand(Command::new("contours")
                .about("Boundaries of the connected regions of a mask")
                .arg(input())
                .arg(min_area()))
            .subcommand(Command::new("template")
                .about("Find a template inside an image")
                .long_about(TEMPLATE_HELP)
                .arg(input())
                .arg(Arg::new("template")
                    .short('t')
                    .long("template")
                    .required(true))
                .arg(Arg::new("threshold")
                    .long("threshold")
                    .value_parser(value_parser!(f64))
                    .default_value("0.8"))
                .arg(Arg::new("iou")
                    .long("iou")
                    .value_parser(value_parser!(f64))
                    .default_value("0.5"))),
    ]
}

fn canvas(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(output())
        .arg(quality())
        .arg(
            Arg::new("width")
                .long("width")
                .value_parser(value_parser!(usize))
                .default_value("256")
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_parser(value_parser!(usize))
                .default_value("256")
        )
}

fn seeded(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("seed")
            .long("seed")
            .value_parser(value_parser!(u64))
            .default_value("0")
            .long_help(SEED_HELP)
    )
}

#[rustfmt::skip]
fn fractal(cmd: Command, center: [&'static str; 2]) -> Command {
    cmd.arg(Arg::new("center")
            .long("center")
            .num_args(2)
            .value_names(["RE", "IM"])
            .allow_negative_numbers(true)
            .value_parser(value_parser!(f64))
            .default_values(center))
        .arg(Arg::new("zoom")
            .long("zoom")
            .value_parser(value_parser!(f64))
            .default_value("1"))
        .arg(Arg::new("iterations")
            .long("iterations")
            .value_parser(value_parser!(usize))
            .default_value("100"))
}

#[rustfmt::skip]
fn noise(cmd: Command) -> Command {
    seeded(cmd)
        .arg(Arg::new("scale")
            .long("scale")
            .value_parser(value_parser!(f64))
            .default_value("0.05"))
        .arg(Arg::new("octaves")
            .long("octaves")
            .value_parser(value_parser!(usize))
            .default_value("4"))
        .arg(Arg::new("persistence")
            .long("persistence")
            .value_parser(value_parser!(f64))
            .default_value("0.5"))
}

#[rustfmt::skip]
fn generate_command() -> Command {
    Command::new("generate")
        .about("Create images procedurally")
        .subcommand_required(true)
        .subcommand(seeded(canvas("noise", "Uniform white noise"))
            .arg(Arg::new("color")
                .long("color")
                .action(ArgAction::SetTrue)
                .help("Random value per channel instead of per pixel")))
        .subcommand(noise(canvas("perlin", "Fractal Perlin noise")))
        .subcommand(noise(canvas("simplex", "Fractal simplex noise")))
        .subcommand(canvas("gradient", "Linear gradient")
            .arg(Arg::new("angle")
                .long("angle")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .default_value("0"))
            .arg(color("from", ["0", "0", "0"]))
            .arg(color("to", ["255", "255", "255"])))
        .subcommand(canvas("radial", "Radial gradient from the middle")
            .arg(color("from", ["255", "255", "255"]))
            .arg(color("to", ["0", "0", "0"])))
        .subcommand(canvas("checkerboard", "Alternating square cells")
            .arg(Arg::new("cell")
                .long("cell")
                .value_parser(value_parser!(usize))
                .default_value("32"))
            .arg(color("from", ["255", "255", "255"]))
            .arg(color("to", ["0", "0", "0"])))
        .subcommand(canvas("sine", "Interference of two sine waves")
            .arg(Arg::new("fx")
                .long("fx")
                .value_parser(value_parser!(f64))
                .default_value("0.1"))
            .arg(Arg::new("fy")
                .long("fy")
                .value_parser(value_parser!(f64))
                .default_value("0.1")))
        .subcommand(fractal(canvas("mandelbrot", "The Mandelbrot set"), ["-0.5", "0"]))
        .subcommand(fractal(canvas("julia", "A Julia set"), ["0", "0"])
            .arg(Arg::new("constant")
                .long("constant")
                .num_args(2)
                .value_names(["RE", "IM"])
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .default_values(["-0.7", "0.27015"])))
        .subcommand(seeded(canvas("voronoi", "Voronoi cells with random colors"))
            .arg(Arg::new("points")
                .long("points")
                .value_parser(value_parser!(usize))
                .default_value("16")))
}

#[rustfmt::skip]
fn blend_command() -> Command {
    Command::new("blend")
        .about("Blend two images")
        .arg(Arg::new("base")
            .long("base")
            .required(true))
        .arg(Arg::new("top")
            .long("top")
            .required(true))
        .arg(output())
        .arg(quality())
        .arg(Arg::new("mode")
            .long("mode")
            .value_parser(value_parser!(IBlendMode))
            .default_value("normal"))
        .arg(Arg::new("opacity")
            .long("opacity")
            .value_parser(value_parser!(f32))
            .default_value("1"))
}

pub fn create_cmd_args() -> Command {
    let cmd = Command::new("zune-cv")
        .about("Computer vision toolkit")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(filter_command())
        .subcommands(analysis_commands())
        .subcommand(generate_command())
        .subcommand(blend_command());

    logging(cmd)
}
