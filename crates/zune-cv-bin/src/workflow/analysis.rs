/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::info;
use serde_json::json;
use zune_raster::buffer::RasterBuffer;
use zune_raster::codecs::decode;
use zune_vision::compare::{
    average_hash, compare_histograms, compare_images, difference_hash, perceptual_hash,
    PerceptualHash
};
use zune_vision::detect::{
    detect_blobs, find_contours, segment_by_color, template_match, TemplateMatchOptions
};
use zune_vision::features::{
    color_histogram, extract_features, feature_vector, FeatureOptions, KeypointOptions
};

use crate::cmd_args::arg_parsers::{IHashKind, IHistogramMetric};
use crate::cmd_parsers::{get, get_color, get_many};
use crate::errors::CliErrors;
use crate::workflow::{print_json, read_image};

pub(crate) fn features(args: &ArgMatches) -> Result<(), CliErrors> {
    let image = read_image(args, "in")?;

    let keypoints = if get::<bool>(args, "no-keypoints")? {
        None
    } else {
        Some(KeypointOptions::default().set_max_keypoints(get::<usize>(args, "max-keypoints")?))
    };
    let options = FeatureOptions::default()
        .set_color_bins(get::<usize>(args, "color-bins")?)
        .set_edge_bins(get::<usize>(args, "edge-bins")?)
        .set_keypoints(keypoints);

    let features = extract_features(&image, &options)?;
    let vector = feature_vector(&features);

    print_json(&json!({
        "features": features,
        "vector": vector
    }))
}

pub(crate) fn compare(args: &ArgMatches) -> Result<(), CliErrors> {
    let first = read_image(args, "first")?;
    let second = read_image(args, "second")?;

    let report = compare_images(&first, &second)?;

    match args.get_one::<IHistogramMetric>("metric") {
        Some(metric) => {
            let bins = get::<usize>(args, "bins")?;
            let distance = compare_histograms(
                &color_histogram(&first, bins)?,
                &color_histogram(&second, bins)?,
                metric.to_metric()
            )?;
            info!("Histogram distance with {:?}: {}", metric, distance);

            print_json(&json!({
                "report": report,
                "histogram": { "metric": format!("{metric:?}"), "bins": bins, "value": distance }
            }))
        }
        None => print_json(&report)
    }
}

fn hash_image(
    image: &RasterBuffer, kind: IHashKind, size: usize
) -> Result<PerceptualHash, CliErrors> {
    let hash = match kind {
        IHashKind::Average => average_hash(image, size)?,
        IHashKind::Difference => difference_hash(image, size)?,
        IHashKind::Perceptual => perceptual_hash(image, size)?
    };
    Ok(hash)
}

pub(crate) fn hash(args: &ArgMatches) -> Result<(), CliErrors> {
    let files = get_many::<String>(args, "in")?;
    let kind = get::<IHashKind>(args, "kind")?;
    let size = get::<usize>(args, "size")?;

    let mut hashes = Vec::with_capacity(files.len());

    for file in &files {
        let image = decode(file)?;
        hashes.push(hash_image(&image, kind, size)?);
    }

    let entries: Vec<_> = files
        .iter()
        .zip(&hashes)
        .map(|(file, hash)| json!({ "file": file, "hash": hash }))
        .collect();

    if let [a, b] = hashes.as_slice() {
        print_json(&json!({
            "hashes": entries,
            "distance": a.hamming_distance(b)?,
            "similarity": a.similarity(b)?
        }))
    } else {
        print_json(&json!({ "hashes": entries }))
    }
}

pub(crate) fn detect(args: &ArgMatches) -> Result<(), CliErrors> {
    match args.subcommand() {
        Some(("blobs", sub)) => {
            let mut mask = read_image(sub, "in")?;

            if sub.get_many::<u8>("segment").is_some() {
                let target = get_color(sub, "segment")?;
                let tolerance = get::<f64>(sub, "tolerance")?;

                info!("Segmenting around {:?} with tolerance {}", target, tolerance);
                mask = segment_by_color(&mask, target, tolerance);
            }
            let blobs = detect_blobs(&mask, get::<usize>(sub, "min-area")?);
            print_json(&blobs)
        }
        Some(("contours", sub)) => {
            let mask = read_image(sub, "in")?;
            let contours = find_contours(&mask, get::<usize>(sub, "min-area")?);
            print_json(&contours)
        }
        Some(("template", sub)) => {
            let source = read_image(sub, "in")?;
            let template = read_image(sub, "template")?;

            let options = TemplateMatchOptions::default()
                .set_threshold(get::<f64>(sub, "threshold")?)
                .set_iou_threshold(get::<f64>(sub, "iou")?);

            let matches = template_match(&source, &template, &options)?;
            print_json(&matches)
        }
        _ => Err(CliErrors::Arguments("Unknown detect command".to_string()))
    }
}
