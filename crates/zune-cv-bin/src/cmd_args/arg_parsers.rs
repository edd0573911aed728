/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::builder::PossibleValue;
use clap::ValueEnum;
use zune_vision::compare::HistogramMetric;
use zune_vision::generate::BlendMode;

#[derive(Copy, Clone, Debug)]
pub enum IBlendMode {
    Normal,
    Multiply,
    Screen,
    Overlay,
    Add,
    Subtract,
    Difference
}

impl IBlendMode {
    pub const fn to_blend_mode(self) -> BlendMode {
        match self {
            IBlendMode::Normal => BlendMode::Normal,
            IBlendMode::Multiply => BlendMode::Multiply,
            IBlendMode::Screen => BlendMode::Screen,
            IBlendMode::Overlay => BlendMode::Overlay,
            IBlendMode::Add => BlendMode::Add,
            IBlendMode::Subtract => BlendMode::Subtract,
            IBlendMode::Difference => BlendMode::Difference
        }
    }
}

impl ValueEnum for IBlendMode {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::Normal,
            Self::Multiply,
            Self::Screen,
            Self::Overlay,
            Self::Add,
            Self::Subtract,
            Self::Difference
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Normal => PossibleValue::new("normal"),
            Self::Multiply => PossibleValue::new("multiply"),
            Self::Screen => PossibleValue::new("screen"),
            Self::Overlay => PossibleValue::new("overlay"),
            Self::Add => PossibleValue::new("add"),
            Self::Subtract => PossibleValue::new("subtract"),
            Self::Difference => PossibleValue::new("difference")
        })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IHashKind {
    Average,
    Difference,
    Perceptual
}

impl ValueEnum for IHashKind {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Average, Self::Difference, Self::Perceptual]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Average => PossibleValue::new("ahash"),
            Self::Difference => PossibleValue::new("dhash"),
            Self::Perceptual => PossibleValue::new("phash")
        })
    }
}

#[derive(Copy, Clone, Debug)]
pub enum IHistogramMetric {
    Correlation,
    ChiSquare,
    Intersection,
    Bhattacharyya
}

impl IHistogramMetric {
    pub const fn to_metric(self) -> HistogramMetric {
        match self {
            IHistogramMetric::Correlation => HistogramMetric::Correlation,
            IHistogramMetric::ChiSquare => HistogramMetric::ChiSquare,
            IHistogramMetric::Intersection => HistogramMetric::Intersection,
            IHistogramMetric::Bhattacharyya => HistogramMetric::Bhattacharyya
        }
    }
}

impl ValueEnum for IHistogramMetric {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::Correlation,
            Self::ChiSquare,
            Self::Intersection,
            Self::Bhattacharyya
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Correlation => PossibleValue::new("correlation"),
            Self::ChiSquare => PossibleValue::new("chi-square"),
            Self::Intersection => PossibleValue::new("intersection"),
            Self::Bhattacharyya => PossibleValue::new("bhattacharyya")
        })
    }
}
