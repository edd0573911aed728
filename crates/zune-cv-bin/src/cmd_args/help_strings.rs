/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

pub static FILTER_HELP: &str = "Apply pixel operations to an image

Operations run in the order they appear on the command line, e.g.

    zune-cv filter -i in.png -o out.png --grayscale --blur 1.5 --canny 50 150

blurs a grayscale copy before detecting edges";

pub static CONVOLVE_HELP: &str = "Convolve with a custom square kernel

Takes n*n weights in row major order, n must be odd.
E.g --convolve 0 -1 0 -1 5 -1 0 -1 0 sharpens the image";

pub static HASH_HELP: &str = "Compute perceptual hashes

With exactly two inputs the Hamming distance and similarity
of their hashes are reported as well";

pub static TEMPLATE_HELP: &str = "Find a template inside an image

Every placement is scored by normalized cross correlation,
placements above the threshold are reduced with non maximum suppression";

pub static SEED_HELP: &str = "Seed for the random generator

The same seed always produces the same image";
