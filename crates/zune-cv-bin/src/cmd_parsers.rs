/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::any::Any;

use clap::parser::ValueSource;
use clap::ArgMatches;
use zune_raster::buffer::Rgba;

use crate::errors::CliErrors;

pub mod filters;
pub mod global_options;

/// Ids of arguments passed on the command line, in the order they appeared
pub fn fill_args(options: &ArgMatches) -> Vec<String> {
    let mut map: Vec<(usize, String)> = Vec::with_capacity(20);

    for id in options.ids() {
        if options.value_source(id.as_str()) != Some(ValueSource::CommandLine) {
            // ignore defaults and globals not given here
            continue;
        }
        let Some(position) = options.index_of(id.as_str()) else {
            continue;
        };
        map.push((position, id.to_string()));
    }
    map.sort_by_key(|(position, _)| *position);
    map.into_iter().map(|(_, id)| id).collect()
}

/// Fetch an argument that always has a value, either given or defaulted
pub fn get<T: Any + Clone + Send + Sync + 'static>(
    options: &ArgMatches, id: &str
) -> Result<T, CliErrors> {
    options
        .get_one::<T>(id)
        .cloned()
        .ok_or_else(|| CliErrors::Arguments(format!("Missing value for {id}")))
}

/// Fetch all values of a multi value argument
pub fn get_many<T: Any + Clone + Send + Sync + 'static>(
    options: &ArgMatches, id: &str
) -> Result<Vec<T>, CliErrors> {
    options
        .get_many::<T>(id)
        .map(|values| values.cloned().collect())
        .ok_or_else(|| CliErrors::Arguments(format!("Missing values for {id}")))
}

/// Read a three value `R G B` argument
pub fn get_color(options: &ArgMatches, id: &str) -> Result<Rgba, CliErrors> {
    match get_many::<u8>(options, id)?.as_slice() {
        [r, g, b] => Ok(Rgba::rgb(*r, *g, *b)),
        _ => Err(CliErrors::Arguments(format!("{id} needs three values")))
    }
}

#[cfg(test)]
mod tests {
    use clap::{value_parser, Arg, ArgMatches, Command};
    use zune_raster::buffer::Rgba;

    use crate::cmd_parsers::{fill_args, get_color};
    use crate::errors::CliErrors;

    fn matches(args: &[&str]) -> ArgMatches {
        Command::new("zune-cv")
            .arg(Arg::new("fill").long("fill").num_args(1..).value_parser(value_parser!(u8)))
            .arg(Arg::new("radius").long("radius").value_parser(value_parser!(f32)))
            .arg(Arg::new("size").long("size").default_value("3"))
            .try_get_matches_from(args)
            .unwrap()
    }

    #[test]
    fn test_color_from_three_values() {
        let args = matches(&["zune-cv", "--fill", "12", "200", "7"]);

        assert_eq!(get_color(&args, "fill").unwrap(), Rgba::rgb(12, 200, 7));
    }

    #[test]
    fn test_color_needs_three_values() {
        let args = matches(&["zune-cv", "--fill", "12", "200"]);

        assert!(matches!(
            get_color(&args, "fill"),
            Err(CliErrors::Arguments(_))
        ));
        assert!(get_color(&matches(&["zune-cv"]), "fill").is_err());
    }

    #[test]
    fn test_args_keep_command_line_order() {
        let args = matches(&["zune-cv", "--radius", "1.5", "--fill", "1", "2", "3"]);

        // defaulted values are not part of the order
        assert_eq!(fill_args(&args), vec!["radius", "fill"]);
    }
}
