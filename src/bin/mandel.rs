// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use log::{error, info};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use tilebrot::{CameraState, FrameBuffer, Grid, RenderConfig, Smoothing, TileScheduler};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const ITERATIONS: &str = "iterations";
const ORBIT_LIMIT: &str = "orbit-limit";
const GRID: &str = "grid";
const ZOOM: &str = "zoom";
const OFFSET: &str = "offset";
const BANDED: &str = "banded";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .about("Tiled Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (binary PPM)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1024")
                .validator(|s| {
                    validate_range::<usize>(
                        &s,
                        1,
                        16_384,
                        "Could not parse image size",
                        "Image size must be between 1 and 16384",
                    )
                })
                .help("Side of the square output image, in pixels"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("20")
                .validator(|s| {
                    validate_range::<u32>(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Maximum iterations per point"),
        )
        .arg(
            Arg::with_name(ORBIT_LIMIT)
                .required(false)
                .long(ORBIT_LIMIT)
                .short("l")
                .takes_value(true)
                .default_value("10")
                .validator(|s| {
                    validate_range::<f64>(
                        &s,
                        std::f64::MIN_POSITIVE,
                        std::f64::MAX,
                        "Could not parse orbit limit",
                        "Orbit limit must be positive",
                    )
                })
                .help("Squared orbit magnitude at which a point has escaped"),
        )
        .arg(
            Arg::with_name(GRID)
                .required(false)
                .long(GRID)
                .short("g")
                .takes_value(true)
                .default_value("4x4")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse grid"))
                .help("Tiles across and down; the image size must divide evenly"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .validator(|s| {
                    validate_range::<f64>(
                        &s,
                        std::f64::MIN_POSITIVE,
                        std::f64::MAX,
                        "Could not parse zoom scale",
                        "Zoom scale must be positive",
                    )
                })
                .help("Plane scale; defaults to the image size, smaller zooms in"),
        )
        .arg(
            Arg::with_name(OFFSET)
                .required(false)
                .long(OFFSET)
                .takes_value(true)
                .default_value("0,0")
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse offset"))
                .help("Pan offset, in scaled pixels"),
        )
        .arg(
            Arg::with_name(BANDED)
                .long(BANDED)
                .short("b")
                .help("Colour by raw iteration count instead of smoothed count"),
        )
        .get_matches()
}

fn write_image(outfile: &str, frame: &FrameBuffer) -> Result<(), std::io::Error> {
    let path = Path::new(outfile);
    let output = File::create(&path)?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
    encoder.encode(
        &frame.to_rgb_bytes()[..],
        frame.width() as u32,
        frame.height() as u32,
        ColorType::RGB(8),
    )?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = args();
    let size =
        usize::from_str(matches.value_of(SIZE).unwrap()).expect("Could not parse image size.");
    let iterations = u32::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration count.");
    let orbit_limit = f64::from_str(matches.value_of(ORBIT_LIMIT).unwrap())
        .expect("Could not parse orbit limit.");
    let grid = parse_pair::<usize>(matches.value_of(GRID).unwrap(), 'x')
        .expect("Error parsing grid");
    let offset = parse_pair::<f64>(matches.value_of(OFFSET).unwrap(), ',')
        .expect("Error parsing offset");

    let mut camera = CameraState::framed(size as f64);
    if let Some(zoom) = matches.value_of(ZOOM) {
        camera.plane_scale = f64::from_str(zoom).expect("Could not parse zoom scale.");
    }
    camera.offset_x = offset.0;
    camera.offset_y = offset.1;

    let smoothing = if matches.is_present(BANDED) {
        Smoothing::Banded
    } else {
        Smoothing::Continuous
    };
    let config = RenderConfig::new(iterations, orbit_limit).with_smoothing(smoothing);
    let scheduler = TileScheduler::new(Grid::new(grid.0, grid.1));

    match scheduler.render(size, size, &camera, &config) {
        Err(e) => {
            error!("Render failure: {}", e);
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(frame) => {
            let outfile = matches.value_of(OUTPUT).unwrap();
            if let Err(e) = write_image(outfile, &frame) {
                eprintln!("Could not write {}: {}", outfile, e);
                std::process::exit(2);
            }
            info!("wrote {}x{} frame to {}", size, size, outfile);
        }
    }
}
