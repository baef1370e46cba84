// Copyright 2025. Headless replay CLI for raster-sketch.
//
// Usage:
//   sketch-replay replay <script> [-c <config.json>] [-o <output.bmp>] [-v]
//   sketch-replay compare <file_a> <file_b> [-d <diff.bmp>]
//   sketch-replay config
//   sketch-replay list

use anyhow::{bail, Context, Result};
use raster_sketch::config::SketchConfig;
use raster_sketch::point_accumulator::ShapeKind;
use raster_sketch::sketch::Sketch;
use sketch_replay::script::{parse_script, replay};
use sketch_replay::{compare_buffers, generate_diff_image, load_bmp, logging, save_bmp, save_canvas};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    logging::init(verbose);

    let rest: Vec<String> = args[2..]
        .iter()
        .filter(|a| *a != "-v" && *a != "--verbose")
        .cloned()
        .collect();

    match args[1].as_str() {
        "replay" => cmd_replay(&rest),
        "compare" => cmd_compare(&rest),
        "config" => cmd_config(),
        "list" => {
            cmd_list();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("sketch-replay - headless event replay for raster-sketch");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  replay <script> [-c <config.json>] [-o <output.bmp>]");
    eprintln!("      Replay a click script and save the canvas as BMP.");
    eprintln!();
    eprintln!("  compare <file_a> <file_b> [-d <diff.bmp>]");
    eprintln!("      Compare two BMP files pixel by pixel. Exits 1 when they differ.");
    eprintln!();
    eprintln!("  config");
    eprintln!("      Print the default configuration as JSON.");
    eprintln!();
    eprintln!("  list");
    eprintln!("      List shape kinds accepted by 'shape <kind>'.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v, --verbose   debug logging (RUST_LOG overrides)");
}

/// Split `args` into positionals and `-x value` options.
fn parse_options<'a>(args: &'a [String], known: &[&str]) -> Result<(Vec<&'a str>, Vec<(&'a str, &'a str)>)> {
    let mut positional = Vec::new();
    let mut options = Vec::new();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if known.contains(&arg) {
            let Some(value) = args.get(i + 1) else {
                bail!("option {} needs a value", arg);
            };
            options.push((arg, value.as_str()));
            i += 2;
        } else if arg.starts_with('-') && arg.len() > 1 {
            bail!("unknown option: {}", arg);
        } else {
            positional.push(arg);
            i += 1;
        }
    }
    Ok((positional, options))
}

fn cmd_list() {
    println!("Shape kinds:");
    for kind in ShapeKind::ALL {
        println!("  {}", kind);
    }
}

fn cmd_config() -> Result<()> {
    println!("{}", SketchConfig::default().to_json_pretty()?);
    Ok(())
}

fn cmd_replay(args: &[String]) -> Result<()> {
    let (positional, options) = parse_options(args, &["-c", "-o"])?;
    let [script_path] = positional[..] else {
        bail!("usage: sketch-replay replay <script> [-c <config.json>] [-o <output.bmp>]");
    };

    let mut config_path = None;
    let mut output = None;
    for (flag, value) in options {
        match flag {
            "-c" => config_path = Some(PathBuf::from(value)),
            _ => output = Some(PathBuf::from(value)),
        }
    }

    let config = match &config_path {
        Some(path) => SketchConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SketchConfig::default(),
    };

    let text = std::fs::read_to_string(script_path)
        .with_context(|| format!("failed to read script {}", script_path))?;
    let events = parse_script(&text).with_context(|| format!("in script {}", script_path))?;

    let mut sketch = Sketch::new(config)?;
    let summary = replay(&mut sketch, &events);

    let output = output.unwrap_or_else(|| Path::new(script_path).with_extension("bmp"));
    save_canvas(&output, sketch.canvas())?;

    info!(
        written = summary.pixels_written,
        clipped = summary.pixels_clipped,
        discarded = summary.points_discarded,
        "canvas saved"
    );
    println!(
        "{} clicks, {} shapes drawn -> {}",
        summary.clicks,
        summary.shapes_drawn,
        output.display()
    );
    Ok(())
}

fn cmd_compare(args: &[String]) -> Result<()> {
    let (positional, options) = parse_options(args, &["-d"])?;
    let [path_a, path_b] = positional[..] else {
        bail!("usage: sketch-replay compare <file_a> <file_b> [-d <diff.bmp>]");
    };

    let a = load_bmp(Path::new(path_a)).with_context(|| format!("failed to load {}", path_a))?;
    let b = load_bmp(Path::new(path_b)).with_context(|| format!("failed to load {}", path_b))?;

    let result = compare_buffers(&a, &b)?;
    println!("{}", result);

    if let Some(&(_, diff_path)) = options.first() {
        let diff = generate_diff_image(&a, &b)?;
        save_bmp(Path::new(diff_path), &diff)
            .with_context(|| format!("failed to write {}", diff_path))?;
        println!("Diff saved: {}", diff_path);
    }

    if !result.identical {
        process::exit(1);
    }
    Ok(())
}
