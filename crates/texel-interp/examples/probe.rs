//! Example: probe one texture coordinate with every filter.
//!
//! Loads a PNG as RGBA8 and samples it at `(u, v)` (texel units) with each
//! point filter under the chosen wrap modes, then runs the EWA filter with a
//! circular footprint of `--radius` texels around the same point.
//!
//! Results are printed to stdout and written as JSON next to the input.
//!
//! Run from the workspace root:
//!   cargo run -p texel-interp --example probe -- --help
//!   cargo run -p texel-interp --example probe -- --input data/grid.png --u 10.5 --v 3.25

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use image::ImageReader;
use serde::Serialize;
use texel_interp::{
    EwaOptions, Filter, Image, Vec2f, ViewReader, WrapMode, ewa_filter, sample,
};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Sample a PNG at one coordinate with every texel filter")]
struct Args {
    /// Path to the PNG to probe
    #[arg(long, default_value = "data/probe.png")]
    input: String,

    /// Horizontal coordinate in texels
    #[arg(long, allow_negative_numbers = true)]
    u: f32,

    /// Vertical coordinate in texels
    #[arg(long, allow_negative_numbers = true)]
    v: f32,

    /// Wrap mode on the u axis: extend, repeat or border
    #[arg(long, default_value = "extend")]
    wrap_u: WrapMode,

    /// Wrap mode on the v axis: extend, repeat or border
    #[arg(long, default_value = "extend")]
    wrap_v: WrapMode,

    /// EWA footprint radius in texels
    #[arg(long, default_value_t = 4.0)]
    radius: f32,

    /// Output JSON path (default: <input stem>_probe.json next to input)
    #[arg(long)]
    out: Option<String>,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct FilterProbe {
    filter: &'static str,
    rgba: [u8; 4],
}

#[derive(Serialize)]
struct ProbeReport {
    input: String,
    width: usize,
    height: usize,
    u: f32,
    v: f32,
    wrap_u: &'static str,
    wrap_v: &'static str,
    filters: Vec<FilterProbe>,
    ewa_radius: f32,
    ewa_rgba: [f32; 4],
    /// Wall-clock time for all probes, in microseconds.
    elapsed_us: f64,
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let img_path = &args.input;
    let out_path = args.out.clone().unwrap_or_else(|| {
        let p = Path::new(img_path);
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        let dir = p.parent().unwrap_or(Path::new("."));
        dir.join(format!("{stem}_probe.json"))
            .to_string_lossy()
            .into_owned()
    });

    let rgba = ImageReader::open(img_path)
        .with_context(|| format!("opening {img_path}"))?
        .decode()
        .with_context(|| format!("decoding {img_path}"))?
        .into_rgba8();
    let (width, height) = (rgba.width() as usize, rgba.height() as usize);
    let img = Image::from_vec(width, height, 4, rgba.into_raw())
        .context("building RGBA image")?;
    let view = img.as_view();

    println!("loaded {img_path}: {width}x{height}");

    let t0 = Instant::now();

    let filters = Filter::ALL
        .into_iter()
        .map(|filter| {
            let mut out = [0u8; 4];
            sample(&view, filter, args.u, args.v, args.wrap_u, args.wrap_v, &mut out);
            FilterProbe {
                filter: filter.name(),
                rgba: out,
            }
        })
        .collect::<Vec<_>>();

    let reader = ViewReader::new(view, args.wrap_u, args.wrap_v);
    let uv = Vec2f::new(args.u / width as f32, args.v / height as f32);
    let du = Vec2f::new(args.radius / width as f32, 0.0);
    let dv = Vec2f::new(0.0, args.radius / height as f32);
    let ewa_rgba = ewa_filter(width, height, &EwaOptions::default(), uv, du, dv, &reader);

    let elapsed_us = t0.elapsed().as_secs_f64() * 1e6;

    for p in &filters {
        println!("  {:>14}: {:?}", p.filter, p.rgba);
    }
    println!("  {:>14}: {:?}", format!("ewa r={}", args.radius), ewa_rgba);
    println!("probe time: {elapsed_us:.1} us");

    let report = ProbeReport {
        input: img_path.clone(),
        width,
        height,
        u: args.u,
        v: args.v,
        wrap_u: args.wrap_u.name(),
        wrap_v: args.wrap_v.name(),
        filters,
        ewa_radius: args.radius,
        ewa_rgba,
        elapsed_us,
    };

    let out_file =
        std::fs::File::create(&out_path).with_context(|| format!("creating {out_path}"))?;
    serde_json::to_writer_pretty(out_file, &report)
        .with_context(|| format!("writing JSON to {out_path}"))?;

    println!("results written to {out_path}");
    Ok(())
}
