use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::RgbaImage;
use log::info;
use serde::{Deserialize, Serialize};
use texel_interp::{
    EwaOptions, Filter, Image, Texel, Vec2f, ViewReader, WrapMode, bilinear_repeat4, ewa_filter,
    init_ewa_weights, sample,
};

#[derive(Parser, Debug)]
#[command(name = "ti_gallery")]
#[command(about = "Run texel-interp filters on external fixtures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(name = "resample")]
    Resample(ResampleArgs),
    #[command(name = "ewa")]
    Ewa(EwaArgs),
    #[command(name = "probe")]
    Probe(ProbeArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "docs/fig/raw")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct ResampleArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 2.0)]
    scale: f32,
    #[arg(long, default_value = "bilinear")]
    filter: Filter,
    #[arg(long, default_value = "extend")]
    wrap_u: WrapMode,
    #[arg(long, default_value = "extend")]
    wrap_v: WrapMode,
}

#[derive(Args, Debug, Clone)]
struct EwaArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Output size relative to the input; below 1 minifies.
    #[arg(long, default_value_t = 0.25)]
    scale: f32,
    /// Rotation of the sampling grid, degrees.
    #[arg(long, default_value_t = 30.0)]
    angle: f32,
    /// Squeeze of the grid along v relative to u; above 1 makes footprints
    /// anisotropic.
    #[arg(long, default_value_t = 1.0)]
    squeeze: f32,
    #[arg(long, default_value_t = texel_interp::EWA_MAX_ECCENTRICITY)]
    max_eccentricity: f32,
}

#[derive(Args, Debug, Clone)]
struct ProbeArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, required = true)]
    job: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
struct MetaResample {
    filter: &'static str,
    wrap_u: &'static str,
    wrap_v: &'static str,
    scale: f32,
    input_size: [usize; 2],
    output_size: [usize; 2],
    texel_center_offset: f32,
    elapsed_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
struct MetaEwa {
    scale: f32,
    angle_deg: f32,
    squeeze: f32,
    options: EwaOptions,
    input_size: [usize; 2],
    output_size: [usize; 2],
    /// Footprint semi-axes in input texels, before clamping.
    footprint_texels: [f32; 2],
    ewa_elapsed_ms: f64,
    bilinear_elapsed_ms: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct ProbeJob {
    #[serde(default)]
    points: Vec<PointProbe>,
    #[serde(default)]
    ewa: Vec<EwaProbe>,
}

#[derive(Debug, Clone, Deserialize)]
struct PointProbe {
    u: f32,
    v: f32,
    #[serde(default)]
    filter: Filter,
    #[serde(default)]
    wrap_u: WrapMode,
    #[serde(default)]
    wrap_v: WrapMode,
}

#[derive(Debug, Clone, Deserialize)]
struct EwaProbe {
    uv: Vec2f,
    du: Vec2f,
    dv: Vec2f,
    #[serde(default)]
    wrap_u: WrapMode,
    #[serde(default)]
    wrap_v: WrapMode,
    #[serde(default)]
    options: EwaOptions,
}

#[derive(Debug, Clone, Serialize)]
struct PointResult {
    u: f32,
    v: f32,
    filter: &'static str,
    wrap_u: &'static str,
    wrap_v: &'static str,
    rgba: [u8; 4],
}

#[derive(Debug, Clone, Serialize)]
struct EwaResult {
    uv: Vec2f,
    du: Vec2f,
    dv: Vec2f,
    rgba: [f32; 4],
}

#[derive(Debug, Clone, Serialize)]
struct ProbeResults {
    input_size: [usize; 2],
    points: Vec<PointResult>,
    ewa: Vec<EwaResult>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Resample(args) => run_resample(args),
        Command::Ewa(args) => run_ewa(args),
        Command::Probe(args) => run_probe(args),
    }
}

fn run_resample(args: ResampleArgs) -> Result<()> {
    if !(args.scale.is_finite() && args.scale > 0.0) {
        bail!("scale must be positive and finite, got {}.", args.scale);
    }

    let case_dir = prepare_case(&args.common, "resample")?;
    let img = load_input_rgba(&args.common.input)?;
    let view = img.as_view();

    let out_w = scaled_len(img.width(), args.scale)?;
    let out_h = scaled_len(img.height(), args.scale)?;
    // Nearest addresses the texel containing the coordinate; the blending
    // filters treat integer coordinates as texel centers.
    let offset = match args.filter {
        Filter::Nearest => 0.0,
        _ => 0.5,
    };
    info!(
        "resampling {}x{} -> {out_w}x{out_h} with {}",
        img.width(),
        img.height(),
        args.filter.name()
    );

    let t0 = Instant::now();
    let mut out = vec![0u8; out_w * out_h * 4];
    for (i, px) in out.chunks_exact_mut(4).enumerate() {
        let (x, y) = (i % out_w, i / out_w);
        let u = (x as f32 + 0.5) / args.scale - offset;
        let v = (y as f32 + 0.5) / args.scale - offset;
        sample(&view, args.filter, u, v, args.wrap_u, args.wrap_v, px);
    }
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;
    info!("resample done in {elapsed_ms:.2} ms");

    save_rgba_raw(case_dir.join("resampled.png"), out_w, out_h, out)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaResample {
            filter: args.filter.name(),
            wrap_u: args.wrap_u.name(),
            wrap_v: args.wrap_v.name(),
            scale: args.scale,
            input_size: [img.width(), img.height()],
            output_size: [out_w, out_h],
            texel_center_offset: offset,
            elapsed_ms,
        },
    )?;

    Ok(())
}

fn run_ewa(args: EwaArgs) -> Result<()> {
    if !(args.scale.is_finite() && args.scale > 0.0) {
        bail!("scale must be positive and finite, got {}.", args.scale);
    }
    if !(args.squeeze.is_finite() && args.squeeze > 0.0) {
        bail!("squeeze must be positive and finite, got {}.", args.squeeze);
    }
    if args.max_eccentricity.is_nan() || args.max_eccentricity < 1.0 {
        bail!(
            "max_eccentricity must be at least 1, got {}.",
            args.max_eccentricity
        );
    }

    let case_dir = prepare_case(&args.common, "ewa")?;
    let img = load_input_rgba(&args.common.input)?;
    let (w, h) = (img.width(), img.height());
    let out_w = scaled_len(w, args.scale)?;
    let out_h = scaled_len(h, args.scale)?;

    // Output pixel steps map to these input-texel steps.
    let (sin, cos) = args.angle.to_radians().sin_cos();
    let step_x = Vec2f::new(cos, sin) * (1.0 / args.scale);
    let step_y = Vec2f::new(-sin, cos) * (args.squeeze / args.scale);
    let origin = Vec2f::new(w as f32 * 0.5, h as f32 * 0.5)
        + step_x * (-(out_w as f32) * 0.5)
        + step_y * (-(out_h as f32) * 0.5);
    let warp = |x: usize, y: usize| origin + step_x * (x as f32 + 0.5) + step_y * (y as f32 + 0.5);

    let opts = EwaOptions {
        interpolate: false,
        max_eccentricity: args.max_eccentricity,
        ..EwaOptions::default()
    };
    let reader = ViewReader::new(img.as_view(), WrapMode::Repeat, WrapMode::Repeat);
    let norm = |p: Vec2f| Vec2f::new(p.x / w as f32, p.y / h as f32);
    let du = norm(step_x);
    let dv = norm(step_y);

    info!(
        "EWA warp {w}x{h} -> {out_w}x{out_h}, angle {} deg, footprint {:.2}x{:.2} texels",
        args.angle,
        step_x.norm(),
        step_y.norm()
    );
    init_ewa_weights();

    let t0 = Instant::now();
    let mut filtered = vec![0u8; out_w * out_h * 4];
    for (i, px) in filtered.chunks_exact_mut(4).enumerate() {
        let p = warp(i % out_w, i / out_w);
        let rgba = ewa_filter(w, h, &opts, norm(p), du, dv, &reader);
        for (o, c) in px.iter_mut().zip(rgba) {
            *o = u8::from_f32(c);
        }
    }
    let ewa_elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    // Same warp through bilinear, for an aliasing comparison.
    let view = img.as_view();
    let t0 = Instant::now();
    let mut bilinear = vec![0u8; out_w * out_h * 4];
    for (i, px) in bilinear.chunks_exact_mut(4).enumerate() {
        let p = warp(i % out_w, i / out_w);
        px.copy_from_slice(&bilinear_repeat4(&view, p.x - 0.5, p.y - 0.5));
    }
    let bilinear_elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;
    info!("EWA {ewa_elapsed_ms:.2} ms, bilinear {bilinear_elapsed_ms:.2} ms");

    save_rgba_raw(case_dir.join("ewa.png"), out_w, out_h, filtered)?;
    save_rgba_raw(case_dir.join("bilinear.png"), out_w, out_h, bilinear)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaEwa {
            scale: args.scale,
            angle_deg: args.angle,
            squeeze: args.squeeze,
            options: opts,
            input_size: [w, h],
            output_size: [out_w, out_h],
            footprint_texels: [step_x.norm(), step_y.norm()],
            ewa_elapsed_ms,
            bilinear_elapsed_ms,
        },
    )?;

    Ok(())
}

fn run_probe(args: ProbeArgs) -> Result<()> {
    ensure_file_exists(&args.job, "job")?;
    let job: ProbeJob = read_json(&args.job)?;
    let case_dir = prepare_case(&args.common, "probe")?;
    let img = load_input_rgba(&args.common.input)?;
    let view = img.as_view();
    info!(
        "probing {} points and {} EWA footprints",
        job.points.len(),
        job.ewa.len()
    );

    let points = job
        .points
        .iter()
        .map(|p| {
            let mut rgba = [0u8; 4];
            sample(&view, p.filter, p.u, p.v, p.wrap_u, p.wrap_v, &mut rgba);
            PointResult {
                u: p.u,
                v: p.v,
                filter: p.filter.name(),
                wrap_u: p.wrap_u.name(),
                wrap_v: p.wrap_v.name(),
                rgba,
            }
        })
        .collect();

    let ewa = job
        .ewa
        .iter()
        .map(|p| {
            let reader = ViewReader::new(view, p.wrap_u, p.wrap_v);
            EwaResult {
                uv: p.uv,
                du: p.du,
                dv: p.dv,
                rgba: ewa_filter(
                    img.width(),
                    img.height(),
                    &p.options,
                    p.uv,
                    p.du,
                    p.dv,
                    &reader,
                ),
            }
        })
        .collect();

    write_json(
        case_dir.join("results.json"),
        &ProbeResults {
            input_size: [img.width(), img.height()],
            points,
            ewa,
        },
    )
}

fn prepare_case(common: &CommonArgs, case_name: &str) -> Result<PathBuf> {
    ensure_file_exists(&common.input, "input")?;

    let case_dir = common.out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    fs::copy(&common.input, case_dir.join("input.png")).with_context(|| {
        format!(
            "copying input {} -> {}",
            common.input.display(),
            case_dir.join("input.png").display()
        )
    })?;

    Ok(case_dir)
}

fn scaled_len(len: usize, scale: f32) -> Result<usize> {
    let n = (len as f32 * scale).round();
    if !(1.0..=65_536.0).contains(&n) {
        bail!("scaled size {n} is outside 1..=65536 (len {len}, scale {scale}).");
    }
    Ok(n as usize)
}

fn load_input_rgba(path: &Path) -> Result<Image<u8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let rgba = dyn_img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let data = rgba.into_raw();

    Image::from_vec(w as usize, h as usize, 4, data)
        .with_context(|| format!("constructing RGBA image from {}", path.display()))
}

fn save_rgba_raw(path: PathBuf, width: usize, height: usize, data: Vec<u8>) -> Result<()> {
    let rgba = RgbaImage::from_raw(width as u32, height as u32, data)
        .context("constructing RgbaImage from raw bytes")?;
    rgba.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
