//! Rasterize a mask and print it as ASCII art.
//!
//! `cargo run --example mask_preview [mask.json]`

use rayon::prelude::*;
use wavyte_mask::{
    BlendMode, Falloff, Mask, MaskLayer, MaskRasterSet, MaskSpline, Point, RasterOptions,
};

const RAMP: &[u8] = b" .:-=+*#%@";

fn ring(cx: f64, cy: f64, r: f64, n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let a = i as f64 / n as f64 * std::f64::consts::TAU;
            Point::new(cx + r * a.cos(), cy + r * a.sin())
        })
        .collect()
}

fn demo_mask() -> Mask {
    let wave: Vec<Point> = (0..24)
        .map(|i| {
            let t = i as f64 / 23.0;
            Point::new(0.1 + 0.8 * t, 0.2 + 0.06 * (t * 9.0).sin())
        })
        .collect();
    let wave_side: Vec<Point> = wave.iter().map(|p| Point::new(p.x, p.y + 0.04)).collect();

    Mask {
        layers: vec![
            MaskLayer {
                name: "disc".to_string(),
                falloff: Falloff::Smooth,
                splines: vec![
                    MaskSpline::closed(ring(0.5, 0.6, 0.22, 48))
                        .with_feather(ring(0.5, 0.6, 0.32, 48)),
                ],
                ..MaskLayer::default()
            },
            MaskLayer {
                name: "hole".to_string(),
                blend: BlendMode::Subtract,
                splines: vec![MaskSpline::closed(ring(0.5, 0.6, 0.08, 24))],
                ..MaskLayer::default()
            },
            MaskLayer {
                name: "wave".to_string(),
                blend: BlendMode::Lighten,
                alpha: 0.8,
                splines: vec![MaskSpline::open(wave).with_feather(wave_side)],
                ..MaskLayer::default()
            },
        ],
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mask = match std::env::args().nth(1) {
        Some(path) => Mask::from_json(&std::fs::read_to_string(path)?)?,
        None => demo_mask(),
    };

    let mut opts = RasterOptions::new(72, 36);
    opts.fake_aa = true;
    opts.parallel = true;
    let set = MaskRasterSet::new(&mask, &opts)?;

    let (w, h) = (opts.width, opts.height);
    let rows: Vec<String> = (0..h)
        .into_par_iter()
        .rev()
        .map(|y| {
            (0..w)
                .map(|x| {
                    let xy = [
                        (x as f32 + 0.5) / w as f32,
                        (y as f32 + 0.5) / h as f32,
                    ];
                    let v = set.sample(xy);
                    let i = (v * (RAMP.len() - 1) as f32).round() as usize;
                    RAMP[i.min(RAMP.len() - 1)] as char
                })
                .collect()
        })
        .collect();

    for row in rows {
        println!("{row}");
    }
    if let Some(b) = set.bounds() {
        println!(
            "bounds: ({:.3}, {:.3}) - ({:.3}, {:.3})",
            b.x0, b.y0, b.x1, b.y1
        );
    }
    set.free();
    Ok(())
}
