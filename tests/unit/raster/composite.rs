use super::*;
use crate::{Mask, MaskLayer, MaskRasterSet, MaskSpline, Point, RasterOptions};

const FALLOFFS: [Falloff; 6] = [
    Falloff::Linear,
    Falloff::Smooth,
    Falloff::Sphere,
    Falloff::Root,
    Falloff::Sharp,
    Falloff::InverseSquare,
];

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> MaskSpline {
    MaskSpline::closed(vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ])
}

fn layer(spline: MaskSpline, blend: BlendMode, alpha: f32, invert: bool) -> MaskLayer {
    MaskLayer {
        blend,
        alpha,
        invert,
        splines: vec![spline],
        ..MaskLayer::default()
    }
}

fn build(layers: Vec<MaskLayer>) -> MaskRasterSet {
    MaskRasterSet::new(&Mask { layers }, &RasterOptions::new(64, 64)).unwrap()
}

#[test]
fn falloff_curves_fix_endpoints() {
    for f in FALLOFFS {
        assert_eq!(f.apply(0.0), 0.0, "{f:?}");
        assert_eq!(f.apply(1.0), 1.0, "{f:?}");
    }
}

#[test]
fn falloff_curves_are_monotone_and_bounded() {
    for f in FALLOFFS {
        let mut last = 0.0f32;
        for i in 0..=100 {
            let y = f.apply(i as f32 / 100.0);
            assert!((0.0..=1.0).contains(&y), "{f:?}: {y}");
            assert!(y >= last - 1e-6, "{f:?} decreased at {i}");
            last = y;
        }
    }
}

#[test]
fn falloff_curve_shapes() {
    assert!((Falloff::Smooth.apply(0.5) - 0.5).abs() < 1e-6);
    assert!((Falloff::Sharp.apply(0.5) - 0.25).abs() < 1e-6);
    assert!((Falloff::Root.apply(0.25) - 0.5).abs() < 1e-6);
    assert!((Falloff::Sphere.apply(0.5) - 0.75f32.sqrt()).abs() < 1e-6);
    assert!((Falloff::InverseSquare.apply(0.5) - 0.75).abs() < 1e-6);
    // out-of-range input is clamped first
    assert_eq!(Falloff::Sphere.apply(1.5), 1.0);
    assert_eq!(Falloff::Root.apply(-0.5), 0.0);
}

#[test]
fn blend_mode_formulas() {
    let (acc, v) = (0.6f32, 0.25f32);
    let close = |a: f32, b: f32| (a - b).abs() < 1e-6;
    assert!(close(BlendMode::Add.apply(acc, v, 1.0), 0.85));
    assert!(close(BlendMode::Subtract.apply(acc, v, 1.0), 0.35));
    assert!(close(BlendMode::Lighten.apply(acc, v, 1.0), 0.6));
    assert!(close(BlendMode::Darken.apply(acc, v, 1.0), 0.25));
    assert!(close(BlendMode::Multiply.apply(acc, v, 1.0), 0.15));
    assert!(close(BlendMode::Replace.apply(acc, v, 0.5), 0.425));
    assert!(close(BlendMode::Difference.apply(acc, v, 1.0), 0.35));
    assert!(close(BlendMode::Difference.apply(v, acc, 1.0), 0.35));
    assert!(close(BlendMode::MergeAdd.apply(acc, v, 1.0), 0.7));
    assert!(close(BlendMode::MergeSubtract.apply(acc, v, 1.0), 0.45));
}

#[test]
fn replace_with_full_alpha_ignores_accumulator() {
    for acc in [0.0f32, 0.3, 1.0, 7.5] {
        assert_eq!(BlendMode::Replace.apply(acc, 0.4, 1.0), 0.4);
    }
}

#[test]
fn layer_value_applies_alpha_then_invert() {
    let set = build(vec![layer(
        square(0.25, 0.25, 0.75, 0.75),
        BlendMode::Add,
        0.5,
        true,
    )]);
    let l = &set.layers()[0];
    // inside: 1 * 0.5, inverted
    assert!((l.value_at([0.5, 0.5]) - 0.5).abs() < 1e-6);
    // outside the bounds: 0, inverted
    assert_eq!(l.value_at([0.1, 0.1]), 1.0);
}

#[test]
fn disabled_layer_contributes_nothing_unless_inverted() {
    let plain = build(vec![layer(
        square(0.25, 0.25, 0.75, 0.75),
        BlendMode::Add,
        0.0,
        false,
    )]);
    assert_eq!(plain.sample([0.5, 0.5]), 0.0);

    let inverted = build(vec![layer(
        square(0.25, 0.25, 0.75, 0.75),
        BlendMode::Add,
        0.0,
        true,
    )]);
    assert_eq!(inverted.layers()[0].value_at([0.5, 0.5]), 1.0);
    assert_eq!(inverted.sample([0.5, 0.5]), 1.0);
}

#[test]
fn accumulator_is_clamped_after_every_layer() {
    let set = build(vec![
        layer(square(0.1, 0.1, 0.9, 0.9), BlendMode::Add, 0.6, false),
        layer(square(0.1, 0.1, 0.9, 0.9), BlendMode::Add, 0.6, false),
        layer(square(0.1, 0.1, 0.9, 0.9), BlendMode::Subtract, 0.5, false),
    ]);
    // 0.6 + 0.6 saturates to 1 before the subtract
    assert!((set.sample([0.5, 0.5]) - 0.5).abs() < 1e-6);
    assert_eq!(set.sample([0.05, 0.05]), 0.0);
}

#[test]
fn replace_layer_overrides_lower_layers_inside_and_outside() {
    let set = build(vec![
        layer(square(0.1, 0.1, 0.9, 0.9), BlendMode::Add, 0.7, false),
        layer(square(0.4, 0.4, 0.6, 0.6), BlendMode::Replace, 1.0, false),
    ]);
    assert_eq!(set.sample([0.5, 0.5]), 1.0);
    // outside the replace layer its value is 0, which replaces the 0.7
    assert_eq!(set.sample([0.2, 0.2]), 0.0);
}

#[test]
fn composite_of_no_layers_is_zero() {
    assert_eq!(composite(&[], [0.5, 0.5]), 0.0);
}
