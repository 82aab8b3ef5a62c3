use super::*;

#[test]
fn json_defaults_fill_in_layer_attributes() {
    let mask = Mask::from_json(
        r#"{
            "layers": [
                { "splines": [ { "points": [ {"x": 0.1, "y": 0.1}, {"x": 0.9, "y": 0.1},
                                            {"x": 0.9, "y": 0.9}, {"x": 0.1, "y": 0.9} ] } ] }
            ]
        }"#,
    )
    .unwrap();

    let layer = &mask.layers[0];
    assert_eq!(layer.alpha, 1.0);
    assert_eq!(layer.blend, BlendMode::Add);
    assert_eq!(layer.falloff, Falloff::Linear);
    assert!(!layer.invert && !layer.skip_render && !layer.fill_holes);

    let spline = &layer.splines[0];
    assert!(spline.cyclic);
    assert!(!spline.no_fill);
    assert!(spline.feather.is_none());
    assert!(spline.is_filled());
}

#[test]
fn enums_use_snake_case() {
    let blend: BlendMode = serde_json::from_str("\"merge_subtract\"").unwrap();
    assert_eq!(blend, BlendMode::MergeSubtract);
    let falloff: Falloff = serde_json::from_str("\"inverse_square\"").unwrap();
    assert_eq!(falloff, Falloff::InverseSquare);
    assert_eq!(
        serde_json::to_string(&BlendMode::Replace).unwrap(),
        "\"replace\""
    );
}

#[test]
fn json_roundtrip_preserves_mask() {
    let mask = Mask {
        layers: vec![MaskLayer {
            name: "stroke".to_string(),
            blend: BlendMode::Lighten,
            splines: vec![
                MaskSpline::open(vec![Point::new(0.1, 0.5), Point::new(0.9, 0.5)])
                    .with_feather(vec![Point::new(0.1, 0.55), Point::new(0.9, 0.55)]),
            ],
            ..MaskLayer::default()
        }],
    };
    let back = Mask::from_json(&mask.to_json().unwrap()).unwrap();
    assert_eq!(back, mask);
}

#[test]
fn validate_rejects_bad_alpha() {
    let mut mask = Mask {
        layers: vec![MaskLayer::default()],
    };
    mask.layers[0].alpha = 1.5;
    assert!(matches!(mask.validate(), Err(MaskError::Validation(_))));
    mask.layers[0].alpha = f32::NAN;
    assert!(mask.validate().is_err());
}

#[test]
fn validate_rejects_non_finite_points() {
    let mask = Mask {
        layers: vec![MaskLayer {
            splines: vec![MaskSpline::closed(vec![Point::new(f64::INFINITY, 0.0)])],
            ..MaskLayer::default()
        }],
    };
    assert!(mask.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        Mask::from_json("{ \"layers\": 3 }"),
        Err(MaskError::Serde(_))
    ));
}

#[test]
fn open_and_closed_constructors() {
    assert!(!MaskSpline::open(vec![]).is_filled());
    assert!(MaskSpline::closed(vec![]).is_filled());
    let mut s = MaskSpline::closed(vec![]);
    s.no_fill = true;
    assert!(!s.is_filled());
}
