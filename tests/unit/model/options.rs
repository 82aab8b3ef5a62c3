use super::*;

#[test]
fn pixel_size_uses_shorter_side() {
    assert_eq!(RasterOptions::new(200, 100).pixel_size(), 0.01);
    assert_eq!(RasterOptions::new(64, 64).pixel_size(), 1.0 / 64.0);
}

#[test]
fn validate_rejects_zero_dims_and_threads() {
    assert!(RasterOptions::new(0, 10).validate().is_err());
    assert!(RasterOptions::new(10, 0).validate().is_err());
    let mut opts = RasterOptions::new(10, 10);
    opts.threads = Some(0);
    assert!(opts.validate().is_err());
    opts.threads = Some(2);
    assert!(opts.validate().is_ok());
}

#[test]
fn aspect_picks_shorter_axis() {
    assert_eq!(RasterOptions::new(100, 100).aspect(), None);
    assert_eq!(RasterOptions::new(50, 100).aspect(), Some(AspectAxis::X(0.5)));
    assert_eq!(RasterOptions::new(100, 50).aspect(), Some(AspectAxis::Y(0.5)));

    let mut opts = RasterOptions::new(100, 50);
    opts.aspect_correct = false;
    assert_eq!(opts.aspect(), None);
}

#[test]
fn aspect_apply_keeps_center_fixed() {
    let axis = AspectAxis::X(0.5);
    assert_eq!(axis.apply([0.5, 0.3]), [0.5, 0.3]);
    assert_eq!(axis.apply([0.75, 0.3]), [1.0, 0.3]);
    assert_eq!(AspectAxis::Y(0.5).apply([0.2, 0.25]), [0.2, 0.0]);
}

#[test]
fn serde_defaults() {
    let opts: RasterOptions = serde_json::from_str(r#"{ "width": 32, "height": 16 }"#).unwrap();
    assert_eq!(opts, RasterOptions::new(32, 16));
}
