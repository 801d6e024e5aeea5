use super::*;

#[test]
fn defaults_validate() {
    OverlayFontConfig::new("fonts").validate().unwrap();
}

#[test]
fn minimal_json_fills_defaults() {
    let cfg: OverlayFontConfig = serde_json::from_str(r#"{ "font_dir": "fonts" }"#).unwrap();
    assert_eq!(cfg, OverlayFontConfig::new("fonts"));
}

#[test]
fn json_accepts_all_parameter_forms() {
    let cfg: OverlayFontConfig = serde_json::from_str(
        r#"{
            "font_dir": "fonts",
            "target_height": 128,
            "target_width": 64,
            "num_samples": 3,
            "length_samples": {"choice": [1, 4]},
            "overlay_intensity": [1.0, 1.0],
            "overlay_shift": {"x": 0, "y": [-3, 3]},
            "threading": {"parallel": true, "threads": 2}
        }"#,
    )
    .unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.num_samples, DiscreteParam::Constant(3));
    assert_eq!(cfg.overlay_shift.x, DiscreteParam::Constant(0));
    assert!(cfg.threading.parallel);
}

#[test]
fn invalid_ranges_are_configuration_errors() {
    let cases: Vec<Box<dyn Fn(&mut OverlayFontConfig)>> = vec![
        Box::new(|c| c.target_width = 0),
        Box::new(|c| c.target_height = MAX_TARGET_SIDE + 1),
        Box::new(|c| c.font_extensions = vec![]),
        Box::new(|c| c.num_samples = DiscreteParam::Uniform(2, 1)),
        Box::new(|c| c.num_samples = DiscreteParam::Uniform(-1, 1)),
        Box::new(|c| c.length_samples = DiscreteParam::Uniform(0, 2)),
        Box::new(|c| c.num_samples = DiscreteParam::Uniform(0, i64::MAX / 2)),
        Box::new(|c| c.length_samples = DiscreteParam::Constant(100_000)),
        Box::new(|c| c.overlay_scale.x = ContinuousParam::Uniform(0.0, 1.0)),
        Box::new(|c| c.overlay_rotation = ContinuousParam::Constant(f64::INFINITY)),
        Box::new(|c| c.overlay_intensity = ContinuousParam::Uniform(0.5, 1.5)),
        Box::new(|c| c.overlay_shift.y = DiscreteParam::Choice { choice: vec![] }),
        Box::new(|c| c.threading.threads = Some(0)),
    ];
    for (i, mutate) in cases.iter().enumerate() {
        let mut cfg = OverlayFontConfig::new("fonts");
        mutate(&mut cfg);
        assert!(
            matches!(cfg.validate(), Err(OverlayError::Configuration(_))),
            "case {i} should fail"
        );
    }
}

#[test]
fn zero_overlays_are_allowed() {
    let mut cfg = OverlayFontConfig::new("fonts");
    cfg.num_samples = DiscreteParam::Uniform(0, 0);
    cfg.validate().unwrap();
}

#[test]
fn from_json_path_reports_parse_failures() {
    let path = std::env::temp_dir().join(format!("overlay_font_cfg_{}.json", std::process::id()));
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        OverlayFontConfig::from_json_path(&path),
        Err(OverlayError::Serde(_))
    ));
    std::fs::write(&path, r#"{ "font_dir": "x", "target_width": 32 }"#).unwrap();
    let cfg = OverlayFontConfig::from_json_path(&path).unwrap();
    assert_eq!(cfg.target_width, 32);
    std::fs::remove_file(path).unwrap();
}
