use {
    base::Vec2,
    roadmask::ConfigError,
    roadscan::{NodeConfig, NodeError},
    std::{fs, time::Duration},
};

#[test]
fn test_defaults() {
    let config = NodeConfig::default();
    config.validate().unwrap();
    assert_eq!(config.frame_size, Vec2::new(1280, 720));
    assert_eq!(config.output_period(), Duration::from_millis(100));
    assert_eq!(config.frame_id, "camera_link");
    assert_eq!(config.channels.color, "/camera/color/image_raw");
    assert_eq!(config.channels.depth, "/camera/depth/image_rect_raw");
    assert_eq!(config.channels.camera_info, "/camera/depth/camera_info");
    assert_eq!(config.channels.pothole_depth, "pothole_depth");
    assert_eq!(config.channels.lane_depth, "lane_depth");
    assert_eq!(config.channels.output_info, "/cov_info");
}

#[test]
fn test_load_partial_file() {
    let path = std::env::temp_dir().join(format!("roadscan_config_{}.json", std::process::id()));
    fs::write(
        &path,
        r#"{
            "output_period": 0.05,
            "channels": { "lane_depth": "lanes" },
            "pipeline": { "lane_area": { "min": 1500.0, "max": 6000.0 } }
        }"#,
    )
    .unwrap();
    let config = NodeConfig::load(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(config.output_period(), Duration::from_millis(50));
    assert_eq!(config.channels.lane_depth, "lanes");
    assert_eq!(config.channels.pothole_depth, "pothole_depth");
    assert_eq!(config.pipeline.lane_area.min, 1500.0);
    assert_eq!(config.pipeline.blur_kernel, 11);
    config.validate().unwrap();
}

#[test]
fn test_load_errors() {
    let missing = std::env::temp_dir().join("roadscan_config_does_not_exist.json");
    assert!(matches!(NodeConfig::load(&missing), Err(NodeError::Io(_))));

    let path = std::env::temp_dir().join(format!("roadscan_bad_{}.json", std::process::id()));
    fs::write(&path, "{ not json").unwrap();
    let result = NodeConfig::load(&path);
    let _ = fs::remove_file(&path);
    assert!(matches!(result, Err(NodeError::Json(_))));
}

#[test]
fn test_validation_fails_fast() {
    let config = NodeConfig {
        output_period: 0.0,
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let config = NodeConfig {
        output_period: -1.0,
        ..Default::default()
    };
    assert!(config.validate().is_err());

    // default ROI reaches row 720
    let config = NodeConfig {
        frame_size: Vec2::new(640, 480),
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Roi { .. })));
}
