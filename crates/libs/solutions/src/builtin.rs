//! Built-in solution templates
//!
//! The standard analytics solutions compiled into the service. Bootstrap
//! registers all of them at startup; they are flagged default and cannot be
//! updated or deleted afterwards.

use edgevision_core::solution::{NodeConfig, SolutionConfig};

/// All built-in solutions, in registration order
pub fn default_solutions() -> Vec<SolutionConfig> {
    vec![
        face_detection(),
        face_detection_rtmp(),
        yolov11_detection(),
        ba_crossline(),
    ]
}

/// Face detection over an RTSP stream, annotated frames written to disk
pub fn face_detection() -> SolutionConfig {
    let mut config = SolutionConfig::new("face_detection", "Face Detection")
        .with_type("face_detection")
        .with_node(
            NodeConfig::new("rtsp_src", "rtsp_src_{instanceId}")
                .with_param("rtsp_url", "${RTSP_URL}")
                .with_param("channel", "0")
                .with_param("resize_ratio", "1.0"),
        )
        .with_node(
            NodeConfig::new("yunet_face_detector", "face_detector_{instanceId}")
                .with_param("model_path", "${MODEL_PATH}")
                .with_param("score_threshold", "${detectionSensitivity}")
                .with_param("nms_threshold", "0.5")
                .with_param("top_k", "50"),
        )
        .with_node(
            NodeConfig::new("file_des", "file_des_{instanceId}")
                .with_param("save_dir", "./output/{instanceId}")
                .with_param("name_prefix", "face_detection")
                .with_param("osd", "true"),
        )
        .with_default("detectorMode", "SmartDetection")
        .with_default("detectionSensitivity", "0.7")
        .with_default("sensorModality", "RGB");
    config.is_default = true;
    config
}

/// Face detection with feature encoding and annotated RTMP output
pub fn face_detection_rtmp() -> SolutionConfig {
    let mut config = SolutionConfig::new(
        "face_detection_rtmp",
        "Face Detection with RTMP Streaming",
    )
    .with_type("face_detection")
    .with_node(
        NodeConfig::new("rtsp_src", "rtsp_src_{instanceId}")
            .with_param("rtsp_url", "${RTSP_URL}")
            .with_param("channel", "0")
            .with_param("resize_ratio", "1.0"),
    )
    .with_node(
        NodeConfig::new("yunet_face_detector", "yunet_face_detector_{instanceId}")
            .with_param("model_path", "${MODEL_PATH}")
            .with_param("score_threshold", "${detectionSensitivity}")
            .with_param("nms_threshold", "0.5")
            .with_param("top_k", "50"),
    )
    .with_node(
        NodeConfig::new("sface_feature_encoder", "sface_face_encoder_{instanceId}")
            .with_param("model_path", "${SFACE_MODEL_PATH}"),
    )
    .with_node(NodeConfig::new("face_osd_v2", "osd_{instanceId}"))
    .with_node(
        NodeConfig::new("rtmp_des", "rtmp_des_{instanceId}")
            .with_param("rtmp_url", "${RTMP_DES_URL}")
            .with_param("channel", "0"),
    )
    .with_default("detectorMode", "SmartDetection")
    .with_default("detectionSensitivity", "0.7")
    .with_default("sensorModality", "RGB");
    config.is_default = true;
    config
}

/// YOLOv11 object detection with self-sufficient development defaults
pub fn yolov11_detection() -> SolutionConfig {
    let mut config = SolutionConfig::new("yolov11_detection", "YOLOv11 Object Detection")
        .with_type("object_detection")
        .with_node(
            NodeConfig::new("rtsp_src", "rtsp_src_{instanceId}")
                .with_param("rtsp_url", "${RTSP_URL}")
                .with_param("channel", "0")
                .with_param("resize_ratio", "1.0"),
        )
        .with_node(
            NodeConfig::new("yolov11_detector", "detector_{instanceId}")
                .with_param("model_path", "${MODEL_PATH}"),
        )
        .with_node(
            NodeConfig::new("file_des", "destination_{instanceId}")
                .with_param("save_dir", "${SAVE_DIR}")
                .with_param("name_prefix", "yolov11_detection")
                .with_param("osd", "true"),
        )
        // Development defaults; production deployments override these
        // through the request parameters.
        .with_default("RTSP_URL", "rtsp://localhost:8554/stream")
        .with_default("MODEL_PATH", "/opt/edgevision/models/yolov11/yolov11n.onnx")
        .with_default("SAVE_DIR", "/tmp/output")
        .with_default("detectorMode", "SmartDetection")
        .with_default("detectionSensitivity", "0.7")
        .with_default("sensorModality", "RGB");
    config.is_default = true;
    config
}

/// Behavior analysis: crossline detection with tracked objects, RTMP output
pub fn ba_crossline() -> SolutionConfig {
    let mut config = SolutionConfig::new(
        "ba_crossline",
        "Behavior Analysis - Crossline Detection",
    )
    .with_type("behavior_analysis")
    .with_node(
        NodeConfig::new("rtsp_src", "rtsp_src_{instanceId}")
            .with_param("rtsp_url", "${RTSP_URL}")
            .with_param("channel", "0")
            .with_param("resize_ratio", "0.4"),
    )
    .with_node(
        NodeConfig::new("yolo_detector", "yolo_detector_{instanceId}")
            .with_param("weights_path", "${WEIGHTS_PATH}")
            .with_param("config_path", "${CONFIG_PATH}")
            .with_param("labels_path", "${LABELS_PATH}"),
    )
    .with_node(NodeConfig::new("sort_track", "sort_tracker_{instanceId}"))
    .with_node(
        NodeConfig::new("ba_crossline", "ba_crossline_{instanceId}")
            .with_param("line_start_x", "1500")
            .with_param("line_start_y", "1500")
            .with_param("line_end_x", "1000")
            .with_param("line_end_y", "1000"),
    )
    .with_node(NodeConfig::new("ba_crossline_osd", "osd_{instanceId}"))
    .with_node(
        NodeConfig::new("rtmp_des", "rtmp_des_{instanceId}")
            .with_param("rtmp_url", "${RTMP_DES_URL}")
            .with_param("channel", "0"),
    )
    .with_default("detectorMode", "SmartDetection")
    .with_default("detectionSensitivity", "0.7")
    .with_default("sensorModality", "RGB");
    config.is_default = true;
    config
}
