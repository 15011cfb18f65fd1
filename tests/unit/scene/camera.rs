use super::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-4
}

#[test]
fn validate_rejects_bad_planes() {
    for (near, far) in [(0.0, 1.0), (-1.0, 1.0), (2.0, 1.0), (1.0, 1.0), (1.0, -5.0)] {
        let cam = Camera {
            near,
            far,
            ..Camera::default()
        };
        let err = cam.validate().unwrap_err();
        assert!(matches!(err, MikoError::Configuration(_)));
    }
    assert!(Camera::default().validate().is_ok());
}

#[test]
fn validate_rejects_empty_view_volume() {
    let cam = Camera {
        width: 0.0,
        ..Camera::default()
    };
    assert!(cam.validate().is_err());
}

#[test]
fn validate_rejects_degenerate_look_at() {
    let bad = [
        Camera {
            target: Camera::default().position,
            ..Camera::default()
        },
        Camera {
            up: Vector3::new(0.0, 0.0, -2.0),
            ..Camera::default()
        },
        Camera {
            up: Vector3::ZERO,
            ..Camera::default()
        },
        Camera {
            position: Vector3::new(f32::NAN, 0.0, 3.0),
            ..Camera::default()
        },
    ];
    for cam in bad {
        let err = cam.validate().unwrap_err();
        assert!(matches!(err, MikoError::Configuration(_)), "{cam:?}");
    }

    let tilted = Camera {
        up: Vector3::new(0.0, 1.0, 1.0),
        ..Camera::default()
    };
    assert!(tilted.validate().is_ok());
}

#[test]
fn view_matrix_puts_target_on_negative_z() {
    let cam = Camera {
        position: Vector3::new(2.0, 2.0, 3.0),
        target: Vector3::ZERO,
        ..Camera::default()
    };
    let view = cam.view_matrix();

    let eye = view.transform_point(cam.position);
    assert!(eye.length() < 1e-5);

    let target = view.transform_point(cam.target);
    let dist = cam.position.length();
    assert!(approx(target.x, 0.0));
    assert!(approx(target.y, 0.0));
    assert!(approx(target.z, -dist));
}

#[test]
fn perspective_maps_planes_to_ndc_range() {
    let cam = Camera {
        position: Vector3::ZERO,
        target: Vector3::new(0.0, 0.0, -1.0),
        near: 1.0,
        far: 5.0,
        ..Camera::default()
    };
    let proj = cam.projection_matrix();

    let near = proj * Vector4::new(0.5, 0.0, -1.0, 1.0);
    assert!(approx(near.w, -1.0));
    assert!(approx(near.x / near.w, 1.0));
    assert!(approx(near.z / near.w, 1.0));

    let far = proj * Vector4::new(0.0, 0.0, -5.0, 1.0);
    assert!(approx(far.z / far.w, -1.0));
    assert!(approx(cam.view_depth(far), -5.0));
}

#[test]
fn perspective_shrinks_with_distance() {
    let cam = Camera {
        position: Vector3::ZERO,
        target: Vector3::new(0.0, 0.0, -1.0),
        near: 1.0,
        far: 10.0,
        ..Camera::default()
    };
    let proj = cam.projection_matrix();
    let close = proj * Vector4::new(0.25, 0.0, -1.0, 1.0);
    let distant = proj * Vector4::new(0.25, 0.0, -4.0, 1.0);
    assert!(approx(distant.x / distant.w, 0.25 * close.x / close.w));
}

#[test]
fn orthographic_keeps_w_and_recovers_depth() {
    let cam = Camera {
        position: Vector3::ZERO,
        target: Vector3::new(0.0, 0.0, -1.0),
        near: 1.0,
        far: 5.0,
        width: 4.0,
        height: 2.0,
        projection: Projection::Orthographic,
        ..Camera::default()
    };
    let proj = cam.projection_matrix();
    let clip = proj * Vector4::new(2.0, 1.0, -3.0, 1.0);
    assert_eq!(clip.w, 1.0);
    assert!(approx(clip.x, 1.0));
    assert!(approx(clip.y, 1.0));
    assert!(approx(cam.view_depth(clip), -3.0));
}

#[test]
fn camera_roundtrips_through_json() {
    let json = r#"{
        "position": {"x": 0.0, "y": 1.0, "z": 4.0},
        "up": {"x": 0.0, "y": 1.0, "z": 0.0},
        "target": {"x": 0.0, "y": 0.0, "z": 0.0},
        "near": 0.5,
        "far": 20.0,
        "width": 1.0,
        "height": 0.75,
        "projection": "orthographic"
    }"#;
    let cam: Camera = serde_json::from_str(json).unwrap();
    assert_eq!(cam.projection, Projection::Orthographic);
    assert!(cam.validate().is_ok());
}
