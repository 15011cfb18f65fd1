use super::*;

#[test]
fn constructors_set_kind_and_keep_defaults() {
    let p = Light::point(Vector3::new(1.0, 2.0, 3.0), Vector3::ONE, 2.0);
    assert_eq!(p.kind, LightKind::Point);
    assert_eq!(p.position, Vector3::new(1.0, 2.0, 3.0));

    let d = Light::directional(Vector3::new(0.0, -1.0, 0.0), Vector3::ONE, 0.5);
    assert_eq!(d.kind, LightKind::Directional);
    assert_eq!(d.position, Vector3::ZERO);

    let a = Light::area(Vector3::new(0.2, 0.3, 0.4), 0.7);
    assert_eq!(a.kind, LightKind::Area);
    assert_eq!(a.direction, Light::default().direction);
}

#[test]
fn light_kind_uses_snake_case_names() {
    let json = serde_json::to_string(&LightKind::Directional).unwrap();
    assert_eq!(json, "\"directional\"");
    let light: Light = serde_json::from_str(
        r#"{"position":{"x":0,"y":1,"z":0},"direction":{"x":0,"y":0,"z":-1},
            "color":{"x":1,"y":1,"z":1},"intensity":3.0,"kind":"area"}"#,
    )
    .unwrap();
    assert_eq!(light.kind, LightKind::Area);
    assert_eq!(light.intensity, 3.0);
}
