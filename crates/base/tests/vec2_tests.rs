use base::Vec2;

#[test]
fn test_new_and_fields() {
    let v = Vec2::new(640usize, 480usize);
    assert_eq!(v.x, 640);
    assert_eq!(v.y, 480);
}

#[test]
fn test_area() {
    assert_eq!(Vec2::new(640usize, 480usize).checked_area(), Some(307200));
    assert_eq!(Vec2::<usize>::default().checked_area(), Some(0));
    assert_eq!(Vec2::new(usize::MAX, 2).checked_area(), None);
}

#[test]
fn test_add_sub() {
    let a = Vec2::new(2i64, -3i64);
    let b = Vec2::new(1i64, 4i64);
    assert_eq!(a + b, Vec2::new(3, 1));
    assert_eq!(a - b, Vec2::new(1, -7));
}

#[test]
fn test_debug_format() {
    let s = format!("{:?}", Vec2::new(1, 2));
    assert!(s.contains("x: 1"));
    assert!(s.contains("y: 2"));
}
