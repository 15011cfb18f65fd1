use super::*;

#[test]
fn new_is_default_initialized() {
    let a = Arena::<f32>::new(4);
    assert_eq!(a.len(), 4);
    assert!(!a.is_empty());
    assert!(a.as_slice().iter().all(|&v| v == 0.0));
}

#[test]
fn slice_is_a_view_into_the_parent() {
    let mut a = Arena::from_vec(vec![1, 2, 3, 4, 5]);
    assert_eq!(a.slice(1, 3), &[2, 3, 4]);

    a.slice_mut(3, 2).copy_from_slice(&[40, 50]);
    assert_eq!(a[3], 40);
    assert_eq!(a.as_slice(), &[1, 2, 3, 40, 50]);
}

#[test]
fn fill_overwrites_every_element() {
    let mut a = Arena::filled(3, f32::NEG_INFINITY);
    a[1] = -0.5;
    a.fill(f32::NEG_INFINITY);
    assert!(a.as_slice().iter().all(|v| *v == f32::NEG_INFINITY));
}

#[test]
fn release_consumes() {
    let a = Arena::<u8>::new(8);
    a.release();
}

#[test]
#[should_panic(expected = "out of bounds")]
fn index_out_of_bounds_panics() {
    let a = Arena::<u8>::new(2);
    let _ = a[2];
}

#[test]
#[should_panic(expected = "out of bounds")]
fn slice_out_of_bounds_panics() {
    let a = Arena::<u8>::new(4);
    let _ = a.slice(2, 3);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn slice_overflow_panics() {
    let a = Arena::<u8>::new(4);
    let _ = a.slice(usize::MAX, 2);
}

#[test]
#[should_panic(expected = "arena length must be > 0")]
fn zero_length_panics() {
    let _ = Arena::<u8>::new(0);
}
