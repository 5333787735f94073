use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;

#[test]
fn count_and_bounds() {
    let canvas = Canvas::new(320, 240);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let dots = generate_sparkles(500, 1.5, canvas, &mut rng);
    assert_eq!(dots.len(), 500);
    for s in &dots {
        assert!((0.0..320.0).contains(&s.center.x));
        assert!((0.0..240.0).contains(&s.center.y));
        assert!((0.0..1.5).contains(&s.radius));
    }
}

#[test]
fn same_seed_same_field() {
    let canvas = Canvas::new(64, 64);
    let a = generate_sparkles(20, 3.0, canvas, &mut ChaCha8Rng::seed_from_u64(42));
    let b = generate_sparkles(20, 3.0, canvas, &mut ChaCha8Rng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn successive_calls_differ() {
    let canvas = Canvas::new(64, 64);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let a = generate_sparkles(20, 3.0, canvas, &mut rng);
    let b = generate_sparkles(20, 3.0, canvas, &mut rng);
    assert_ne!(a, b);
}

#[test]
fn degenerate_inputs() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert!(generate_sparkles(0, 2.0, Canvas::new(10, 10), &mut rng).is_empty());
    assert!(generate_sparkles(10, 2.0, Canvas::new(0, 10), &mut rng).is_empty());
    let dots = generate_sparkles(5, f64::NAN, Canvas::new(10, 10), &mut rng);
    assert!(dots.iter().all(|s| s.radius == 0.0));
}
