use motionkit_core::cycle::KeyCycleOscillator;
use motionkit_core::error::MotionError;
use motionkit_core::oscillator::WaveShape;

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

#[test]
fn get_before_setup_is_an_error() {
    let mut osc = KeyCycleOscillator::new();
    osc.set_point(0, WaveShape::Sin, None, None, 1.0, 0.0, 0.0, 1.0);
    assert_eq!(osc.get(0.5), Err(MotionError::NotSetup));
    assert_eq!(osc.get_slope(0.5), Err(MotionError::NotSetup));
}

#[test]
fn setup_without_points_is_an_error() {
    let mut osc = KeyCycleOscillator::new();
    let err = osc.setup(0.0).unwrap_err();
    assert!(matches!(err, MotionError::NoKeyframes(_)));
}

#[test]
fn zero_amplitude_yields_the_offset() {
    let mut osc = KeyCycleOscillator::new();
    osc.set_point(0, WaveShape::Sin, None, None, 1.0, 3.0, 0.0, 0.0);
    osc.set_point(100, WaveShape::Sin, None, None, 1.0, 3.0, 0.0, 0.0);
    osc.setup(0.0).unwrap();
    for i in 0..=10 {
        approx(osc.get(i as f32 / 10.0).unwrap(), 3.0, 1e-4);
    }
}

#[test]
fn the_highest_wave_shape_id_wins() {
    let mut osc = KeyCycleOscillator::new();
    osc.set_point(0, WaveShape::Sin, None, None, 1.0, 0.0, 0.0, 1.0);
    osc.set_point(100, WaveShape::Cos, None, None, 1.0, 0.0, 0.0, 1.0);
    osc.setup(0.0).unwrap();
    // a sine starts at 0, a cosine at 1; the cosine must win
    approx(osc.get(0.0).unwrap(), 1.0, 1e-4);
}

#[test]
fn unit_sine_cycle_hits_its_quarter_points() {
    let mut osc = KeyCycleOscillator::new();
    osc.set_point(0, WaveShape::Sin, None, None, 1.0, 0.0, 0.0, 1.0);
    osc.set_point(100, WaveShape::Sin, None, None, 1.0, 0.0, 0.0, 1.0);
    osc.setup(0.0).unwrap();
    // two keyframes of period 1 normalize to two full cycles over [0, 1]
    approx(osc.get(0.0).unwrap(), 0.0, 1e-4);
    approx(osc.get(0.125).unwrap(), 1.0, 1e-4);
    approx(osc.get(0.25).unwrap(), 0.0, 1e-4);
    approx(osc.get(0.375).unwrap(), -1.0, 1e-4);
}

#[test]
fn output_stays_inside_the_offset_band() {
    let mut osc = KeyCycleOscillator::new();
    osc.set_point(0, WaveShape::Triangle, None, None, 2.0, 5.0, 0.0, 1.5);
    osc.set_point(100, WaveShape::Triangle, None, None, 2.0, 5.0, 0.0, 1.5);
    osc.setup(0.0).unwrap();
    for i in 0..=100 {
        let v = osc.get(i as f32 / 100.0).unwrap();
        assert!((3.5..=6.5).contains(&v), "v={v} at i={i}");
    }
}

#[test]
fn duplicate_positions_collapse_first_seen_wins() {
    let mut osc = KeyCycleOscillator::new();
    osc.set_point(0, WaveShape::Sin, None, None, 1.0, 1.0, 0.0, 0.0);
    osc.set_point(50, WaveShape::Sin, None, None, 1.0, 2.0, 0.0, 0.0);
    osc.set_point(50, WaveShape::Sin, None, None, 1.0, 9.0, 0.0, 0.0);
    osc.set_point(100, WaveShape::Sin, None, None, 1.0, 3.0, 0.0, 0.0);
    osc.setup(0.0).unwrap();
    for i in 0..=100 {
        let v = osc.get(i as f32 / 100.0).unwrap();
        assert!(v.is_finite(), "v={v} at i={i}");
    }
    // the second point at position 50 is dropped, keeping offset 2
    approx(osc.get(0.5).unwrap(), 2.0, 1e-5);
}

#[test]
fn slope_matches_a_finite_difference() {
    let mut osc = KeyCycleOscillator::new();
    osc.set_point(0, WaveShape::Sin, None, None, 1.0, 0.0, 0.0, 2.0);
    osc.set_point(100, WaveShape::Sin, None, None, 1.0, 0.0, 0.0, 2.0);
    osc.setup(0.0).unwrap();
    let h = 1e-4f32;
    for &t in &[0.2f32, 0.45, 0.7] {
        let fd = (osc.get(t + h).unwrap() - osc.get(t - h).unwrap()) / (2.0 * h);
        let slope = osc.get_slope(t).unwrap();
        approx(slope, fd, 0.05 * slope.abs().max(1.0));
    }
}
