#![cfg(target_arch = "wasm32")]
use motionkit_wasm::{abi_version, MotionCycle, MotionSpline, MotionStop, MotionTimeCycles};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn spline_construct_setup_and_sample() {
    let mut spline = MotionSpline::new(JsValue::UNDEFINED).unwrap();
    spline.set_point(0, 0.0);
    spline.set_point(100, 1.0);
    spline.setup(JsValue::from_str("Linear")).unwrap();
    let v = spline.get(0.5).unwrap();
    assert!((v - 0.5).abs() < 1e-5);
}

#[wasm_bindgen_test]
fn spline_errors_surface_as_js_errors() {
    let mut spline = MotionSpline::new(JsValue::NULL).unwrap();
    assert!(spline.setup(JsValue::UNDEFINED).is_err()); // no keyframes
    assert!(spline.get(0.5).is_err()); // not set up
}

#[wasm_bindgen_test]
fn cycle_offset_only_signal() {
    let mut cycle = MotionCycle::new();
    for p in [0, 100] {
        cycle
            .set_point(
                p,
                JsValue::from_str("Sin"),
                None,
                JsValue::UNDEFINED,
                1.0,
                3.0,
                0.0,
                0.0,
            )
            .unwrap();
    }
    cycle.setup(0.0).unwrap();
    let v = cycle.get(0.25).unwrap();
    assert!((v - 3.0).abs() < 1e-3);
}

#[wasm_bindgen_test]
fn time_cycles_persist_phase_per_owner() {
    let mut tc = MotionTimeCycles::new(JsValue::UNDEFINED).unwrap();
    let owner = tc.alloc_owner();
    let handle = tc.create_cycle("alpha".into());
    tc.set_point(handle, 0, 1.0, 0.25, JsValue::from_str("Sin"), 0.0)
        .unwrap();
    tc.setup(handle, JsValue::UNDEFINED).unwrap();
    tc.set_start_time(handle, 0.0).unwrap();
    let v = tc.get(handle, owner, 0.0, 1e9).unwrap();
    assert!((v - 1.0).abs() < 1e-3); // quarter cycle sine peak
    assert!(tc.needs_next_frame(handle));
}

#[wasm_bindgen_test]
fn stop_logic_routes_and_errors() {
    let mut stop = MotionStop::new();
    assert!(stop.get_interpolation(0.1).is_err());
    stop.config(0.0, 1.0, 0.5, 2.0, 4.0, 4.0);
    assert!(stop.get_interpolation(0.1).unwrap() > 0.0);
    assert!(stop
        .spring_config(0.0, 1.0, 0.0, 0.0, 4.0, 1.0, 0.01, 0)
        .is_err()); // zero mass
}
