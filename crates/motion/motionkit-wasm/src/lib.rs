use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use motionkit_core::{
    Config, CurveType, IdAllocator, KeyCache, KeyCycleOscillator, OwnerId, SplineSet, StopLogic,
    TimeCycleSplineSet, VariesBy, WaveShape,
};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn parse_curve_type(v: JsValue) -> Result<CurveType, JsError> {
    if jsvalue_is_undefined_or_null(&v) {
        return Ok(CurveType::default());
    }
    swb::from_value(v).map_err(|e| JsError::new(&format!("curve type error: {e}")))
}

fn parse_wave_shape(v: JsValue) -> Result<WaveShape, JsError> {
    if jsvalue_is_undefined_or_null(&v) {
        return Ok(WaveShape::default());
    }
    swb::from_value(v).map_err(|e| JsError::new(&format!("wave shape error: {e}")))
}

/// Keyframed scalar curve. Accumulate points, `setup`, then sample.
#[wasm_bindgen]
pub struct MotionSpline {
    core: SplineSet,
}

#[wasm_bindgen]
impl MotionSpline {
    /// Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new MotionSpline({ keyframe_capacity: 32 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<MotionSpline, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        Ok(MotionSpline {
            core: SplineSet::with_config(&cfg),
        })
    }

    /// Record a keyframe at `position` (0..=100).
    #[wasm_bindgen(js_name = set_point)]
    pub fn set_point(&mut self, position: i32, value: f32) {
        self.core.set_point(position, value);
    }

    /// Fit the curve. `curve_type` is "Spline" | "Linear" | "Constant"
    /// (undefined/null picks the default spline fit).
    #[wasm_bindgen]
    pub fn setup(&mut self, curve_type: JsValue) -> Result<(), JsError> {
        let ct = parse_curve_type(curve_type)?;
        self.core.setup(ct).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn get(&self, t: f32) -> Result<f32, JsError> {
        self.core.get(t).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = get_slope)]
    pub fn get_slope(&self, t: f32) -> Result<f32, JsError> {
        self.core
            .get_slope(t)
            .map_err(|e| JsError::new(&e.to_string()))
    }
}

/// Progress-driven cyclic perturbation (offset + wave * value).
#[wasm_bindgen]
pub struct MotionCycle {
    core: KeyCycleOscillator,
}

#[wasm_bindgen]
impl MotionCycle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> MotionCycle {
        console_error_panic_hook::set_once();
        MotionCycle {
            core: KeyCycleOscillator::new(),
        }
    }

    /// Record one wave point. `shape` is the wave shape name ("Sin",
    /// "Square", ...); `custom` supplies samples for the "Custom" shape;
    /// `varies_by` is "Progress" | "PathLength" or undefined.
    #[wasm_bindgen(js_name = set_point)]
    #[allow(clippy::too_many_arguments)]
    pub fn set_point(
        &mut self,
        position: i32,
        shape: JsValue,
        custom: Option<Vec<f32>>,
        varies_by: JsValue,
        period: f32,
        offset: f32,
        phase: f32,
        value: f32,
    ) -> Result<(), JsError> {
        let shape = parse_wave_shape(shape)?;
        let varies_by: Option<VariesBy> = if jsvalue_is_undefined_or_null(&varies_by) {
            None
        } else {
            Some(
                swb::from_value(varies_by)
                    .map_err(|e| JsError::new(&format!("varies_by error: {e}")))?,
            )
        };
        self.core.set_point(
            position,
            shape,
            custom.as_deref(),
            varies_by,
            period,
            offset,
            phase,
            value,
        );
        Ok(())
    }

    #[wasm_bindgen]
    pub fn setup(&mut self, path_length: f32) -> Result<(), JsError> {
        self.core
            .setup(path_length)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn get(&self, t: f32) -> Result<f32, JsError> {
        self.core.get(t).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = get_slope)]
    pub fn get_slope(&self, t: f32) -> Result<f32, JsError> {
        self.core
            .get_slope(t)
            .map_err(|e| JsError::new(&e.to_string()))
    }
}

impl Default for MotionCycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Wall-clock oscillation over a set of attributes sharing one phase cache.
/// One instance stands in for the host-side motion controller: it owns the
/// cache and hands out owner ids.
#[wasm_bindgen]
pub struct MotionTimeCycles {
    cache: KeyCache,
    ids: IdAllocator,
    cycles: Vec<TimeCycleSplineSet>,
}

#[wasm_bindgen]
impl MotionTimeCycles {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<MotionTimeCycles, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        Ok(MotionTimeCycles {
            cache: KeyCache::new(&cfg),
            ids: IdAllocator::new(),
            cycles: Vec::new(),
        })
    }

    /// Allocate an owner id for one animated object.
    #[wasm_bindgen(js_name = alloc_owner)]
    pub fn alloc_owner(&mut self) -> u32 {
        self.ids.alloc_owner().0
    }

    /// Create a cycle for `attribute`. Returns its handle (index).
    #[wasm_bindgen(js_name = create_cycle)]
    pub fn create_cycle(&mut self, attribute: String) -> u32 {
        self.cycles.push(TimeCycleSplineSet::new(attribute));
        (self.cycles.len() - 1) as u32
    }

    fn cycle_mut(&mut self, handle: u32) -> Result<&mut TimeCycleSplineSet, JsError> {
        self.cycles
            .get_mut(handle as usize)
            .ok_or_else(|| JsError::new(&format!("unknown cycle handle {handle}")))
    }

    #[wasm_bindgen(js_name = set_point)]
    pub fn set_point(
        &mut self,
        handle: u32,
        position: i32,
        value: f32,
        period: f32,
        shape: JsValue,
        offset: f32,
    ) -> Result<(), JsError> {
        let shape = parse_wave_shape(shape)?;
        self.cycle_mut(handle)?
            .set_point(position, value, period, shape, offset);
        Ok(())
    }

    #[wasm_bindgen(js_name = set_start_time)]
    pub fn set_start_time(&mut self, handle: u32, nanos: f64) -> Result<(), JsError> {
        self.cycle_mut(handle)?.set_start_time(nanos as i64);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn setup(&mut self, handle: u32, curve_type: JsValue) -> Result<(), JsError> {
        let ct = parse_curve_type(curve_type)?;
        self.cycle_mut(handle)?
            .setup(ct)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Evaluate one cycle for one owner at (progress, wall time in ns).
    #[wasm_bindgen]
    pub fn get(
        &mut self,
        handle: u32,
        owner: u32,
        progress: f32,
        time_nanos: f64,
    ) -> Result<f32, JsError> {
        let owner = OwnerId(owner);
        let cycle = self
            .cycles
            .get_mut(handle as usize)
            .ok_or_else(|| JsError::new(&format!("unknown cycle handle {handle}")))?;
        cycle
            .get(progress, time_nanos as i64, owner, &mut self.cache)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = needs_next_frame)]
    pub fn needs_next_frame(&self, handle: u32) -> bool {
        self.cycles
            .get(handle as usize)
            .is_some_and(|c| c.needs_next_frame())
    }

    /// Drop all persisted phases.
    #[wasm_bindgen(js_name = clear_cache)]
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

/// Settle-to-stop trajectory: kinematic profile or spring simulation.
#[wasm_bindgen]
pub struct MotionStop {
    core: StopLogic,
}

#[wasm_bindgen]
impl MotionStop {
    #[wasm_bindgen(constructor)]
    pub fn new() -> MotionStop {
        console_error_panic_hook::set_once();
        MotionStop {
            core: StopLogic::new(),
        }
    }

    #[wasm_bindgen]
    pub fn config(
        &mut self,
        current_pos: f32,
        destination: f32,
        current_velocity: f32,
        max_time: f32,
        max_acceleration: f32,
        max_velocity: f32,
    ) {
        self.core.config(
            current_pos,
            destination,
            current_velocity,
            max_time,
            max_acceleration,
            max_velocity,
        );
    }

    #[wasm_bindgen(js_name = spring_config)]
    #[allow(clippy::too_many_arguments)]
    pub fn spring_config(
        &mut self,
        current_pos: f32,
        target: f32,
        current_velocity: f32,
        mass: f32,
        stiffness: f32,
        damping: f32,
        stop_threshold: f32,
        boundary_mode: u8,
    ) -> Result<(), JsError> {
        self.core
            .spring_config(
                current_pos,
                target,
                current_velocity,
                mass,
                stiffness,
                damping,
                stop_threshold,
                boundary_mode,
            )
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = get_interpolation)]
    pub fn get_interpolation(&mut self, time: f32) -> Result<f32, JsError> {
        self.core
            .get_interpolation(time)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = get_velocity)]
    pub fn get_velocity(&self) -> f32 {
        self.core.get_velocity()
    }

    #[wasm_bindgen(js_name = is_stopped)]
    pub fn is_stopped(&self) -> bool {
        self.core.is_stopped()
    }

    #[wasm_bindgen]
    pub fn debug(&self, desc: String, time: f32) -> String {
        self.core.debug(&desc, time)
    }
}

impl Default for MotionStop {
    fn default() -> Self {
        Self::new()
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
