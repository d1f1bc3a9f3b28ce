use counter_core::{
    ControlLatency, CoreConfig, EdgeOutcome, PinAdapter, PinInputs, TraceEvent, TraceSink,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

macro_rules! console_log {
    ($($t:tt)*) => {{
        let message = format!($($t)*);
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&JsValue::from_str(&message));
        #[cfg(not(target_arch = "wasm32"))]
        drop(message);
    }};
}

/// JS-compatible record of one clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasmEdge {
    pub outcome: EdgeOutcome,
    pub uo_out: u8,
    /// Zero-based edge index, as in trace events.
    pub edge: u64,
}

/// Forwards trace events to the browser console.
struct ConsoleTrace;

impl TraceSink for ConsoleTrace {
    fn on_event(&mut self, event: TraceEvent) {
        if let TraceEvent::EdgeCommitted {
            edge,
            before,
            after,
            outcome,
        } = event
        {
            console_log!("edge {edge}: {before:#04X} -> {after:#04X} ({outcome:?})");
        }
    }
}

#[wasm_bindgen]
pub struct WasmCounter {
    tile: PinAdapter,
    pins: PinInputs,
    last: Option<WasmEdge>,
}

impl Default for WasmCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmCounter {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CoreConfig::default())
    }

    /// Creates a counter whose control inputs take effect one edge late.
    #[must_use]
    pub fn registered() -> Self {
        Self::with_config(CoreConfig {
            control_latency: ControlLatency::Registered,
            ..CoreConfig::default()
        })
    }

    /// Enables or disables console tracing of committed edges.
    pub fn set_trace(&mut self, enabled: bool) {
        let config = CoreConfig {
            tracing_enabled: enabled,
            ..*self.tile.core().config()
        };
        let state = *self.tile.core().state();
        self.tile = PinAdapter::from_state(state, config);
    }

    /// Drives the logical reset level sampled on subsequent edges.
    pub fn reset(&mut self, active: bool) {
        self.pins.rst_n = !active;
    }

    /// Applies one rising edge and returns the dedicated output byte.
    pub fn tick(&mut self, ctrl_byte: u8, data: u8) -> u8 {
        self.pins.uio_in = ctrl_byte;
        self.pins.ui_in = data;

        let outcome = self.tile.clock_traced(&self.pins, &mut ConsoleTrace);
        let uo_out = self.tile.outputs().uo_out;
        self.last = Some(WasmEdge {
            outcome,
            uo_out,
            edge: self.tile.core().edges().saturating_sub(1),
        });
        uo_out
    }

    /// Reads the count gated by `oe` without clocking.
    #[must_use]
    pub fn read(&self, oe: bool) -> u8 {
        self.tile.core().read(oe)
    }

    #[must_use]
    pub fn count(&self) -> u8 {
        self.tile.core().count()
    }

    #[must_use]
    pub fn edges(&self) -> u64 {
        self.tile.core().edges()
    }

    /// Clocks one edge per `(ctrl[i], data[i])` pair and returns the output
    /// after each edge. Extra entries in the longer slice are ignored.
    pub fn run_vector(&mut self, ctrl: &[u8], data: &[u8]) -> js_sys::Uint8Array {
        let outputs = self.drive_vector(ctrl, data);
        js_sys::Uint8Array::from(outputs.as_slice())
    }

    /// Returns the full core state as a JS object.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the state cannot be converted.
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.tile.core().state()).map_err(Into::into)
    }

    /// Returns the most recent edge record, or `null` before the first edge.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the record cannot be converted.
    pub fn last_edge(&self) -> Result<JsValue, JsValue> {
        match self.last {
            Some(edge) => serde_wasm_bindgen::to_value(&edge).map_err(Into::into),
            None => Ok(JsValue::NULL),
        }
    }
}

impl WasmCounter {
    fn with_config(config: CoreConfig) -> Self {
        console_error_panic_hook::set_once();
        console_log!("counter ready ({:?} control)", config.control_latency);
        Self {
            tile: PinAdapter::new(config),
            pins: PinInputs::default(),
            last: None,
        }
    }

    fn drive_vector(&mut self, ctrl: &[u8], data: &[u8]) -> Vec<u8> {
        ctrl.iter()
            .zip(data)
            .map(|(&ctrl_byte, &value)| self.tick(ctrl_byte, value))
            .collect()
    }
}
