//! WebAssembly bindings for the sprite editor.
//!
//! Provides a thin wrapper around [`ImageEditor`] for the browser host: the
//! host owns rendering, tools and dialogs and talks to the core through the
//! methods below.

use log::warn;
use wasm_bindgen::prelude::*;

use crate::{
    bitmap::{Bitmap, LiteralFormat},
    editor::{Command, CommandOutcome, ImageEditor},
    persist::Snapshot,
    schema::EditorConfig,
};

/// Initialize WASM module with panic hook and logging.
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages in browser
    console_error_panic_hook::set_once();

    // Initialize WASM logger
    wasm_logger::init(wasm_logger::Config::default());
}

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_format(format: &str) -> Result<LiteralFormat, JsValue> {
    format.parse().map_err(to_js)
}

/// WebAssembly wrapper for one editing session.
#[wasm_bindgen]
pub struct WasmImageEditor {
    editor: ImageEditor,
}

#[wasm_bindgen]
impl WasmImageEditor {
    /// Create a new session.
    ///
    /// # Arguments
    /// * `config_json` - Optional JSON string containing EditorConfig
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WasmImageEditor, JsValue> {
        let config: EditorConfig = match config_json {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| JsValue::from_str(&format!("Invalid config JSON: {e}")))?,
            None => EditorConfig::default(),
        };
        let editor = ImageEditor::new(config).map_err(to_js)?;
        Ok(WasmImageEditor { editor })
    }

    /// Start a single-frame session from a row-major pixel buffer.
    #[wasm_bindgen(js_name = initSingleFrame)]
    pub fn init_single_frame(
        &mut self,
        width: usize,
        height: usize,
        pixels: Vec<u8>,
    ) -> Result<(), JsValue> {
        let bitmap = Bitmap::from_buffer(width, height, pixels).map_err(to_js)?;
        self.editor.init_single_frame(bitmap).map_err(to_js)
    }

    /// Start an animation from an array of `{ width, height, data }` objects.
    #[wasm_bindgen(js_name = initAnimation)]
    pub fn init_animation(&mut self, frames: JsValue, interval: u32) -> Result<(), JsValue> {
        let frames: Vec<Bitmap> = serde_wasm_bindgen::from_value(frames)
            .map_err(|e| JsValue::from_str(&format!("Invalid frames: {e}")))?;
        self.editor.init_animation(frames, interval).map_err(to_js)
    }

    /// Replace the current frame's pixels.
    #[wasm_bindgen(js_name = setCurrentFrame)]
    pub fn set_current_frame(
        &mut self,
        width: usize,
        height: usize,
        pixels: Vec<u8>,
    ) -> Result<(), JsValue> {
        let bitmap = Bitmap::from_buffer(width, height, pixels).map_err(to_js)?;
        self.editor.image_edit(bitmap).map_err(to_js)
    }

    /// Canvas size changed: return to auto-fit zoom.
    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&mut self) {
        self.editor.change_zoom(0);
    }

    #[wasm_bindgen(js_name = changeZoom)]
    pub fn change_zoom(&mut self, delta: i32) {
        self.editor.change_zoom(delta);
    }

    /// Returns false when there was nothing to undo.
    #[wasm_bindgen]
    pub fn undo(&mut self) -> bool {
        self.editor.undo() == CommandOutcome::Applied
    }

    /// Returns false when there was nothing to redo.
    #[wasm_bindgen]
    pub fn redo(&mut self) -> bool {
        self.editor.redo() == CommandOutcome::Applied
    }

    #[wasm_bindgen(js_name = advanceFrame)]
    pub fn advance_frame(&mut self, direction: i32) -> Result<(), JsValue> {
        self.editor
            .apply(Command::AdvanceFrame(direction))
            .map(|_| ())
            .map_err(to_js)
    }

    /// Literal for the current frame. `format` is `"ts"` or `"py"`.
    #[wasm_bindgen(js_name = getCurrentFrame)]
    pub fn get_current_frame(&self, format: &str) -> Result<String, JsValue> {
        self.editor
            .current_frame_literal(parse_format(format)?)
            .map_err(to_js)
    }

    /// Bracketed list of literals for every frame.
    #[wasm_bindgen(js_name = getAllFrames)]
    pub fn get_all_frames(&self, format: &str) -> Result<String, JsValue> {
        Ok(self.editor.all_frames_literal(parse_format(format)?))
    }

    /// Rendered pixel buffers of every frame, as an array of `Uint8Array`.
    #[wasm_bindgen(js_name = getFrameBuffers)]
    pub fn get_frame_buffers(&self) -> js_sys::Array {
        self.editor
            .present()
            .frames()
            .iter()
            .map(|frame| js_sys::Uint8Array::from(frame.project_to_bitmap().as_slice()))
            .collect()
    }

    #[wasm_bindgen(js_name = getInterval)]
    pub fn get_interval(&self) -> u32 {
        self.editor.interval()
    }

    #[wasm_bindgen(js_name = getCurrentFrameIndex)]
    pub fn get_current_frame_index(&self) -> usize {
        self.editor.present().current_frame_index()
    }

    #[wasm_bindgen(js_name = getZoom)]
    pub fn get_zoom(&self) -> i32 {
        self.editor.present().zoom()
    }

    /// Snapshot of editor settings and the visible timeline.
    #[wasm_bindgen(js_name = getPersistentData)]
    pub fn get_persistent_data(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.editor.persistent_data())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Restore a snapshot. `undefined`, `null` or malformed data keep the
    /// current session. Returns whether anything was restored.
    #[wasm_bindgen(js_name = restorePersistentData)]
    pub fn restore_persistent_data(&mut self, value: JsValue) -> bool {
        let snapshot = if value.is_undefined() || value.is_null() {
            None
        } else {
            match serde_wasm_bindgen::from_value::<Snapshot>(value) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!("Ignoring malformed snapshot: {e}");
                    None
                }
            }
        };
        self.editor.restore_persistent_data(snapshot)
    }
}
