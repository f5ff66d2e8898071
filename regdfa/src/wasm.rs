//! WebAssembly bindings for JavaScript
//!
//! This module exposes the conversion to a browser page using wasm-bindgen.
//! Enable with the "wasm" feature flag.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::context::Conversion;

/// JavaScript-facing conversion result
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct JsConversion {
    conversion: Conversion,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl JsConversion {
    /// Convert `expression` over `alphabet`
    ///
    /// Throws the error message as a string if the conversion fails
    #[wasm_bindgen(constructor)]
    pub fn new(alphabet: &str, expression: &str) -> Result<JsConversion, JsValue> {
        match crate::convert(alphabet, expression) {
            Ok(conversion) => Ok(JsConversion { conversion }),
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    /// The expression with explicit concatenation
    #[wasm_bindgen(getter)]
    pub fn normalized(&self) -> String {
        self.conversion.normalized.clone()
    }

    /// The postfix form
    #[wasm_bindgen(getter)]
    pub fn postfix(&self) -> String {
        self.conversion.postfix.clone()
    }

    /// The alphabet in column order, as one string
    #[wasm_bindgen(getter)]
    pub fn alphabet(&self) -> String {
        self.conversion.dfa.alphabet().iter().collect()
    }

    /// ID of the DFA start state
    #[wasm_bindgen(getter)]
    pub fn start(&self) -> usize {
        self.conversion.dfa.start()
    }

    /// Number of DFA states
    #[wasm_bindgen(getter, js_name = stateCount)]
    pub fn state_count(&self) -> usize {
        self.conversion.dfa.len()
    }

    /// IDs of the final DFA states
    #[wasm_bindgen(getter, js_name = finalStates)]
    pub fn final_states(&self) -> js_sys::Array {
        self.conversion
            .dfa
            .final_states()
            .into_iter()
            .map(|id| JsValue::from_f64(id as f64))
            .collect()
    }

    /// Every transition as a `{ from, symbol, to }` object
    #[wasm_bindgen(js_name = transitions)]
    pub fn transitions(&self) -> Result<js_sys::Array, JsValue> {
        let array = js_sys::Array::new();

        for (from, symbol, to) in self.conversion.dfa.transitions() {
            let obj = js_sys::Object::new();
            js_sys::Reflect::set(&obj, &"from".into(), &JsValue::from_f64(from as f64))?;
            js_sys::Reflect::set(&obj, &"symbol".into(), &JsValue::from_str(&symbol.to_string()))?;
            js_sys::Reflect::set(&obj, &"to".into(), &JsValue::from_f64(to as f64))?;
            array.push(&obj);
        }

        Ok(array)
    }
}

/// Initialize panic hook for better error messages in WASM
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}
