//! WASM bindings for slot-engine.
//!
//! Exposes slot computation, slot checks and schedule resolution to the
//! booking page via `wasm-bindgen`. All complex types are passed as JSON
//! strings in the same shape the `slots` CLI reads.
//!
//! There is no clock inside the WASM module: requests must carry `now`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use serde::Serialize;
use slot_engine::schedule::{resolve, DayResolution};
use slot_engine::{AvailabilityRequest, WeeklySchedule, DEFAULT_STEP_MINUTES};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayDto {
    is_day_off: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_time: Option<String>,
}

impl From<DayResolution> for DayDto {
    fn from(resolution: DayResolution) -> Self {
        match resolution {
            DayResolution::Open(window) => Self {
                is_day_off: false,
                start_time: Some(window.start().to_string()),
                end_time: Some(window.end().to_string()),
            },
            DayResolution::Closed => Self {
                is_day_off: true,
                start_time: None,
                end_time: None,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// JSON-in / JSON-out cores, kept free of JsValue so they run on any target
// ---------------------------------------------------------------------------

fn parse_request(request_json: &str) -> Result<AvailabilityRequest, String> {
    serde_json::from_str(request_json).map_err(|e| format!("Invalid request JSON: {}", e))
}

fn slots_json(request_json: &str) -> Result<String, String> {
    let request = parse_request(request_json)?;
    let slots = request
        .evaluate(None, DEFAULT_STEP_MINUTES)
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&slots).map_err(|e| format!("Serialization error: {}", e))
}

fn check_slot(request_json: &str, slot_time: &str) -> Result<bool, String> {
    let request = parse_request(request_json)?;
    request
        .admits(slot_time, None, DEFAULT_STEP_MINUTES)
        .map_err(|e| e.to_string())
}

fn day_json(schedule_json: &str, date: &str) -> Result<String, String> {
    let schedule: WeeklySchedule = serde_json::from_str(schedule_json)
        .map_err(|e| format!("Invalid schedule JSON: {}", e))?;
    let resolution = resolve(&schedule, date).map_err(|e| e.to_string())?;
    serde_json::to_string(&DayDto::from(resolution))
        .map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute the bookable slots for an availability request.
///
/// `request_json` has the shape
/// `{ providerSchedule, date, serviceDuration, busyAppointments, now, step? }`.
/// Returns a JSON array of `HH:MM` strings, ascending.
#[wasm_bindgen(js_name = "computeAvailableSlots")]
pub fn compute_available_slots(request_json: &str) -> Result<String, JsValue> {
    slots_json(request_json).map_err(|e| JsValue::from_str(&e))
}

/// Whether `slot_time` (`HH:MM`) is one of the slots the request would offer.
#[wasm_bindgen(js_name = "isSlotAvailable")]
pub fn is_slot_available(request_json: &str, slot_time: &str) -> Result<bool, JsValue> {
    check_slot(request_json, slot_time).map_err(|e| JsValue::from_str(&e))
}

/// Resolve a `YYYY-MM-DD` date against a weekly schedule.
///
/// Returns `{ isDayOff, startTime?, endTime? }` as a JSON string.
#[wasm_bindgen(js_name = "resolveDay")]
pub fn resolve_day(schedule_json: &str, date: &str) -> Result<String, JsValue> {
    day_json(schedule_json, date).map_err(|e| JsValue::from_str(&e))
}
