//! Build script for reclaim.
//!
//! Emits build-time notes about feature combinations that affect runtime
//! behavior.

use std::env;

fn main() {
    // Re-run if features change
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_DEBUG");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_PARKING_LOT");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_DIAGNOSTICS");

    let debug_enabled = env::var("CARGO_FEATURE_DEBUG").is_ok();
    let parking_lot_enabled = env::var("CARGO_FEATURE_PARKING_LOT").is_ok();
    let diagnostics_enabled = env::var("CARGO_FEATURE_DIAGNOSTICS").is_ok();

    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let is_release = profile == "release";

    if debug_enabled {
        emit_note("debug features enabled: poison-fill defaults on, double-free reports carry free-site backtraces");
        if is_release {
            emit_warning("debug features enabled in release build; backtrace capture on every free is not cheap");
        }
    }

    if is_release && !parking_lot_enabled {
        emit_note("tip: the 'parking_lot' feature swaps in faster mutexes for the slot table");
    }

    if is_release && !diagnostics_enabled {
        emit_note("release builds stay silent on misuse; enable 'diagnostics' to keep coded stderr reports");
    }
}

fn emit_note(msg: &str) {
    println!("cargo:warning=[reclaim] {}", msg);
}

fn emit_warning(msg: &str) {
    println!("cargo:warning=[reclaim] warning: {}", msg);
}
