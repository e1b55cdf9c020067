//! WASM entry point: mounts the architecture map app.

use architecture_map::{App, init_logging};
use leptos::prelude::*;

fn main() {
	init_logging();
	mount_to_body(App)
}
