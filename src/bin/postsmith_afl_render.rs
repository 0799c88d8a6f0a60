//! AFL++ fuzz target for `postsmith`.
//!
//! stdin-driven so it can be used with AFL++. Build and run it via `cargo-afl`:
//!
//! ```bash
//! cargo install cargo-afl
//!
//! cargo afl build --release --features afl_fuzz --bin postsmith_afl_render
//!
//! mkdir -p fuzz/afl/in fuzz/afl/out
//! postsmith --example > fuzz/afl/in/example.json
//!
//! cargo afl fuzz -i fuzz/afl/in -o fuzz/afl/out target/release/postsmith_afl_render
//! ```
//!
//! Rust panics normally unwind and exit with a non-crashing status code.
//! AFL++ only treats crashes as signals/aborts, so any unwind becomes `abort()`.

use std::io::Read;

use postsmith::normalize::{parse, repair};
use postsmith::render::{render_basic, render_enhanced};

const MAX_INPUT_LEN: usize = 1_000_000; // 1MB guardrail; AFL++ will typically cap this anyway.

fn run_one_input(data: &[u8]) {
    if data.len() > MAX_INPUT_LEN {
        return;
    }

    // lossy conversion keeps the harness total for arbitrary bytes.
    let src = String::from_utf8_lossy(data).to_string();

    // repair is total and deterministic.
    let repaired = repair(&src);
    assert_eq!(repaired, repair(&src), "repair is not deterministic");

    // both renderers are total on any text, parsed or not.
    for text in [src.as_str(), repaired.as_str()] {
        let basic = render_basic(text);
        assert_eq!(basic, render_basic(text), "basic render is not deterministic");
        assert!(!basic.contains('\n'), "basic output kept a raw newline");

        let enhanced = render_enhanced(text);
        assert_eq!(enhanced, render_enhanced(text), "enhanced render is not deterministic");
    }

    // parse may fail, but never panics; a parsed body must render too.
    if let Ok(record) = parse(&src) {
        let _ = record.clone().into_valid();
        let _html = render_enhanced(&record.markdown_body);
    }
}

fn main() {
    let mut data = Vec::new();
    if std::io::stdin().read_to_end(&mut data).is_err() {
        return;
    }

    // convert any panic into an abort().
    if std::panic::catch_unwind(|| run_one_input(&data)).is_err() {
        std::process::abort();
    }
}
