//! Fuzz target for config parsing and resolution.
//!
//! Goal: parsing and resolving `ipcheck.toml` should **never panic**.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parse
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let _ = ipcheck_settings::parse_switch(Some(text));
    if let Ok(cfg) = ipcheck_settings::parse_config_toml(text) {
        let _ = ipcheck_settings::resolve_config(cfg, ipcheck_settings::Overrides::default());
    }
});
