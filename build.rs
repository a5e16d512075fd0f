use std::path::Path;

/// Optional `KEY=value` lines baked in as defaults for the preview binary.
const CREDS_FILE: &str = "freebusy-creds";

fn main() {
    println!("cargo:rerun-if-changed={CREDS_FILE}");
    if !Path::new(CREDS_FILE).exists() {
        return;
    }
    let creds_lines = match std::fs::read_to_string(CREDS_FILE) {
        Ok(lines) => lines,
        Err(e) => {
            println!("cargo:warning=failed to read {CREDS_FILE}: {e}");
            return;
        }
    };
    for line in creds_lines.lines() {
        let val_pair = line.trim_start().trim_end();
        if !val_pair.is_empty() && !val_pair.starts_with('#') && val_pair.contains('=') {
            println!("cargo:rustc-env={val_pair}")
        }
    }
}
