// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::env::var("OUT_DIR")?;
    let path = std::path::Path::new(&out_dir).join("env_vars.rs");
    let mut f = std::fs::File::create(path)?;

    let vars = [
        ("ANTHROPIC_API_KEY", "ANTHROPIC_API_KEY"),
        ("ANTHROPIC_BASE_URL", "ANTHROPIC_BASE_URL"),
        ("BUGTRACKER_BIND", "BUGTRACKER_BIND"),
        ("BUGTRACKER_DATABASE", "BUGTRACKER_DATABASE"),
        ("BUGTRACKER_ALLOWED_ORIGIN", "BUGTRACKER_ALLOWED_ORIGIN"),
        ("BUGTRACKER_MODEL", "BUGTRACKER_MODEL"),
        ("RUST_LOG", "RUST_LOG"),
    ];

    for (const_name, env_name) in &vars {
        writeln!(f, "pub const {const_name}: &str = \"{env_name}\";")?;
    }

    Ok(())
}
