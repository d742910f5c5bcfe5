//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `registro_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use registro_core::db::open_db_in_memory;

fn main() {
    println!("registro_core version={}", registro_core::core_version());

    match open_db_in_memory() {
        Ok(_) => println!(
            "registro_core schema={}",
            registro_core::db::migrations::latest_version()
        ),
        Err(err) => {
            eprintln!("registro_core db bootstrap failed: {err}");
            std::process::exit(1);
        }
    }
}
