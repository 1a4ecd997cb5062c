//! Build script compiling the native (C) deduplication variant.

use std::env;

fn main() {
    println!("cargo:rustc-check-cfg=cfg(c_implementation_active)");
    println!("cargo:rerun-if-changed=build.rs");

    let probe = cc::Build::new();
    let compiler = probe.get_compiler();

    let compiler_name = if compiler.is_like_msvc() {
        "MSVC"
    } else if compiler.is_like_clang() {
        // Vanilla Clang shares its backend with rustc, which makes the
        // comparison meaningless; only Apple's toolchain is accepted.
        if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "macos" {
            println!("cargo:warning=Vanilla Clang detected. C implementation disabled (requires GCC, MSVC, or Apple Clang).");
            return;
        }
        "Apple Clang"
    } else if compiler.is_like_gnu() {
        "GCC"
    } else {
        println!("cargo:warning=C compiler is not compatible (needs GCC, Apple Clang, or MSVC). C implementation disabled.");
        return;
    };

    let sources: Vec<_> = match glob::glob("src/**/*.c") {
        Ok(paths) => paths.filter_map(|entry| entry.ok()).collect(),
        Err(e) => {
            println!("cargo:warning=Failed to scan for C sources: {}", e);
            return;
        }
    };
    if sources.is_empty() {
        return;
    }

    let mut build = cc::Build::new();
    for file in &sources {
        println!("cargo:rerun-if-changed={}", file.display());
        build.file(file);
    }

    let rustflags = env::var("RUSTFLAGS").unwrap_or_default();
    let encoded = env::var("CARGO_ENCODED_RUSTFLAGS").unwrap_or_default();
    if rustflags.contains("target-cpu=native") || encoded.contains("target-cpu=native") {
        build.flag_if_supported("-march=native");
    }

    build.opt_level(3).warnings(true).compile("unique_types_c");

    println!("cargo:rustc-cfg=c_implementation_active");
    println!("cargo:rustc-env=C_COMPILER_NAME={}", compiler_name);
}
