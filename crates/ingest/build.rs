// Exposes the version of the compiler building this crate as
// `KURA_RUSTC_VERSION`, e.g. `rustc 1.92.0 (ded5c06cf 2025-12-08)`.
fn main() {
    println!("cargo:rerun-if-env-changed=RUSTC");
    let version = match rustc_version::version_meta() {
        Ok(meta) => meta.short_version_string,
        Err(err) => {
            println!("cargo:warning=could not determine the rustc version: {err}");
            "rustc unknown".to_string()
        },
    };
    println!("cargo:rustc-env=KURA_RUSTC_VERSION={version}");
}
