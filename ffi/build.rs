use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string()));
    let include_dir = crate_dir.join("include");

    let bindings = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("COMPANY_FFI_H")
        .generate();

    match bindings {
        Ok(bindings) => {
            if let Err(e) = std::fs::create_dir_all(&include_dir) {
                println!("cargo:warning=cannot create {}: {e}", include_dir.display());
                return;
            }
            bindings.write_to_file(include_dir.join("company_ffi.h"));
        }
        Err(e) => println!("cargo:warning=header generation failed: {e}"),
    }
}
