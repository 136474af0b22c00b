// Build script for cardano-key-wallet-ffi
// Generates C header file using cbindgen

use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let output_path = PathBuf::from(&crate_dir).join("include/cardano_key_wallet_ffi.h");

    // Create include directory if it doesn't exist
    std::fs::create_dir_all(output_path.parent().unwrap()).ok();

    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(cbindgen::Config::from_file("cbindgen.toml").unwrap_or_default())
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(&output_path);
        }
        Err(e) => {
            println!("cargo:warning=Failed to generate C header: {}", e);
        }
    }
}
