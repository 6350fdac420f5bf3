fn main() {
    // enumgen.toml points the output at $OUT_DIR/enums.rs.
    if let Err(e) = enumgen_core::tooling::generate() {
        panic!("Enum generation failed during {}: {}", e.stage(), e);
    }
    println!("cargo:rerun-if-changed=enums.json");
    println!("cargo:rerun-if-changed=enumgen.toml");
}
