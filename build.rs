fn main() {
    // Stamped into the startup log line
    let build_date = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    println!("cargo:rustc-env=PARCELBUS_BUILD_DATE={build_date}");
    println!("cargo:rerun-if-changed=build.rs");
}
