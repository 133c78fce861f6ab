// File: crates/chartkit-core/build.rs
// Summary: Links the Windows registry API that Skia's font manager needs on that platform.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW and friends, used when enumerating system fonts
        println!("cargo:rustc-link-lib=advapi32");
    }
}
