use std::env;
use std::path::PathBuf;

/// Default install locations of the pylon SDK, checked when `PYLON_ROOT`
/// is not set. The Linux installer unpacks to /opt/pylon.
const DEFAULT_ROOTS: &[&str] = &["/opt/pylon", "/opt/pylon5"];

fn main() {
    println!("cargo:rerun-if-env-changed=PYLON_ROOT");

    if env::var_os("CARGO_FEATURE_NO_NATIVE").is_some() {
        return;
    }

    let root = match pylon_root() {
        Some(root) => root,
        None => {
            // Declarations still compile; only linking needs the SDK.
            println!(
                "cargo:warning=pylon SDK not found (set PYLON_ROOT); \
                 skipping link directives"
            );
            return;
        }
    };

    for lib_dir in ["lib", "lib64"] {
        let dir = root.join(lib_dir);
        if dir.is_dir() {
            println!("cargo:rustc-link-search=native={}", dir.display());
        }
    }
    println!("cargo:rustc-link-lib=dylib=pylonc");
}

fn pylon_root() -> Option<PathBuf> {
    if let Some(root) = env::var_os("PYLON_ROOT") {
        return Some(PathBuf::from(root));
    }
    DEFAULT_ROOTS
        .iter()
        .map(PathBuf::from)
        .find(|root| root.is_dir())
}
