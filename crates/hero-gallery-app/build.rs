use std::fs;
use std::path::PathBuf;

fn main() {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let version_path = manifest_dir
        .ancestors()
        .nth(2)
        .expect("workspace root above crates/<name>")
        .join("VERSION");

    println!("cargo:rerun-if-changed={}", version_path.display());

    let raw = fs::read_to_string(&version_path).expect("read VERSION file");
    let version = raw.lines().next().unwrap_or_default().trim();
    assert!(
        !version.is_empty() && version.split('.').count() == 3,
        "VERSION must hold a MAJOR.MINOR.PATCH version on its first line, got {version:?}"
    );

    println!("cargo:rustc-env=HERO_GALLERY_VERSION={version}");
}
