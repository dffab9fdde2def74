use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

fn main() {
    // Packaged source tarballs have no .git; let the packager pin the commit.
    let commit = std::env::var("NAVTO_BUILD_COMMIT").ok().unwrap_or_else(|| {
        let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".into());
        let dirty = git(&["status", "--porcelain"]).is_some_and(|s| !s.is_empty());
        if dirty { format!("{hash}-dirty") } else { hash }
    });

    println!("cargo:rustc-env=NAVTO_BUILD_COMMIT={commit}");

    println!("cargo:rerun-if-env-changed=NAVTO_BUILD_COMMIT");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
}
