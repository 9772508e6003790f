use std::process::Command;

fn main() {
    // Rerun if environment variables change
    println!("cargo:rerun-if-env-changed=BUILD_INFO");

    let build_info = generate_build_info();
    println!("cargo:rustc-env=BUILD_INFO={}", build_info);

    // Rerun if .git/HEAD changes
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/refs/heads");
}

fn generate_build_info() -> String {
    // CI/CD provides the full string
    if let Ok(info) = std::env::var("BUILD_INFO") {
        return info;
    }

    let base_version = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
    let commit_hash = get_commit_hash().unwrap_or_else(|| "unknown".to_string());
    let dirty_suffix = if is_dirty() { "-dirty" } else { "" };

    format!("{}+{}{}", base_version, commit_hash, dirty_suffix)
}

fn get_commit_hash() -> Option<String> {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
        .map(|s| s.trim().to_string())
}

fn is_dirty() -> bool {
    Command::new("git")
        .args(["diff", "--quiet"])
        .status()
        .map(|status| !status.success())
        .unwrap_or(false)
}
