use std::process::Command;

fn main() {
    let mut version = env!("CARGO_PKG_VERSION").to_string();

    // Append a short git sha when available so the boot banner identifies
    // dev builds; CI can inject GIT_SHA when no .git directory exists
    let sha = std::env::var("GIT_SHA")
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(|| {
            Command::new("git")
                .args(["rev-parse", "--short", "HEAD"])
                .output()
                .ok()
                .filter(|o| o.status.success())
                .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
                .filter(|s| !s.is_empty())
        });
    if let Some(sha) = sha {
        version = format!("{}+{}", version, sha);
    }

    println!("cargo:rustc-env=APP_VERSION={}", version);
    println!("cargo:rerun-if-env-changed=GIT_SHA");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
