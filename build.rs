use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed=LNB_VERSION");

    // Explicit override wins, e.g. for release pipelines building from a tarball.
    if let Ok(version) = std::env::var("LNB_VERSION") {
        println!("cargo:rustc-env=LNB_VERSION={}", version);
        return;
    }

    let output = Command::new("git")
        .args(["describe", "--tags", "--dirty"])
        .output();

    let version = match output {
        Ok(o) if o.status.success() => {
            let git_output = String::from_utf8(o.stdout)
                .unwrap_or_default()
                .trim()
                .to_string();

            // Strip 'v' prefix if present (e.g., "v1.0.0" -> "1.0.0")
            let version = git_output.strip_prefix('v').unwrap_or(&git_output);

            if version.is_empty() || version.ends_with("-dirty") {
                "dev".to_string()
            } else {
                version.to_string()
            }
        }
        // No git, or no tags yet
        _ => "dev".to_string(),
    };

    println!("cargo:rustc-env=LNB_VERSION={}", version);
}
