#![forbid(unsafe_code)]

// Value exported when build information cannot be determined, such as
// when building from a source tarball outside of git.
const UNKNOWN: &str = "unknown";

fn main() {
    set_env("GIT_BRANCH", build_data::get_git_branch());
    set_env("GIT_COMMIT_SHORT", build_data::get_git_commit_short());
    set_env("GIT_DIRTY", build_data::get_git_dirty().map(|d| d.to_string()));
    set_env("SOURCE_TIMESTAMP", build_data::get_source_time().map(|t| t.to_string()));
    set_env("RUSTC_VERSION", build_data::get_rustc_version());

    // Tells cargo not to rebuild build.rs during debug builds when other files change.
    // This speeds up development builds.
    //build_data::no_debug_rebuilds();
}

// Export a compile time environment variable, substituting UNKNOWN on error.
fn set_env(name: &str, value: Result<String, String>) {
    let value = value.unwrap_or_else(|e| {
        println!("cargo:warning=Unable to determine {}: {}", name, e);
        UNKNOWN.to_string()
    });
    println!("cargo:rustc-env={}={}", name, value);
}
