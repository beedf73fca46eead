//! Command: print version information.

/// Print the modpatcher version to stdout.
pub fn run() {
    let version = option_env!("MODPATCHER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    println!("modpatcher {version}");
}
