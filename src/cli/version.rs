//! Version and usage output for the bidscope CLI.

/// The current version of bidscope, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text for `--help`.
pub const USAGE: &str = "\
Usage: bidscope [OPTIONS] <FREE TEXT>...

Describe your company or what you are looking for; the service turns it
into search keywords and streams matching bids.

Options:
  -s, --source <LIST>  Portals to search: gov, tokyo, kanagawa (comma separated,
                       repeatable; default: all)
      --url <URL>      Search service base URL (env: BIDSCOPE_BASE_URL)
  -V, --version        Print version
  -h, --help           Print this help";

/// Version line printed by `--version`.
pub fn version_line() -> String {
    format!("bidscope {}", VERSION)
}

/// Handle the --version command.
pub fn handle_version_command() {
    println!("{}", version_line());
}

/// Handle the --help command.
pub fn handle_help_command() {
    println!("{}", USAGE);
}
