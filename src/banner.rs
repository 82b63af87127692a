//! Startup banner

use std::fmt::Write as _;
use std::net::SocketAddr;
use std::path::Path;

const ASCII_ART: &str = r"
___  ____  ____      ____  ____  ____  _  _  ____
/ __)(_  _)(  __)    / ___)(  __)(  _ \/ )( \(  __)
( (__   )(   ) _)____ \___ \ ) _)  )   /\ \/ / ) _)
\___) (__) (__)(____)(____/(____)(__\_) \__/ (____)
";

const RAINBOW: [&str; 6] = [
    "\x1b[31m", "\x1b[33m", "\x1b[32m", "\x1b[36m", "\x1b[34m", "\x1b[35m",
];
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

pub const RULE: &str = "------------------------------------------------------";

/// ASCII art with each character in the next rainbow color
pub fn rainbow_art() -> String {
    let mut out = String::with_capacity(ASCII_ART.len() * 10);
    for (i, c) in ASCII_ART.chars().enumerate() {
        let _ = write!(out, "{}{c}{RESET}", RAINBOW[i % RAINBOW.len()]);
    }
    out
}

pub fn serving_line(directory: &Path, addr: &SocketAddr) -> String {
    format!(
        "{GREEN}Serving {} on http://{addr}{RESET}",
        directory.display()
    )
}

pub fn print_banner() {
    println!("{}", rainbow_art());
}

pub fn print_serving(directory: &Path, addr: &SocketAddr, watch_stdin: bool) {
    println!("{RULE}");
    println!();
    println!("{}", serving_line(directory, addr));
    println!();
    if watch_stdin {
        println!("Press ENTER to stop the server...");
    }
}
