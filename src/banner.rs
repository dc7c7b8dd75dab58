// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    let banner = r#"
  ____                _            _   ____
 / ___|___  _ __   __| |_   _  ___| |_|  _ \  ___   ___
| |   / _ \| '_ \ / _` | | | |/ __| __| | | |/ _ \ / __|
| |__| (_) | | | | (_| | |_| | (__| |_| |_| | (_) | (__
 \____\___/|_| |_|\__,_|\__,_|\___|\__|____/ \___/ \___|

    AI-Powered Python Documentation Generator
"#;
    println!("{}", banner);
}
