use std::path::Path;

use crate::constants::{MIB, PASSWORD_MASK_CHAR};

/// Parses a raw input text the way a web form numeric input is coerced
///
/// Leading and trailing whitespace is ignored, an empty text is zero and
/// `0x`, `0o` and `0b` prefixed integers are accepted. `Infinity` and values
/// too large for f64 are infinite. Returns None when the text is not a number
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix_prefixed = s.get(..2).and_then(|p| match p {
        "0x" | "0X" => Some(16),
        "0o" | "0O" => Some(8),
        "0b" | "0B" => Some(2),
        _ => None,
    });
    if let Some(radix) = radix_prefixed {
        return u64::from_str_radix(&s[2..], radix).ok().map(|v| v as f64);
    }

    // Rust also accepts "inf" and "nan" spellings which a form input does not
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }

    s.parse::<f64>().ok().filter(|v| !v.is_nan())
}

// 'as' casts from f64 saturate at the integer bounds
pub fn round_to_i32(value: f64) -> i32 {
    value.round() as i32
}

pub fn round_to_i64(value: f64) -> i64 {
    value.round() as i64
}

/// Converts a size in whole megabytes to bytes
pub fn mib_to_bytes(megabytes: i64) -> i64 {
    megabytes.saturating_mul(MIB)
}

/// Size in bytes shown as megabytes, rounded to the nearest whole number
pub fn bytes_to_mib(bytes: i64) -> i64 {
    (bytes as f64 / MIB as f64).round() as i64
}

/// Masked placeholder shown in place of the password
pub fn password_placeholder(password_length: usize) -> String {
    std::iter::repeat(PASSWORD_MASK_CHAR)
        .take(password_length)
        .collect()
}

pub fn file_name(full_file_uri: &str) -> Option<String> {
    let p = Path::new(full_file_uri);
    p.file_name().map(|s| s.to_string_lossy().to_string())
}

/// Forms a download file name as '<name>.<extension>'
pub fn download_file_name(name: &str, extension: &str) -> String {
    format!("{}.{}", name, extension)
}

#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = env_logger::builder()
        // Include all events in tests
        .filter_level(log::LevelFilter::max())
        // Ensure events are captured by `cargo test`
        .is_test(true)
        // Ignore errors initializing the logger if tests race to configure it
        .try_init();
}
