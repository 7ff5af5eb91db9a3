//! Formatting helpers for front ends

use std::path::Path;

const SUPPORTED_EXTENSIONS: &[&str] = &["wav"];

/// `MM:SS`, or `Unknown` for a missing or invalid duration.
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.is_finite() && s >= 0.0 => {
            let total = s as u64;
            format!("{:02}:{:02}", total / 60, total % 60)
        }
        _ => "Unknown".to_string(),
    }
}

/// Human-readable size such as `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

/// Whether the file extension is one the decoder can read.
pub fn is_supported_format<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn cpu_count() -> usize {
    num_cpus::get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Some(0.0)), "00:00");
        assert_eq!(format_duration(Some(61.9)), "01:01");
        assert_eq!(format_duration(Some(3599.0)), "59:59");
        assert_eq!(format_duration(None), "Unknown");
        assert_eq!(format_duration(Some(f64::NAN)), "Unknown");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512.0 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_supported_format() {
        assert!(is_supported_format("song.wav"));
        assert!(is_supported_format("SONG.WAV"));
        assert!(!is_supported_format("song.mp3"));
        assert!(!is_supported_format("noextension"));
    }

    #[test]
    fn test_cpu_count() {
        assert!(cpu_count() > 0);
    }
}
