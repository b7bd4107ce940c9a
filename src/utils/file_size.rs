const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Short size label for the download link, e.g. `48.2 KB`.
pub fn human_size(len: usize) -> String {
    let mut size = len as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    match unit {
        0 => format!("{} {}", len, UNITS[0]),
        _ => format!("{:.1} {}", size, UNITS[unit]),
    }
}
