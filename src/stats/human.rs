// Byte counts as "<n> <unit>", stopping at TB.

const SUFFIXES: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

pub fn int_bytes_human_readable(size: i64) -> String {
    let mut size = size;
    let mut index = 0;
    while size >= 1024 && index != SUFFIXES.len() - 1 {
        index += 1;
        size >>= 10;
    }
    format!("{} {}", size, SUFFIXES[index])
}

pub fn float_bytes_human_readable(size: f64, precision: usize) -> String {
    let mut size = size;
    let mut index = 0;
    while size >= 1024.0 && index != SUFFIXES.len() - 1 {
        index += 1;
        size /= 1024.0;
    }
    format!("{:.*} {}", precision, size, SUFFIXES[index])
}
