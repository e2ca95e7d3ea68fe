const UNIT: i64 = 1024;
const SUFFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

/// Render a byte count in Kubernetes binary notation, e.g. `100Mi` or `1.5Gi`.
///
/// Values below 1024 have no unit. Values that are not a whole multiple of their largest
/// binary unit are rendered with one decimal digit.
pub fn format_memory_quantity(bytes: i64) -> String {
    if bytes < UNIT {
        return bytes.to_string();
    }

    let mut div = UNIT;
    let mut exp = 0usize;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    let suffix = SUFFIXES[exp];
    if bytes % div == 0 {
        format!("{}{suffix}i", bytes / div)
    } else {
        format!("{:.1}{suffix}i", bytes as f64 / div as f64)
    }
}
