use crate::types::{ContainerRequestTotals, ContainerUsageTotals};

/// Parse a Kubernetes CPU quantity ("250m", "1", "0.5", "1000000n") into
/// millicores.
pub fn parse_cpu_to_millicores(q: &str) -> Option<i64> {
    let q = q.trim();
    if q.is_empty() {
        return None;
    }
    if let Some(stripped) = q.strip_suffix('n') {
        let nanos = stripped.parse::<i128>().ok()?;
        return Some((nanos / 1_000_000) as i64);
    }
    if let Some(stripped) = q.strip_suffix('u') {
        let micros = stripped.parse::<i128>().ok()?;
        return Some((micros / 1_000) as i64);
    }
    if let Some(stripped) = q.strip_suffix('m') {
        return stripped.parse::<i64>().ok();
    }
    // bare quantity is cores, integer or fractional
    q.parse::<f64>().ok().map(|cores| (cores * 1000.0).round() as i64)
}

/// Parse a Kubernetes memory quantity ("512Mi", "1G", "1024") into bytes.
pub fn parse_memory_to_bytes(q: &str) -> Option<i64> {
    let q = q.trim();
    if q.is_empty() {
        return None;
    }

    // Binary suffixes must be tried before decimal ones ("Ki" before "K")
    const UNITS: &[(&str, i64)] = &[
        ("Ki", 1024),
        ("Mi", 1024 * 1024),
        ("Gi", 1024 * 1024 * 1024),
        ("Ti", 1024_i64.pow(4)),
        ("Pi", 1024_i64.pow(5)),
        ("Ei", 1024_i64.pow(6)),
        ("K", 1000),
        ("M", 1000 * 1000),
        ("G", 1000 * 1000 * 1000),
        ("T", 1000_i64.pow(4)),
        ("P", 1000_i64.pow(5)),
        ("E", 1000_i64.pow(6)),
        ("k", 1000),
    ];

    for (suffix, multiplier) in UNITS {
        if let Some(stripped) = q.strip_suffix(suffix) {
            let v = stripped.parse::<f64>().ok()?;
            return Some((v * (*multiplier as f64)).round() as i64);
        }
    }
    // bytes without suffix
    q.parse::<i64>().ok()
}

/// CPU and memory usage as percentages of the container's requests.
/// A missing or zero request yields None for that resource.
pub fn compute_utilization_percentages(
    usage: &ContainerUsageTotals,
    requests: &ContainerRequestTotals,
) -> (Option<f64>, Option<f64>) {
    let cpu_pct = match requests.cpu_millicores {
        Some(req_mc) if req_mc > 0 => {
            Some((usage.cpu_millicores as f64) / (req_mc as f64) * 100.0)
        }
        _ => None,
    };
    let mem_pct = match requests.memory_bytes {
        Some(req_b) if req_b > 0 => Some((usage.memory_bytes as f64) / (req_b as f64) * 100.0),
        _ => None,
    };
    (cpu_pct, mem_pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cpu_to_millicores() {
        // nanocores and microcores
        assert_eq!(parse_cpu_to_millicores("1000000000n"), Some(1000));
        assert_eq!(parse_cpu_to_millicores("500000000n"), Some(500));
        assert_eq!(parse_cpu_to_millicores("1000000u"), Some(1000));

        // millicores
        assert_eq!(parse_cpu_to_millicores("100m"), Some(100));
        assert_eq!(parse_cpu_to_millicores("1500m"), Some(1500));

        // bare cores, integer or fractional
        assert_eq!(parse_cpu_to_millicores("1"), Some(1000));
        assert_eq!(parse_cpu_to_millicores("0.5"), Some(500));
        assert_eq!(parse_cpu_to_millicores("2.5"), Some(2500));

        // invalid inputs
        assert_eq!(parse_cpu_to_millicores(""), None);
        assert_eq!(parse_cpu_to_millicores("invalid"), None);
        assert_eq!(parse_cpu_to_millicores("100x"), None);
    }

    #[test]
    fn test_parse_memory_to_bytes() {
        // binary units
        assert_eq!(parse_memory_to_bytes("1Ki"), Some(1024));
        assert_eq!(parse_memory_to_bytes("1Mi"), Some(1024 * 1024));
        assert_eq!(parse_memory_to_bytes("1Gi"), Some(1024 * 1024 * 1024));
        assert_eq!(parse_memory_to_bytes("2.5Mi"), Some((2.5 * 1024.0 * 1024.0) as i64));

        // decimal units
        assert_eq!(parse_memory_to_bytes("1K"), Some(1000));
        assert_eq!(parse_memory_to_bytes("1M"), Some(1000 * 1000));
        assert_eq!(parse_memory_to_bytes("1G"), Some(1000 * 1000 * 1000));
        assert_eq!(parse_memory_to_bytes("1k"), Some(1000)); // lowercase k

        // bytes without suffix
        assert_eq!(parse_memory_to_bytes("1024"), Some(1024));
        assert_eq!(parse_memory_to_bytes("500"), Some(500));

        // invalid inputs
        assert_eq!(parse_memory_to_bytes(""), None);
        assert_eq!(parse_memory_to_bytes("invalid"), None);
        assert_eq!(parse_memory_to_bytes("100X"), None);
    }

    #[test]
    fn test_compute_utilization_percentages() {
        let usage = ContainerUsageTotals {
            cpu_millicores: 500,
            memory_bytes: 1024 * 1024 * 512, // 512 MiB
        };

        // valid requests
        let requests = ContainerRequestTotals {
            cpu_millicores: Some(1000),              // 1 CPU
            memory_bytes: Some(1024 * 1024 * 1024), // 1 GiB
        };

        let (cpu_pct, mem_pct) = compute_utilization_percentages(&usage, &requests);
        assert_eq!(cpu_pct, Some(50.0));
        assert_eq!(mem_pct, Some(50.0));

        // no requests
        let no_requests = ContainerRequestTotals {
            cpu_millicores: None,
            memory_bytes: None,
        };

        let (cpu_pct, mem_pct) = compute_utilization_percentages(&usage, &no_requests);
        assert_eq!(cpu_pct, None);
        assert_eq!(mem_pct, None);

        // zero requests must not divide
        let zero_requests = ContainerRequestTotals {
            cpu_millicores: Some(0),
            memory_bytes: Some(0),
        };

        let (cpu_pct, mem_pct) = compute_utilization_percentages(&usage, &zero_requests);
        assert_eq!(cpu_pct, None);
        assert_eq!(mem_pct, None);
    }
}
