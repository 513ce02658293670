use rand::Rng;

/// Wall-clock timestamp plus a random base36 suffix, matching the record ids
/// the web client generated.
pub fn generate_id(now_ms: u64) -> String {
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9).map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char).collect();
    format!("{now_ms}-{suffix}")
}

/// Relative age label for snapshot printing: "12m ago", "3h ago", "2d ago".
pub fn format_relative(then_ms: u64, now_ms: u64) -> String {
    let diff = now_ms.saturating_sub(then_ms);
    let minutes = diff / 60_000;
    let hours = diff / 3_600_000;
    let days = diff / 86_400_000;

    if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{days}d ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_relative_buckets() {
        let now = 100 * 86_400_000;
        assert_eq!(format_relative(now, now), "0m ago");
        assert_eq!(format_relative(now - 5 * 60_000, now), "5m ago");
        assert_eq!(format_relative(now - 3 * 3_600_000, now), "3h ago");
        assert_eq!(format_relative(now - 2 * 86_400_000, now), "2d ago");
    }

    #[test]
    fn test_future_timestamps_clamp_to_now() {
        assert_eq!(format_relative(2_000, 1_000), "0m ago");
    }

    #[test]
    fn test_generated_ids_embed_timestamp() {
        let id = generate_id(1_700_000_000_000);
        assert!(id.starts_with("1700000000000-"));
        assert_ne!(generate_id(1_700_000_000_000), generate_id(1_700_000_000_000));
    }
}
