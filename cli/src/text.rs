//! Small text helpers shared by the table views.

/// Join ports with ", ", collapsing the overflow into "+N" to fit `max_width`.
///
/// The first port is always shown.
pub fn format_ports(ports: &[u16], max_width: usize) -> String {
    let Some((first, rest)) = ports.split_first() else {
        return String::new();
    };

    let mut result = first.to_string();
    for (i, port) in rest.iter().enumerate() {
        let next = format!(", {}", port);
        let hidden = rest.len() - i;
        // Reserve room for the suffix we would print if we stopped here
        let suffix_len = if hidden > 1 {
            format!(" +{}", hidden).len()
        } else {
            0
        };

        if result.len() + next.len() + suffix_len > max_width {
            result.push_str(&format!(" +{}", hidden));
            break;
        }
        result.push_str(&next);
    }
    result
}

/// Cut `s` to at most `max` characters, marking the cut with "…".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ports() {
        assert_eq!(format_ports(&[], 18), "");
        assert_eq!(format_ports(&[3000], 18), "3000");
        assert_eq!(format_ports(&[3000, 3001, 3002], 18), "3000, 3001, 3002");
        assert_eq!(
            format_ports(&[3000, 3001, 3002, 3003, 3004], 18),
            "3000, 3001 +3"
        );
    }

    #[test]
    fn test_format_ports_reserves_wider_suffix() {
        let ports: Vec<u16> = (1..=11).collect();
        // stopping after "1" would print " +10", which does not leave room for ", 2"
        assert_eq!(format_ports(&ports, 7), "1 +10");
        assert_eq!(format_ports(&ports, 8), "1, 2 +9");
    }

    #[test]
    fn test_format_ports_first_always_shown() {
        assert_eq!(format_ports(&[50000, 50001], 4), "50000 +1");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("node", 15), "node");
        assert_eq!(truncate("com.docker.backend", 10), "com.docke…");
        assert_eq!(truncate("héllo wörld", 6), "héllo…");
    }
}
