//! Issue-type badge classification
//!
//! The warehouse records carton conditions with Thai labels; each known
//! label has its own badge color, anything else falls back to `Primary`.

/// Badge tone shown next to an issue type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueBadge {
    /// Dented carton
    Danger,
    /// Scratched carton
    Warning,
    /// Torn carton
    Dark,
    /// Stained garment
    Info,
    Primary,
    /// No issue type recorded
    Secondary,
}

impl IssueBadge {
    pub fn classify(issue_type: &str) -> Self {
        match issue_type {
            "" => IssueBadge::Secondary,
            "กล่องบุบ" => IssueBadge::Danger,
            "กล่องเป็นรอย" => IssueBadge::Warning,
            "กล่องขาด" => IssueBadge::Dark,
            "เสื้อเปื้อน" => IssueBadge::Info,
            _ => IssueBadge::Primary,
        }
    }

    /// ANSI SGR parameters used by the terminal table
    pub fn ansi_style(&self) -> &'static str {
        match self {
            IssueBadge::Danger => "1;37;41",
            IssueBadge::Warning => "30;43",
            IssueBadge::Dark => "1;37;40",
            IssueBadge::Info => "1;37;46",
            IssueBadge::Primary => "1;37;44",
            IssueBadge::Secondary => "37;100",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_labels() {
        assert_eq!(IssueBadge::classify("กล่องบุบ"), IssueBadge::Danger);
        assert_eq!(IssueBadge::classify("กล่องเป็นรอย"), IssueBadge::Warning);
        assert_eq!(IssueBadge::classify("กล่องขาด"), IssueBadge::Dark);
        assert_eq!(IssueBadge::classify("เสื้อเปื้อน"), IssueBadge::Info);
    }

    #[test]
    fn test_classify_fallbacks() {
        assert_eq!(IssueBadge::classify(""), IssueBadge::Secondary);
        assert_eq!(IssueBadge::classify("Damaged"), IssueBadge::Primary);
    }
}
