/// Log tags, one per pipeline component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    State,
    Fetcher,
    Filter,
    Notifier,
}

impl LogTag {
    /// All tags, in display order
    pub const ALL: [LogTag; 6] = [
        LogTag::System,
        LogTag::Config,
        LogTag::State,
        LogTag::Fetcher,
        LogTag::Filter,
        LogTag::Notifier,
    ];

    /// Key used by --debug-<key> flags and `logging.debug_tags`
    pub fn to_debug_key(&self) -> &'static str {
        match self {
            LogTag::System => "system",
            LogTag::Config => "config",
            LogTag::State => "state",
            LogTag::Fetcher => "fetcher",
            LogTag::Filter => "filter",
            LogTag::Notifier => "notifier",
        }
    }

    /// Uppercase label without colors, used in file output
    pub fn to_plain_string(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::State => "STATE",
            LogTag::Fetcher => "FETCHER",
            LogTag::Filter => "FILTER",
            LogTag::Notifier => "NOTIFIER",
        }
    }

    pub fn from_debug_key(key: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.to_debug_key() == key.to_lowercase())
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
