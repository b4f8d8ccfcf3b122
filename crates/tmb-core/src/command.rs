//! Bot commands and inline-button callback tokens.

/// Prefix of the token carried by a "refresh" button.
pub const REFRESH_PREFIX: &str = "refresh_";

/// Token of the "back to main menu" button.
pub const BACK_TO_MAIN: &str = "back_main";

/// A telemetry-backed command. Each one has its own main-menu button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Query {
    Info,
    Status,
    Battery,
    Charge,
    Drive,
}

impl Query {
    /// Main-menu order.
    pub const ALL: [Query; 5] = [
        Query::Info,
        Query::Status,
        Query::Battery,
        Query::Charge,
        Query::Drive,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "info" => Self::Info,
            "status" => Self::Status,
            "battery" => Self::Battery,
            "charge" => Self::Charge,
            "drive" => Self::Drive,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Status => "status",
            Self::Battery => "battery",
            Self::Charge => "charge",
            Self::Drive => "drive",
        }
    }

    /// What the query fetches, as shown in failure replies.
    pub fn resource(self) -> &'static str {
        match self {
            Self::Info => "vehicle details",
            Self::Status => "vehicle status",
            Self::Battery => "battery health",
            Self::Charge => "charge record",
            Self::Drive => "drive record",
        }
    }

    /// Token for the refresh button of this query.
    pub fn refresh_token(self) -> String {
        format!("{REFRESH_PREFIX}{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    Help,
    Query(Query),
}

impl Command {
    /// Parse a command name (lowercase, no leading `/`).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            _ => Query::parse(name).map(Self::Query),
        }
    }
}

/// A callback token, classified once.
///
/// Parsing is total: anything we did not issue ends up as `Unknown`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackAction {
    /// Run a query and post the result as a new message.
    Show(Query),
    /// Run a query and edit the originating message in place.
    Refresh(Query),
    BackToMain,
    Unknown,
}

impl CallbackAction {
    pub fn parse(token: &str) -> Self {
        if token == BACK_TO_MAIN {
            return Self::BackToMain;
        }
        match token.strip_prefix(REFRESH_PREFIX) {
            Some(name) => Query::parse(name).map_or(Self::Unknown, Self::Refresh),
            None => Query::parse(token).map_or(Self::Unknown, Self::Show),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_names() {
        assert_eq!(Command::parse("start"), Some(Command::Start));
        assert_eq!(Command::parse("help"), Some(Command::Help));
        assert_eq!(Command::parse("drive"), Some(Command::Query(Query::Drive)));
        assert_eq!(Command::parse("Start"), None);
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("reboot"), None);

        for query in Query::ALL {
            assert_eq!(Command::parse(query.as_str()), Some(Command::Query(query)));
        }
    }

    #[test]
    fn classifies_callback_tokens() {
        assert_eq!(
            CallbackAction::parse("info"),
            CallbackAction::Show(Query::Info)
        );
        assert_eq!(
            CallbackAction::parse("drive"),
            CallbackAction::Show(Query::Drive)
        );
        assert_eq!(
            CallbackAction::parse("refresh_battery"),
            CallbackAction::Refresh(Query::Battery)
        );
        assert_eq!(CallbackAction::parse("back_main"), CallbackAction::BackToMain);
    }

    #[test]
    fn unrecognized_tokens_are_unknown() {
        for token in [
            "",
            "refresh_",
            "refresh_start",
            "refresh_help",
            "refresh_refresh_info",
            "start",
            "help",
            "INFO",
            "back_main ",
            "askuser:1:2",
        ] {
            assert_eq!(CallbackAction::parse(token), CallbackAction::Unknown, "{token:?}");
        }
    }

    #[test]
    fn refresh_token_round_trips() {
        for query in Query::ALL {
            assert_eq!(
                CallbackAction::parse(&query.refresh_token()),
                CallbackAction::Refresh(query)
            );
        }
    }
}
