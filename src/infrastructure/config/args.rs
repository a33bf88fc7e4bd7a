use super::app_config::LogLevel;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "clanchat",
    version,
    about = "Inspect channels, clan members and friends of a clan chat account",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// API base URL.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Session bearer token.
    #[arg(long, env = "CLANCHAT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Id of the session owner.
    #[arg(long, env = "CLANCHAT_USER_ID")]
    pub user_id: Option<String>,

    /// Username of the session owner.
    #[arg(long, env = "CLANCHAT_USERNAME")]
    pub username: Option<String>,

    /// Raise desktop notifications for failures.
    #[arg(long)]
    pub desktop_notifications: Option<bool>,

    /// Print JSON instead of plain text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List friends and pending requests.
    Friends {
        /// Only list users you blocked.
        #[arg(long)]
        blocked: bool,

        /// Bypass the cached response.
        #[arg(long)]
        no_cache: bool,
    },

    /// List the channels you belong to.
    Channels {
        /// Replace stored channels instead of merging.
        #[arg(long)]
        clear: bool,

        /// Bypass the cached response.
        #[arg(long)]
        no_cache: bool,

        /// Only list Google Meet voice channels.
        #[arg(long)]
        voice: bool,
    },

    /// List clan members split by presence.
    Members {
        /// Clan id.
        clan_id: String,

        /// Bypass the cached response.
        #[arg(long)]
        no_cache: bool,
    },

    /// Send friend requests.
    AddFriend(TargetArgs),

    /// Remove friends or cancel requests.
    RemoveFriend(TargetArgs),

    /// Block users.
    Block(TargetArgs),
}

/// Users a relationship change applies to.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// User ids.
    #[arg(long = "id", value_name = "ID")]
    pub ids: Vec<String>,

    /// Usernames.
    #[arg(long = "username", value_name = "NAME")]
    pub usernames: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_members() {
        let args = CliArgs::parse_from(["clanchat", "--json", "members", "k1", "--no-cache"]);
        assert!(args.json);
        assert!(matches!(
            args.command,
            Command::Members { ref clan_id, no_cache: true } if clan_id == "k1"
        ));
    }

    #[test]
    fn test_parse_targets() {
        let args = CliArgs::parse_from([
            "clanchat",
            "block",
            "--id",
            "u1",
            "--id",
            "u2",
            "--username",
            "mal",
        ]);
        let Command::Block(targets) = args.command else {
            panic!("expected block");
        };
        assert_eq!(targets.ids, vec!["u1", "u2"]);
        assert_eq!(targets.usernames, vec!["mal"]);
    }
}
