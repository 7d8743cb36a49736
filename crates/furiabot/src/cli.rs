use clap::{Parser, Subcommand};
use furiacore::{FanProfile, XpAward};

#[derive(Parser)]
#[command(name = "furia-bot")]
#[command(author, version, about = "Telegram bot for FURIA CS fans: pick a player, earn XP, unlock achievements", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (long polling)
    Run {
        /// Keep profiles in memory instead of MongoDB (local development only)
        #[arg(long)]
        in_memory: bool,
    },

    /// Connect to MongoDB, ping it and exit
    Check,

    /// Award XP to a fan
    AwardXp {
        /// Telegram user ID
        #[arg(short, long)]
        user: i64,

        /// XP to add (must be positive)
        #[arg(short, long)]
        amount: i64,
    },

    /// Print a fan's stored profile without creating one
    Show {
        /// Telegram user ID
        #[arg(short, long)]
        user: i64,
    },

    /// Unlock an achievement for a fan
    Unlock {
        /// Telegram user ID
        #[arg(short, long)]
        user: i64,

        /// Achievement id, e.g. first_blood
        #[arg(short = 'a', long)]
        achievement: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Output line(s) for `award-xp`.
pub fn describe_award(user: i64, award: &XpAward) -> String {
    let mut out = format!("⭐ User {} now has {} XP (level {})", user, award.total, award.new_level);
    if award.leveled_up() {
        out.push_str(&format!(
            "\n🎉 Level up! {} -> {}",
            award.previous_level, award.new_level
        ));
    }
    out
}

/// Output for `show`.
pub fn describe_profile(user: i64, profile: Option<&FanProfile>) -> String {
    let Some(profile) = profile else {
        return format!("User {} has no profile yet", user);
    };
    format!(
        "User {} (@{})\n  player: {}\n  xp: {} (level {})\n  achievements: {}\n  interactions: {}\n  last active: {}",
        user,
        profile.username.as_deref().unwrap_or("-"),
        profile.chosen_player.as_deref().unwrap_or("-"),
        profile.xp,
        profile.level().level,
        if profile.achievements.is_empty() {
            "-".to_string()
        } else {
            profile.achievements.join(", ")
        },
        profile.interactions,
        profile.last_active.to_rfc3339(),
    )
}
