//! CLI argument definitions using clap
//!
//! - foodweb login / logout / whoami       # session
//! - foodweb register / send-code          # account creation
//! - foodweb user|category|dish <action>   # resources
//! - foodweb upload <file>                 # file upload
//! - foodweb open <path>                   # route through the guard
//! - foodweb config show|init              # configuration

use clap::{Parser, Subcommand};
use foodweb_core::config::DEFAULT_CONFIG_FILE;
use foodweb_core::services::user::DEFAULT_PAGE_SIZE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "foodweb")]
#[command(about = "Foodweb - client for the food recommendation platform")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,

    /// Backend origin, overriding the configuration file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and keep the session for later commands
    Login {
        #[arg(short, long)]
        username: String,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Create an account
    Register {
        #[arg(long)]
        username: String,

        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: Option<String>,

        /// Verification code from `send-code`
        #[arg(long)]
        code: String,
    },

    /// Email a registration verification code
    SendCode { email: String },

    /// User administration
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Category administration
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Browse and manage dishes
    Dish {
        #[command(subcommand)]
        action: DishAction,
    },

    /// Upload a file (cover images and the like)
    Upload { file: PathBuf },

    /// Navigate to a client route and report where the guard lands
    Open { path: String },

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone)]
pub enum UserAction {
    /// One page of users
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u32,
    },

    /// One user by id
    Show { id: i64 },
}

#[derive(Subcommand, Clone)]
pub enum CategoryAction {
    List,

    Show { id: i64 },

    Add { name: String },

    /// Rename a category
    Update { id: i64, name: String },

    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

/// Fields of a dish; on update only the given ones change
#[derive(clap::Args, Clone, Debug, Default)]
pub struct DishFields {
    #[arg(long)]
    pub title: Option<String>,

    /// Cover image URL, e.g. as returned by `upload`
    #[arg(long)]
    pub cover: Option<String>,

    /// Markdown body
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read the markdown body from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    #[arg(long)]
    pub category: Option<i64>,
}

#[derive(Subcommand, Clone)]
pub enum DishAction {
    List,

    /// Most-clicked dishes
    Hot,

    Show { id: i64 },

    /// Paged search; omitted filters are not sent
    Search {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        category: Option<i64>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        size: Option<u32>,
    },

    Add {
        #[command(flatten)]
        fields: DishFields,
    },

    Update {
        id: i64,

        #[command(flatten)]
        fields: DishFields,
    },

    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration
    Show,

    /// Create a new configuration file with defaults
    Init {
        /// Overwrite existing file without prompting
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "foodweb",
            "dish",
            "search",
            "--title",
            "tofu",
            "--base-url",
            "http://api.test",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.base_url.as_deref(), Some("http://api.test"));
        assert_eq!(cli.config_file, DEFAULT_CONFIG_FILE);
        match cli.command {
            Commands::Dish {
                action: DishAction::Search { title, page, .. },
            } => {
                assert_eq!(title.as_deref(), Some("tofu"));
                assert_eq!(page, None);
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_user_list_defaults() {
        let cli = Cli::try_parse_from(["foodweb", "user", "list"]).unwrap();
        match cli.command {
            Commands::User {
                action: UserAction::List { page, size },
            } => {
                assert_eq!(page, 0);
                assert_eq!(size, DEFAULT_PAGE_SIZE);
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_content_flags_conflict() {
        let parsed = Cli::try_parse_from([
            "foodweb",
            "dish",
            "add",
            "--content",
            "x",
            "--content-file",
            "body.md",
        ]);
        assert!(parsed.is_err());
    }
}
