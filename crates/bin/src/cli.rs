//! CLI argument definitions for the Amity binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Amity demo CLI
#[derive(Parser, Debug)]
#[command(name = "amity")]
#[command(about = "Amity: sessions, friends, and posts over a JSON file store")]
#[command(version)]
pub struct Cli {
    /// File the store state is loaded from and saved to
    #[arg(
        short = 'f',
        long,
        default_value = "amity.json",
        env = "AMITY_DATA_FILE"
    )]
    pub data_file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new user
    Register(RegisterArgs),
    /// Login as an existing user
    Login {
        /// Username to log in as
        username: String,
        /// Password for the user
        password: String,
    },
    /// Logout the user in session
    Logout,
    /// Show the user in session
    Whoami,
    /// Manage the session user's friends list
    Friend {
        #[command(subcommand)]
        command: FriendCommands,
    },
    /// List the session user's friends
    Friends,
    /// Create a post as the session user
    Post {
        /// Body text of the post
        body: String,
    },
    /// Show the session user's feed (own posts plus friends' posts)
    Feed,
    /// Search users by free text across username, name, and email
    Search {
        /// Query text; omit to list every user
        query: Option<String>,
    },
    /// Delete all stored state
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum FriendCommands {
    /// Add a user to the friends list
    Add {
        /// Username to add
        username: String,
    },
    /// Remove a user from the friends list
    Remove {
        /// Username to remove
        username: String,
    },
}

/// Arguments for the register command
#[derive(clap::Args, Debug)]
pub struct RegisterArgs {
    /// Username of the new user
    pub username: String,

    /// Password of the new user
    pub password: String,

    /// Display name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Contact email
    #[arg(long, default_value = "")]
    pub email: String,
}
