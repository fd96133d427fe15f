use std::process::ExitCode;
use std::sync::Arc;

use amity::{
    Api,
    directory::SearchCriteria,
    feed::Post,
    session::SessionError,
    storage::InMemory,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands, FriendCommands};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("amity=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> amity::Result<()> {
    // Load or create the store
    let adapter = match InMemory::load_from_file(&cli.data_file) {
        Ok(adapter) => {
            tracing::info!("Loaded store from {}", cli.data_file.display());
            Arc::new(adapter)
        }
        Err(e) => {
            tracing::warn!("Failed to load store: {e:?}. Creating a new one.");
            Arc::new(InMemory::new())
        }
    };

    let api = Api::open(adapter.clone()).await?;

    match &cli.command {
        Commands::Register(args) => {
            let user = api
                .session()
                .register(&args.username, &args.password, &args.name, &args.email)
                .await?;
            println!("Registered {}", user.username);
        }
        Commands::Login { username, password } => {
            let user = api.session().login(username, password).await?;
            println!("Logged in as {}", user.username);
        }
        Commands::Logout => {
            api.session().logout().await?;
            println!("Logged out");
        }
        Commands::Whoami => match api.session().current_user() {
            Some(user) => println!("{} ({}, {})", user.username, user.name, user.email),
            None => println!("Not logged in"),
        },
        Commands::Friend { command } => match command {
            FriendCommands::Add { username } => {
                let user = api.graph().add_friend(username).await?;
                println!("Friends: {}", user.friends.join(", "));
            }
            FriendCommands::Remove { username } => {
                let user = api.graph().remove_friend(username).await?;
                println!("Friends: {}", user.friends.join(", "));
            }
        },
        Commands::Friends => {
            let current = api
                .session()
                .current_user()
                .ok_or(SessionError::NoUserInSession)?;
            let friends = api.graph().friends_of(&current.username).await?;
            for username in &current.friends {
                if let Some(friend) = friends.get(username) {
                    println!("{} ({}, {})", friend.username, friend.name, friend.email);
                }
            }
        }
        Commands::Post { body } => {
            let post = api.feed().post(body).await?;
            println!("Posted {}", post.id);
        }
        Commands::Feed => {
            for post in api.feed().feed().await? {
                print_post(&post);
            }
        }
        Commands::Search { query } => {
            let criteria = SearchCriteria::query(query.clone().unwrap_or_default());
            for user in api.directory().search_user(&criteria).await? {
                println!("{} ({}, {})", user.username, user.name, user.email);
            }
        }
        Commands::Reset => {
            api.reset().await?;
            println!("Store reset");
        }
    }

    // Persist the whole store back to the data file
    adapter.save_to_file(&cli.data_file)?;
    Ok(())
}

fn print_post(post: &Post) {
    println!(
        "[{}] {}: {}",
        post.created_at_utc().format("%Y-%m-%d %H:%M:%S"),
        post.author,
        post.body
    );
}
