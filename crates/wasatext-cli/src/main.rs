use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use wasatext_client::session::USERNAME_KEY;
use wasatext_client::{ApiClient, ClientConfig, UploadFile};
use wasatext_store::SqliteStore;
use wasatext_types::routes;

#[derive(Parser)]
#[command(name = "wasatext", about = "Command-line client for the WASAText messaging backend")]
struct Cli {
    /// Backend base URL; overrides WASATEXT_API_URL and WASATEXT_PAGE_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in (creating the user if needed) and remember the session
    Login { name: String },
    /// Forget the stored session
    Logout,
    /// List a user's conversations (defaults to the logged-in user)
    Conversations { username: Option<String> },
    Conversation { id: String },
    Details { id: String },
    Messages { conversation_id: String },
    /// Start a one-to-one conversation
    Start { username: String },
    Send { conversation_id: String, content: String },
    Reply { conversation_id: String, message_id: String, content: String },
    Forward { conversation_id: String, message_id: String },
    Delete { conversation_id: String, message_id: String },
    React { conversation_id: String, message_id: String, emoji: String },
    Unreact { conversation_id: String, message_id: String },
    SendImage { conversation_id: String, path: PathBuf },
    CreateGroup {
        name: String,
        #[arg(required = true)]
        members: Vec<String>,
    },
    RenameGroup { group_id: String, name: String },
    GroupPhoto { group_id: String, path: PathBuf },
    LeaveGroup { group_id: String },
    Profile { username: Option<String> },
    /// Change the logged-in user's name
    Rename { new_name: String },
    /// Set the profile photo by URL; omit the URL to clear it
    SetPhotoUrl { url: Option<String> },
    UploadPhoto { path: PathBuf },
    Exists { username: String },
    Users,
    /// Show which view a front-end path maps to
    Route { path: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wasatext=info,wasatext_client=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Command::Route { path } = &cli.command {
        return print_route(path);
    }

    // Config
    let config = match cli.api_url.as_deref() {
        Some(url) => ClientConfig::resolve(Some(url), None)?,
        None => ClientConfig::from_env()?,
    };
    let db_path: PathBuf = std::env::var("WASATEXT_SESSION_DB")
        .unwrap_or_else(|_| "wasatext-session.db".into())
        .into();

    let store = Arc::new(SqliteStore::open(&db_path)?);
    let client = ApiClient::new(config, store)?;
    debug!("Using backend at {}", client.base_url());

    run(&client, cli.command).await
}

async fn run(client: &ApiClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { name } => print(&client.login(&name).await?),
        Command::Logout => {
            client.logout()?;
            print(&Option::<()>::None)
        }
        Command::Conversations { username } => {
            let username = username_or_current(client, username)?;
            print(&client.get_conversations(&username).await?)
        }
        Command::Conversation { id } => print(&client.get_conversation(&id).await?),
        Command::Details { id } => print(&client.get_conversation_details(&id).await?),
        Command::Messages { conversation_id } => {
            print(&client.get_conversation_messages(&conversation_id).await?)
        }
        Command::Start { username } => print(&client.create_conversation(&username).await?),
        Command::Send { conversation_id, content } => {
            print(&client.send_message(&conversation_id, &content).await?)
        }
        Command::Reply { conversation_id, message_id, content } => print(
            &client
                .reply_to_message(&conversation_id, &message_id, &content)
                .await?,
        ),
        Command::Forward { conversation_id, message_id } => {
            print(&client.forward_message(&conversation_id, &message_id).await?)
        }
        Command::Delete { conversation_id, message_id } => {
            print(&client.delete_message(&conversation_id, &message_id).await?)
        }
        Command::React { conversation_id, message_id, emoji } => print(
            &client
                .add_reaction(&message_id, &emoji, &conversation_id)
                .await?,
        ),
        Command::Unreact { conversation_id, message_id } => {
            print(&client.delete_reaction(&message_id, &conversation_id).await?)
        }
        Command::SendImage { conversation_id, path } => {
            let file = UploadFile::from_path(&path).await?;
            print(&client.send_image_message(&conversation_id, file).await?)
        }
        Command::CreateGroup { name, members } => {
            print(&client.create_group(&name, &members).await?)
        }
        Command::RenameGroup { group_id, name } => {
            print(&client.update_group_name(&group_id, &name).await?)
        }
        Command::GroupPhoto { group_id, path } => {
            let file = UploadFile::from_path(&path).await?;
            print(&client.update_group_photo(&group_id, file).await?)
        }
        Command::LeaveGroup { group_id } => print(&client.leave_group(&group_id).await?),
        Command::Profile { username } => {
            let username = username_or_current(client, username)?;
            print(&client.get_user_profile(&username).await?)
        }
        Command::Rename { new_name } => {
            let current = username_or_current(client, None)?;
            let updated = client.update_username(&current, &new_name).await?;
            if let Some(updated) = &updated {
                if let Err(e) = client.store().set(USERNAME_KEY, &updated.username) {
                    debug!("Username not stored: {}", e);
                }
            }
            print(&updated)
        }
        Command::SetPhotoUrl { url } => {
            let username = username_or_current(client, None)?;
            print(&client.update_profile_photo(&username, url.as_deref()).await?)
        }
        Command::UploadPhoto { path } => {
            let username = username_or_current(client, None)?;
            let file = UploadFile::from_path(&path).await?;
            print(&client.upload_profile_photo(&username, file).await?)
        }
        Command::Exists { username } => print(&client.check_user_exists(&username).await),
        Command::Users => print(&client.get_all_users().await?),
        Command::Route { path } => print_route(&path),
    }
}

fn username_or_current(client: &ApiClient, username: Option<String>) -> anyhow::Result<String> {
    match username.or_else(|| client.current_username()) {
        Some(name) => Ok(name),
        None => bail!("No username given and no logged-in user; run `wasatext login <name>` first"),
    }
}

fn print_route(path: &str) -> anyhow::Result<()> {
    let route = routes::resolve(path).with_context(|| format!("No view for path '{}'", path))?;
    let redirected = matches!(route, routes::Route::Redirect(_));
    let view = route.view();
    print(&serde_json::json!({
        "view": view,
        "name": view.name(),
        "path": view.path(),
        "redirect": redirected,
        "requires_auth": view.requires_auth(),
    }))
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
