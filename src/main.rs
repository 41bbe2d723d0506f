use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::Value;
use time::OffsetDateTime;
use tokio::io::{AsyncBufReadExt, BufReader};

use datamind::auth::identity::{self, GoogleIdentityProvider};
use datamind::auth::{AuthMarker, AuthOutcome, AuthService, IdentityError};
use datamind::config::Config;
use datamind::routes::{Route, should_redirect_unauth};
use datamind::scheduler::TokioScheduler;
use datamind::services::ChatResponder;
use datamind::services::catalog;
use datamind::services::upload::{self, PickedFile, UploadError};
use datamind::state::{AppState, AppStore, NoticeKind};
use datamind::storage::{FileStore, KeyValueStore, StorageError};
use datamind::types::{ChatMessage, Role};
use datamind::util::format::format_file_size;
use datamind::util::theme;

/// Owner id for uploads made without a session.
const ANONYMOUS_OWNER: &str = "current-user";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("{message} ({code})")]
    Rejected { code: &'static str, message: String },
    #[error("external sign-in is not configured; set OAUTH_CLIENT_ID")]
    OAuthNotConfigured,
    #[error("identity provider error: {0}")]
    Identity(#[from] IdentityError),
    #[error("no tokio runtime available")]
    NoRuntime,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "datamind", about = "DataMind document analysis client")]
struct Cli {
    /// Key-value store file; defaults to `$HOME/.datamind/storage.json`.
    #[arg(long, env = "DATAMIND_STORE_PATH")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new account.
    Signup { username: String, email: String, password: String },
    /// Sign in with email and password.
    Login { email: String, password: String },
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Set the profile picture; pass an empty string to clear it.
    Picture { url: String },
    ResetPassword { email: String },
    /// Print the external identity provider consent URL.
    AuthUrl,
    /// Finish external sign-in from the redirect URL or the bare code.
    GoogleSignIn { redirect: String },
    /// Sign in from a provider-issued id token.
    IdToken { token: String },
    Models,
    Plans,
    /// Check whether a route may be opened with the current session.
    Route { path: String },
    /// Interactive document and chat session.
    Shell,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(path) = cli.store {
        config.store_path = path;
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.store_path)?);
    tracing::debug!(path = %config.store_path.display(), "store opened");
    let auth = AuthService::new(store.clone());
    let marker = AuthMarker::new(store.clone());

    match cli.command {
        Command::Signup { username, email, password } => {
            let outcome = auth.signup(&username, &email, &password);
            if outcome.success {
                marker.remember_registration(&email, &password)?;
            }
            report(outcome)
        }
        Command::Login { email, password } => {
            let outcome = auth.login(&email, &password);
            if outcome.success {
                marker.mark_authenticated(&email)?;
            }
            report(outcome)
        }
        Command::Logout => {
            let outcome = auth.logout();
            if outcome.success {
                marker.clear_marker()?;
            }
            report(outcome)
        }
        Command::Whoami => {
            match auth.current_session() {
                Some(user) => print_json(&serde_json::to_value(&user)?)?,
                None => match marker.marked_email() {
                    Some(email) => println!("not signed in (last marked: {email})"),
                    None => println!("not signed in"),
                },
            }
            Ok(())
        }
        Command::Picture { url } => report(auth.update_profile_picture(&url)),
        Command::ResetPassword { email } => report(auth.request_password_reset(&email)),
        Command::AuthUrl => {
            let oauth = config.oauth.ok_or(CliError::OAuthNotConfigured)?;
            println!("{}", identity::authorize_url(&oauth)?);
            Ok(())
        }
        Command::GoogleSignIn { redirect } => {
            let oauth = config.oauth.ok_or(CliError::OAuthNotConfigured)?;
            let code = identity::code_from_redirect(&redirect).unwrap_or(redirect);
            let provider = GoogleIdentityProvider::new(oauth)?;
            report(auth.sign_in_with_code(&provider, &code).await)
        }
        Command::IdToken { token } => report(auth.sign_in_with_id_token(&token)),
        Command::Models => {
            for model in catalog::default_models() {
                let capabilities = model
                    .capabilities
                    .iter()
                    .map(|c| format!("{c:?}").to_lowercase())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{}  {} ({:?}) [{capabilities}]", model.id, model.name, model.provider);
                println!("   {}", model.description);
            }
            Ok(())
        }
        Command::Plans => print_json(&serde_json::to_value(catalog::subscription_plans())?),
        Command::Route { path } => {
            let route = Route::from_path(&path).unwrap_or(Route::Home);
            let session = auth.current_session();
            match should_redirect_unauth(route, session.as_ref()) {
                Some(target) => println!("redirect {}", target.path()),
                None => println!("open {}", route.path()),
            }
            Ok(())
        }
        Command::Shell => run_shell(&config, store, &auth).await,
    }
}

fn report(outcome: AuthOutcome) -> Result<(), CliError> {
    if outcome.success {
        println!("{}", outcome.message);
        return Ok(());
    }
    Err(CliError::Rejected { code: outcome.code.unwrap_or("E_UNKNOWN"), message: outcome.message })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

// =============================================================================
// SHELL
// =============================================================================

const SHELL_HELP: &str = "commands: upload <path> | list | open <id> | remove <id> | send <text> | clear \
| model [id|name|none] | theme | history | help | quit";

async fn run_shell(config: &Config, store: Arc<dyn KeyValueStore>, auth: &AuthService) -> Result<(), CliError> {
    let scheduler = TokioScheduler::try_current().ok_or(CliError::NoRuntime)?;
    let app = AppStore::new(Arc::new(scheduler), config.timings);
    app.set_user(auth.current_session());
    app.set_theme(theme::read_preference(store.as_ref(), theme::system_prefers_dark()));
    let responder = ChatResponder::new(app.clone());

    let printer = tokio::spawn(print_updates(app.subscribe()));

    println!("{SHELL_HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').map_or((line, ""), |(c, r)| (c, r.trim()));
        match command {
            "" => {}
            "quit" | "exit" => break,
            "help" => println!("{SHELL_HELP}"),
            "upload" => upload_file(&app, Path::new(rest)),
            "list" => print_documents(&app.snapshot()),
            "open" => {
                let doc = app.read(|s| s.documents.get(rest).cloned());
                if doc.is_none() {
                    println!("no document {rest}");
                } else {
                    app.set_current_document(doc);
                }
            }
            "remove" => {
                if !app.remove_document(rest) {
                    println!("no document {rest}");
                }
            }
            "send" => {
                if responder.send(rest).is_none() {
                    println!("nothing to send");
                }
            }
            "clear" => app.clear_chat_messages(),
            "model" => select_model(&app, rest),
            "theme" => {
                let next = app.toggle_theme();
                theme::persist(store.as_ref(), next)?;
                println!("theme: {}", next.as_str());
            }
            "history" => print_history(&app.snapshot().chat.messages),
            other => println!("unknown command {other:?}; {SHELL_HELP}"),
        }
    }

    printer.abort();
    Ok(())
}

fn upload_file(app: &AppStore, path: &Path) {
    let picked = match picked_file(path) {
        Ok(picked) => picked,
        Err(e) => {
            app.notify(NoticeKind::Error, format!("cannot read {}: {e}", path.display()));
            return;
        }
    };
    let owner = app.read(|s| s.user.as_ref().map(|u| u.id.clone())).unwrap_or_else(|| ANONYMOUS_OWNER.to_owned());
    match upload::intake(picked, &owner) {
        Ok(doc) => {
            let name = doc.name.clone();
            app.add_document(doc);
            app.notify(NoticeKind::Success, format!("Uploaded {name}"));
        }
        Err(UploadError::UnsupportedType { name, .. }) => {
            app.notify(NoticeKind::Error, format!("{name} is not a PDF, Word, or text file"));
        }
    }
}

fn picked_file(path: &Path) -> Result<PickedFile, std::io::Error> {
    let metadata = std::fs::metadata(path)?;
    let last_modified = metadata.modified().map_or_else(|_| OffsetDateTime::now_utc(), OffsetDateTime::from);
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok(PickedFile { name, mime_type: String::new(), size: metadata.len(), last_modified })
}

fn select_model(app: &AppStore, key: &str) {
    if key.is_empty() {
        let state = app.snapshot();
        for model in &state.models.available {
            let marker = if state.models.selected.as_ref() == Some(model) { '*' } else { ' ' };
            println!("{marker} {}  {}", model.id, model.name);
        }
        return;
    }
    if key == "none" {
        app.set_selected_model(None);
        return;
    }
    let model = app.read(|s| catalog::find_model(&s.models.available, key).cloned());
    match model {
        Some(model) => app.set_selected_model(Some(model)),
        None => println!("no model {key:?}"),
    }
}

fn print_documents(state: &AppState) {
    if state.documents.is_empty() {
        println!("no documents");
        return;
    }
    let current = state.documents.current_id();
    for doc in &state.documents.items {
        let marker = if current == Some(doc.id.as_str()) { '*' } else { ' ' };
        println!(
            "{marker} {}  {}  {}  {}",
            doc.id,
            doc.name,
            format_file_size(doc.size),
            upload::file_kind(&doc.mime_type).as_str()
        );
    }
    if state.ui.processing {
        println!("(analyzing...)");
    }
}

fn print_history(messages: &[ChatMessage]) {
    for message in messages {
        print_message(message);
    }
}

fn print_message(message: &ChatMessage) {
    let who = match message.role {
        Role::User => "you",
        Role::Assistant => "ai",
    };
    println!("[{who}] {}", message.content);
}

/// Echo assistant replies and notices as they land.
async fn print_updates(mut rx: tokio::sync::watch::Receiver<AppState>) {
    let mut last_seen: Option<String> = None;
    let mut last_notice = None;
    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        state
            .chat
            .since(last_seen.as_deref())
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .for_each(print_message);
        last_seen = state.chat.last().map(|m| m.id.clone());

        if state.ui.notice != last_notice {
            if let Some(notice) = &state.ui.notice {
                println!("{}: {}", if notice.kind == NoticeKind::Error { "error" } else { "ok" }, notice.message);
            }
            last_notice = state.ui.notice;
        }
    }
}
