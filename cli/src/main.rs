use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use skinlab::config::{ClientConfig, ConfigError, normalize_base_url};
use skinlab::net::api::Api;
use skinlab::net::guard::SessionGuard;
use skinlab::net::transport::{ReqwestTransport, TransportError};
use skinlab::net::types::{ImageUpload, RegisterRequest};
use skinlab::pages::PageError;
use skinlab::pages::admin::{AdminDiagnosesPage, AdminPage, AdminRecord, AdminReviewsPage, AdminUsersPage};
use skinlab::pages::diagnosis::DiagnosisPage;
use skinlab::pages::history::HistoryPage;
use skinlab::pages::home::HomePage;
use skinlab::pages::login::LoginPage;
use skinlab::pages::navbar::{NavBar, NavItem};
use skinlab::pages::profile::ProfilePage;
use skinlab::pages::register::RegisterPage;
use skinlab::pages::review_form::ReviewForm;
use skinlab::routes::{self, Access, AdminSection, Route};
use skinlab::shell::{Navigator, Notice, Notifier};
use skinlab::state::session::Session;
use skinlab::state::store::{FileStore, StoreError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("session storage failed: {0}")]
    Store(#[from] StoreError),
    #[error("http client setup failed: {0}")]
    Transport(#[from] TransportError),
    #[error("{0}")]
    Page(#[from] PageError),
    #[error("request failed: {0}")]
    Api(#[from] skinlab::ApiError),
    #[error("cannot read {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("{0} is not an image file")]
    NotAnImage(PathBuf),
    #[error("{route} requires {reason}")]
    Gated { route: Route, reason: &'static str },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "skinlab", about = "AI Skin Lab client")]
struct Cli {
    #[arg(long, env = "SKINLAB_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "SKINLAB_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        username: String,
        #[arg(long, env = "SKINLAB_PASSWORD")]
        password: String,
    },
    Logout,
    Register(RegisterArgs),
    /// Show login state and the navigation available to it.
    Status,
    /// Exchange the stored refresh token for a new access token.
    Refresh,
    Predict {
        image: PathBuf,
        /// Diagnose without saving to history.
        #[arg(long, default_value_t = false)]
        example: bool,
    },
    Examples,
    Reviews(ReviewsCommand),
    History(HistoryCommand),
    Profile(ProfileCommand),
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    username: String,
    #[arg(long, env = "SKINLAB_PASSWORD")]
    password: String,
    #[arg(long)]
    age: u32,
    #[arg(long)]
    gender: String,
    #[arg(long)]
    skin_type: String,
}

#[derive(Args, Debug)]
struct ReviewsCommand {
    #[command(subcommand)]
    command: ReviewsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ReviewsSubcommand {
    List,
    Create {
        #[arg(long)]
        rating: u8,
        text: String,
    },
}

#[derive(Args, Debug)]
struct HistoryCommand {
    #[command(subcommand)]
    command: HistorySubcommand,
}

#[derive(Subcommand, Debug)]
enum HistorySubcommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    Delete {
        id: i64,
        /// Page to show after deleting.
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Show,
    Update {
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        skin_type: Option<String>,
    },
    Password {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    Users(AdminAction),
    Reviews(AdminAction),
    Diagnoses(AdminAction),
}

#[derive(Args, Debug)]
struct AdminAction {
    /// Delete this id instead of listing.
    #[arg(long)]
    delete: Option<i64>,
}

// =============================================================================
// TERMINAL SHELL
// =============================================================================

/// Route changes have no screen to update; they are logged.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(%route, "navigate");
    }

    fn hard_redirect(&self, route: Route) {
        eprintln!("-> {route}");
    }
}

struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        let tag = if notice.is_error() { "error" } else { "ok" };
        eprintln!("[{tag}] {}", notice.message());
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = normalize_base_url(&base_url);
    }
    if let Some(session_file) = cli.session_file {
        config.session_file = session_file;
    }

    let api = connect(&config)?;
    run(&api, &config, cli.command).await
}

fn connect(config: &ClientConfig) -> Result<Api, CliError> {
    let store = FileStore::open(&config.session_file)?;
    let session = Session::new(Arc::new(store));
    let transport = ReqwestTransport::new(&config.api_base_url)?;
    let guard = SessionGuard::new(
        Arc::new(transport),
        session,
        Arc::new(TerminalNavigator),
        Arc::new(TerminalNotifier),
    );
    Ok(Api::new(Arc::new(guard)))
}

async fn run(api: &Api, config: &ClientConfig, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { username, password } => {
            let snapshot = LoginPage::new(api.clone()).submit(&username, &password).await?;
            print_json(&snapshot_json(snapshot.logged_in, snapshot.is_staff))
        }
        Command::Logout => {
            NavBar::new(api.clone()).logout()?;
            eprintln!("logged out");
            Ok(())
        }
        Command::Register(args) => {
            let form = RegisterRequest {
                username: args.username,
                password: args.password,
                age: args.age,
                gender: args.gender,
                skin_type: args.skin_type,
            };
            RegisterPage::new(api.clone()).submit(&form).await?;
            Ok(())
        }
        Command::Status => run_status(api),
        Command::Refresh => {
            api.refresh_session().await?;
            eprintln!("access token refreshed");
            Ok(())
        }
        Command::Predict { image, example } => run_predict(api, image, example).await,
        Command::Examples => {
            enter(api, Route::Diagnosis)?;
            let names = DiagnosisPage::new(api.clone()).examples().await?;
            print_json(&names)
        }
        Command::Reviews(reviews) => run_reviews(api, reviews).await,
        Command::History(history) => run_history(api, config, history).await,
        Command::Profile(profile) => run_profile(api, profile).await,
        Command::Admin(admin) => run_admin(api, admin).await,
    }
}

fn run_status(api: &Api) -> Result<(), CliError> {
    let snapshot = api.session().snapshot();
    let links: Vec<String> = NavBar::new(api.clone())
        .items()
        .into_iter()
        .map(|item| match item {
            NavItem::Link(route) => route.path().to_owned(),
            NavItem::Logout => "logout".to_owned(),
        })
        .collect();
    let mut status = snapshot_json(snapshot.logged_in, snapshot.is_staff);
    status["nav"] = serde_json::json!(links);
    print_json(&status)
}

async fn run_predict(api: &Api, path: PathBuf, example: bool) -> Result<(), CliError> {
    enter(api, Route::Diagnosis)?;
    let bytes = std::fs::read(&path).map_err(|source| CliError::ReadFile { path: path.clone(), source })?;
    let file_name = path
        .file_name()
        .map_or_else(|| "image".to_owned(), |name| name.to_string_lossy().into_owned());
    let upload = ImageUpload::new(file_name, bytes);
    if !upload.is_image() {
        return Err(CliError::NotAnImage(path));
    }

    let mut page = DiagnosisPage::new(api.clone());
    page.select(upload, example);
    let outcome = page.submit().await?;
    print_json(outcome)
}

async fn run_reviews(api: &Api, reviews: ReviewsCommand) -> Result<(), CliError> {
    match reviews.command {
        ReviewsSubcommand::List => {
            let mut page = HomePage::new(api.clone());
            let reviews = page.load_reviews().await?;
            print_json(&reviews)
        }
        ReviewsSubcommand::Create { rating, text } => {
            let review = ReviewForm::new(api.clone()).submit(rating, &text).await?;
            print_json(&review)
        }
    }
}

async fn run_history(api: &Api, config: &ClientConfig, history: HistoryCommand) -> Result<(), CliError> {
    enter(api, Route::MyPage)?;
    let mut page = HistoryPage::new(api.clone(), config.history_page_size);
    match history.command {
        HistorySubcommand::List { page: number } => {
            page.load(number).await?;
        }
        HistorySubcommand::Delete { id, page: number } => {
            page.load(number).await?;
            page.delete(id).await?;
        }
    }
    print_json(&serde_json::json!({
        "page": page.current_page(),
        "total_pages": page.total_pages(),
        "results": page.entries(),
    }))
}

async fn run_profile(api: &Api, profile: ProfileCommand) -> Result<(), CliError> {
    enter(api, Route::Profile)?;
    let mut page = ProfilePage::new(api.clone());
    match profile.command {
        ProfileSubcommand::Show => {
            let loaded = page.load().await?;
            print_json(loaded)
        }
        ProfileSubcommand::Update { age, gender, skin_type } => {
            let mut form = page.load().await?.clone();
            if age.is_some() {
                form.profile.age = age;
            }
            if gender.is_some() {
                form.profile.gender = gender;
            }
            if skin_type.is_some() {
                form.profile.skin_type = skin_type;
            }
            let saved = page.update(&form).await?;
            print_json(saved)
        }
        ProfileSubcommand::Password { old, new, confirm } => {
            page.change_password(&old, &new, &confirm).await?;
            Ok(())
        }
    }
}

async fn run_admin(api: &Api, admin: AdminCommand) -> Result<(), CliError> {
    match admin.command {
        AdminSubcommand::Users(action) => {
            enter(api, Route::Admin(AdminSection::Users))?;
            run_admin_action(AdminUsersPage::new(api.clone()), action).await
        }
        AdminSubcommand::Reviews(action) => {
            enter(api, Route::Admin(AdminSection::Reviews))?;
            run_admin_action(AdminReviewsPage::new(api.clone()), action).await
        }
        AdminSubcommand::Diagnoses(action) => {
            enter(api, Route::Admin(AdminSection::Diagnoses))?;
            run_admin_action(AdminDiagnosesPage::new(api.clone()), action).await
        }
    }
}

async fn run_admin_action<T: AdminRecord + Serialize>(
    mut page: AdminPage<T>,
    action: AdminAction,
) -> Result<(), CliError> {
    match action.delete {
        Some(id) => {
            page.load().await?;
            page.delete(id).await?;
        }
        None => {
            page.load().await?;
        }
    }
    print_json(&page.records())
}

/// Apply `route`'s gate the way a page load would.
fn enter(api: &Api, route: Route) -> Result<(), CliError> {
    match routes::enter(route, api.session(), api.guard().navigator()) {
        Access::Render => Ok(()),
        Access::Redirect(Route::Login) => Err(CliError::Gated { route, reason: "login" }),
        Access::Redirect(_) => Err(CliError::Gated { route, reason: "a staff account" }),
    }
}

fn snapshot_json(logged_in: bool, is_staff: bool) -> serde_json::Value {
    serde_json::json!({ "logged_in": logged_in, "is_staff": is_staff })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
