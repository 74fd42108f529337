//! Handlers for each CLI command.
//!
//! Handlers only talk to [`FolioApp`], so the tests drive them with the
//! mock adapters.

use std::sync::Arc;

use super::args::CliCommand;
use super::output::{self, icons};
use crate::app::FolioApp;
use crate::error::{FolioError, FolioResult};
use crate::models::ContentKind;
use crate::storage::StorageManager;
use crate::traits::{CredentialsProvider, HttpClient, ImageLoader};
use crate::validation::SignupForm;

/// Logical screen the CLI reader lays pages out for (a common phone size).
pub const READER_SCREEN_WIDTH: f64 = 390.0;
pub const READER_VIEWPORT_HEIGHT: f64 = 844.0;

/// Number of entries in the "top rated" block of `folio library`.
const TOP_RATED_COUNT: usize = 3;

/// Run one command against `app`.
///
/// `Version`, `Help` and `Invalid` are handled by the caller before a
/// runtime exists; here they are no-ops or usage errors.
pub async fn execute<C, P, L>(
    app: &mut FolioApp<C, P>,
    command: CliCommand,
    storage: &StorageManager,
    loader: Arc<L>,
) -> FolioResult<()>
where
    C: HttpClient,
    P: CredentialsProvider,
    L: ImageLoader + 'static,
{
    match command {
        CliCommand::Version | CliCommand::Help => Ok(()),
        CliCommand::Invalid(message) => Err(FolioError::Usage { message }),
        CliCommand::Login { email, password } => login(app, &email, &password).await,
        CliCommand::Signup {
            name,
            email,
            password,
        } => signup(app, name, email, password).await,
        CliCommand::Verify { email, code } => {
            let session = app.verify_otp(&email, &code).await?;
            output::print_line(
                icons::SUCCESS,
                &format!("Account confirmed, signed in as {}", session.user.email),
            );
            Ok(())
        }
        CliCommand::Logout => {
            app.logout().await?;
            output::print_line(icons::SUCCESS, "Signed out");
            Ok(())
        }
        CliCommand::Home => home(app).await,
        CliCommand::Library { kind } => library(app, kind).await,
        CliCommand::Search { query } => search(app, &query).await,
        CliCommand::Plans => plans(app).await,
        CliCommand::Profile => profile(app).await,
        CliCommand::Read { content_id } => read(app, &content_id, loader).await,
        CliCommand::Download { content_id } => download(app, &content_id, storage).await,
        CliCommand::Storage { clear_cache } => storage_report(storage, clear_cache),
    }
}

async fn login<C: HttpClient, P: CredentialsProvider>(
    app: &mut FolioApp<C, P>,
    email: &str,
    password: &str,
) -> FolioResult<()> {
    let session = app.login(email, password).await?;
    let name = session.user.name.as_deref().unwrap_or(&session.user.email);
    output::print_line(icons::SUCCESS, &format!("Signed in as {}", name));
    Ok(())
}

async fn signup<C: HttpClient, P: CredentialsProvider>(
    app: &mut FolioApp<C, P>,
    name: String,
    email: String,
    password: String,
) -> FolioResult<()> {
    let form = SignupForm {
        name,
        email,
        confirm_password: password.clone(),
        password,
    };
    let note = app.signup(&form).await?;
    output::print_line(icons::SUCCESS, &note);
    output::print_line(
        icons::INFO,
        &format!("Then run: folio verify {} <code>", form.email.trim()),
    );
    Ok(())
}

async fn home<C: HttpClient, P: CredentialsProvider>(
    app: &mut FolioApp<C, P>,
) -> FolioResult<()> {
    let grouped = app.refresh_home().await?;
    output::print_header("FOLIO");
    for kind in ContentKind::ALL {
        output::print_field(
            &format!("{}s", capitalize(kind.as_str())),
            &grouped.of_kind(kind).len().to_string(),
        );
    }

    let top = app.top_rated(TOP_RATED_COUNT);
    if !top.is_empty() {
        output::print_section("TOP RATED");
        for item in &top {
            output::print_content(item);
        }
    }

    match app.free_plan() {
        Some(free) => output::print_line(icons::INFO, &format!("Start free with {}", free.name)),
        None => output::print_line(icons::INFO, "Subscribe to start reading"),
    }
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

async fn library<C: HttpClient, P: CredentialsProvider>(
    app: &mut FolioApp<C, P>,
    kind: Option<ContentKind>,
) -> FolioResult<()> {
    let grouped = app.refresh_library(kind).await?;
    output::print_header("LIBRARY");
    if grouped.is_empty() {
        output::print_line(icons::INFO, "Nothing to read yet");
        return Ok(());
    }

    for kind in ContentKind::ALL {
        let items = grouped.of_kind(kind);
        if items.is_empty() {
            continue;
        }
        output::print_section(&format!("{}S ({})", kind.as_str().to_uppercase(), items.len()));
        for item in items {
            output::print_content(item);
        }
    }

    let top = app.top_rated(TOP_RATED_COUNT);
    if !top.is_empty() {
        output::print_section("TOP RATED");
        for item in &top {
            output::print_content(item);
        }
    }
    Ok(())
}

async fn search<C: HttpClient, P: CredentialsProvider>(
    app: &mut FolioApp<C, P>,
    query: &str,
) -> FolioResult<()> {
    app.refresh_library(None).await?;
    let hits = app.search(query);
    output::print_header(&format!("RESULTS FOR \"{}\"", query));
    if hits.is_empty() {
        output::print_line(icons::INFO, "No matches");
    }
    for item in &hits {
        output::print_content(item);
    }
    Ok(())
}

async fn plans<C: HttpClient, P: CredentialsProvider>(
    app: &mut FolioApp<C, P>,
) -> FolioResult<()> {
    let active = app.refresh_plans().await?;
    output::print_header("PLANS");
    if active.is_empty() {
        output::print_line(icons::INFO, "No plans on offer");
        return Ok(());
    }
    if let Some(free) = app.free_plan() {
        output::print_plan(&free);
    }
    for plan in app.paid_plans() {
        output::print_plan(&plan);
    }
    Ok(())
}

async fn profile<C: HttpClient, P: CredentialsProvider>(
    app: &mut FolioApp<C, P>,
) -> FolioResult<()> {
    let profile = app.refresh_profile().await?;
    output::print_header("PROFILE");
    output::print_field("Name", profile.display_name());
    output::print_field("Username", &profile.username);
    output::print_field("Email", &profile.email);
    output::print_field("Plan", profile.plan.as_deref().unwrap_or("none"));
    let verified = if profile.is_verified { "yes" } else { "no" };
    output::print_field("Verified", verified);
    Ok(())
}

/// Open the reader, page through the whole document and report the layout.
async fn read<C, P, L>(
    app: &mut FolioApp<C, P>,
    content_id: &str,
    loader: Arc<L>,
) -> FolioResult<()>
where
    C: HttpClient,
    P: CredentialsProvider,
    L: ImageLoader + 'static,
{
    let mut session = app
        .open_reader(content_id, loader, READER_SCREEN_WIDTH, READER_VIEWPORT_HEIGHT)
        .await?;
    session.wait_ready().await;

    output::print_header(&format!("READING {}", session.content_id()));
    for page in 0..session.page_count() {
        session.scroll_to_page(page);
        session.wait_idle().await;
        let height = session.layout().page_height(page);
        let icon = if session.failed_pages().contains(&page) {
            icons::WARNING
        } else {
            icons::SUCCESS
        };
        output::print_line(
            icon,
            &format!("page {:<4} {:>7.1} pt  [{}]", page + 1, height, session.page_label()),
        );
    }

    let failed = session.failed_pages();
    println!();
    output::print_field("Pages", &session.page_count().to_string());
    output::print_field(
        "Height",
        &format!("{:.1} pt", session.layout().content_height()),
    );
    if !failed.is_empty() {
        let list: Vec<String> = failed.iter().map(|p| (p + 1).to_string()).collect();
        output::print_line(
            icons::WARNING,
            &format!("{} page(s) failed to load: {}", failed.len(), list.join(", ")),
        );
    }
    Ok(())
}

async fn download<C: HttpClient, P: CredentialsProvider>(
    app: &mut FolioApp<C, P>,
    content_id: &str,
    storage: &StorageManager,
) -> FolioResult<()> {
    let path = app.download(content_id, storage).await?;
    if let Some(toast) = app.store().toasts.latest() {
        output::print_line(icons::SUCCESS, &toast.message);
    }
    output::print_field("Saved to", &path.display().to_string());
    Ok(())
}

fn storage_report(storage: &StorageManager, clear_cache: bool) -> FolioResult<()> {
    if clear_cache {
        let freed = storage.clear_cache()?;
        output::print_line(
            icons::SUCCESS,
            &format!("Cleared {} of cache", bytesize::ByteSize::b(freed)),
        );
    }

    let report = storage.report();
    output::print_header("STORAGE");
    output::print_field("Cache", &report.human_cache());
    output::print_field(
        "Downloads",
        &format!("{} ({} files)", report.human_documents(), report.document_count),
    );
    output::print_field("Total", &report.human_total());
    Ok(())
}
