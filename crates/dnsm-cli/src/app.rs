//! Command execution on top of the dnsm core.
//!
//! `App` wires one session, one API client, one router and the auth
//! workflow together, the way the web console does at startup. Every
//! command first navigates to the route it belongs to so the navigation
//! guard decides whether it may run.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use dnsm_core::api::{effect_channel, ApiClient, ApiError, EffectReceiver, HttpTransport};
use dnsm_core::auth::{Auth, AuthError, KeyringCredentials, Session};
use dnsm_core::models::{CreateDomainParams, RecordParams, RememberedLogin};
use dnsm_core::router::{
    menu, normalize, NavigationGuard, Router, DNS_ROUTE, LOGIN_ROUTE, ROUTES,
};
use dnsm_core::storage::{FileStore, SessionStore};
use dnsm_core::utils::format_timestamp_to_second;
use dnsm_core::Config;

use crate::cli::{Command, DomainAction, RecordAction, RecordArgs};
use crate::notifier::ConsoleNotifier;
use crate::render;

/// Environment variable read for a non-interactive login password
const PASSWORD_ENV: &str = "DNSM_PASSWORD";

/// Whether the error was already shown to the user as a notice
pub fn already_reported(error: &anyhow::Error) -> bool {
    match error.downcast_ref::<ApiError>() {
        Some(ApiError::InvalidResponse(_)) | Some(ApiError::Encode(_)) => false,
        Some(_) => true,
        None => error.downcast_ref::<AuthError>().is_some(),
    }
}

/// Whether this login should be remembered. Remembered credentials stay
/// remembered for the same user unless `--forget` is given.
fn should_remember(
    remember: bool,
    forget: bool,
    remembered: Option<&RememberedLogin>,
    username: &str,
) -> bool {
    !forget && (remember || remembered.is_some_and(|r| r.username == username))
}

impl From<RecordArgs> for RecordParams {
    fn from(args: RecordArgs) -> Self {
        Self {
            name: args.name,
            record_type: args.record_type.to_uppercase(),
            value: args.value,
            ttl: args.ttl,
            priority: args.priority,
        }
    }
}

pub struct App {
    config: Config,
    storage: Arc<FileStore>,
    api: ApiClient,
    auth: Auth,
    router: Router,
    effects: EffectReceiver,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let storage_path = config.storage_path()?;
        debug!(?storage_path, "Session storage configured");
        let storage = Arc::new(FileStore::new(storage_path));

        let store = SessionStore::new(storage.clone(), config.storage_namespace.clone());
        let session = Session::initialize(store).into_handle();

        let transport = HttpTransport::new(&config.base_url, config.timeout())?;
        let (tx, rx) = effect_channel();
        let api = ApiClient::new(Arc::new(transport), session, Arc::new(ConsoleNotifier), tx);

        Ok(Self {
            auth: Auth::new(api.clone(), Arc::new(KeyringCredentials::default())),
            router: Router::new(NavigationGuard::new(api.clone())),
            config,
            storage,
            api,
            effects: rx,
        })
    }

    /// Run one command, then apply whatever navigation it scheduled
    pub async fn run(&mut self, command: Command) -> Result<()> {
        let result = self.dispatch(command).await;
        self.router.drain(&mut self.effects).await?;
        if let Some(location) = self.router.current() {
            debug!(
                path = %location.path,
                title = %location.title,
                reloads = self.router.reloads(),
                "Final location"
            );
        }
        result
    }

    async fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Login {
                username,
                remember,
                forget,
            } => self.login(username, remember, forget).await,
            Command::Logout => {
                self.auth.logout().await;
                println!("Logged out.");
                Ok(())
            }
            Command::Whoami => self.whoami().await,
            Command::Domains { page, page_size } => {
                self.enter(DNS_ROUTE).await?;
                let result = self.api.page_domains(page.max(1), page_size).await?;
                print!("{}", render::domain_page(&result, page.max(1), page_size));
                Ok(())
            }
            Command::Domain { action } => self.domain(action).await,
            Command::Records { action } => self.records(action).await,
            Command::Open { path } => {
                let location = self.router.push(&path).await?;
                println!("{}  {}", location.path, location.title);
                Ok(())
            }
            Command::Routes { all } => {
                if all {
                    print!("{}", render::routes(ROUTES));
                } else {
                    print!("{}", render::routes(menu()));
                }
                Ok(())
            }
        }
    }

    /// Navigate to a protected route, failing if the guard sends us elsewhere
    async fn enter(&self, route: &str) -> Result<()> {
        let location = self.router.push(route).await?;
        if location.path != normalize(route) {
            bail!("Not logged in. Run `dnsm login` first.");
        }
        Ok(())
    }

    async fn login(&mut self, username: Option<String>, remember: bool, forget: bool) -> Result<()> {
        self.router.push(LOGIN_ROUTE).await?;

        let remembered = self.auth.remembered_login().await;
        let username = match username
            .or_else(|| remembered.as_ref().map(|r| r.username.clone()))
            .or_else(|| self.config.last_username.clone())
        {
            Some(username) => username,
            None => prompt_username()?,
        };
        if username.is_empty() {
            bail!("Username required");
        }

        let password = match std::env::var(PASSWORD_ENV) {
            Ok(password) => password,
            Err(_) => match remembered.as_ref().filter(|r| r.username == username) {
                Some(r) => r.password.clone(),
                None => prompt_password()?,
            },
        };
        if password.is_empty() {
            bail!("Password required");
        }

        let remember = should_remember(remember, forget, remembered.as_ref(), &username);
        let data = self.auth.login(&username, &password, remember).await?;

        self.config.last_username = Some(username);
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }

        println!(
            "Logged in as {} (id {}).",
            data.user_info.username, data.user_info.id
        );
        Ok(())
    }

    async fn whoami(&self) -> Result<()> {
        let session = self.api.session().read().await;
        match session.user_info() {
            Some(user) => {
                println!("{} (id {})", user.username, user.id);
                if let Some(saved) = self.session_saved_at() {
                    println!("Session saved {}", saved);
                }
            }
            None => println!("Not logged in."),
        }
        Ok(())
    }

    fn session_saved_at(&self) -> Option<String> {
        let modified = std::fs::metadata(self.storage.path()).ok()?.modified().ok()?;
        let secs = modified.duration_since(std::time::UNIX_EPOCH).ok()?.as_secs();
        let formatted = format_timestamp_to_second(i64::try_from(secs).ok());
        (!formatted.is_empty()).then_some(formatted)
    }

    async fn domain(&self, action: DomainAction) -> Result<()> {
        self.enter(DNS_ROUTE).await?;
        match action {
            DomainAction::Show { name } => {
                let domain = self.api.domain_detail(&name).await?;
                print!("{}", render::domain(&domain));
            }
            DomainAction::Create { name } => {
                let params = CreateDomainParams {
                    name: name.clone(),
                    records: Vec::new(),
                };
                self.api.create_domain(&params).await?;
                println!("Created {}.", name);
            }
            DomainAction::Delete { name } => {
                self.api.delete_domain(&name).await?;
                println!("Deleted {}.", name);
            }
        }
        Ok(())
    }

    async fn records(&self, action: RecordAction) -> Result<()> {
        self.enter(DNS_ROUTE).await?;
        match action {
            RecordAction::List { domain } => {
                let records = self.api.list_records(&domain).await?;
                print!("{}", render::records(&records));
            }
            RecordAction::Add { domain, record } => {
                let params = RecordParams::from(record);
                self.api.add_record(&domain, &params).await?;
                println!("Added {} {} to {}.", params.record_type, params.name, domain);
            }
            RecordAction::Update {
                domain,
                record,
                fields,
            } => {
                let params = RecordParams::from(fields);
                self.api.update_record(&domain, &record, &params).await?;
                println!("Updated {} in {}.", record, domain);
            }
            RecordAction::Delete { domain, record } => {
                self.api.delete_record(&domain, &record).await?;
                println!("Deleted {} from {}.", record, domain);
            }
        }
        Ok(())
    }
}

fn prompt_username() -> Result<String> {
    print!("Username: ");
    io::stdout().flush()?;

    let mut username = String::new();
    io::stdin()
        .read_line(&mut username)
        .context("Failed to read username")?;
    Ok(username.trim().to_string())
}

fn prompt_password() -> Result<String> {
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;
    Ok(password)
}
