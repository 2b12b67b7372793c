//! Application - Command Dispatch
//!
//! Wires config, session and stores together and runs one CLI command.
//! `--demo` swaps the backend for in-memory sample data with a signed-in
//! administrator.

use std::path::Path;
use std::sync::Arc;

use crate::components::{Pagination, render_stats, render_table};
use crate::domain::config::AppConfig;
use crate::domain::{Client, EntityId, Product, Promotion, Role, Sale, Session, SessionUser, User};
use crate::error::{Error, Result};
use crate::features::{Dashboard, DashboardStores, ListController, Page};
use crate::helpers::session_key;
use crate::i18n::{Locale, t};
use crate::services::{
    AuthClient, EntityStore, ImageStorage, MemoryStorage, MemoryStore, ObjectStorage, RestClient,
    RestStore, ServiceAction, ServiceEvent, ServiceHub, SessionVault, demo,
};
use crate::state::{NoticeState, SessionState};
use crate::utils::config_store::resolve_config;
use crate::view::SortSpec;

use super::cli::{Cli, Command, PageKind};
use super::navigation::{GuardOutcome, guard};

/// Demo sessions last a working day
const DEMO_SESSION_SECS: i64 = 8 * 3600;

/// The store behind every page, plus image storage
#[derive(Clone)]
pub struct Stores {
    pub products: Arc<dyn EntityStore<Product>>,
    pub clients: Arc<dyn EntityStore<Client>>,
    pub sales: Arc<dyn EntityStore<Sale>>,
    pub promotions: Arc<dyn EntityStore<Promotion>>,
    pub users: Arc<dyn EntityStore<User>>,
    pub images: Arc<dyn ObjectStorage>,
}

impl Stores {
    /// Sample data held in memory
    pub fn demo() -> Self {
        let products = demo::products();
        let clients = demo::clients();
        Self {
            sales: Arc::new(MemoryStore::with_rows(demo::sales(&products, &clients))),
            products: Arc::new(MemoryStore::with_rows(products)),
            clients: Arc::new(MemoryStore::with_rows(clients)),
            promotions: Arc::new(MemoryStore::with_rows(demo::promotions())),
            users: Arc::new(MemoryStore::with_rows(demo::users())),
            images: Arc::new(MemoryStorage::new()),
        }
    }

    /// REST tables and the upload function, authorized as `client`
    pub fn remote(client: &RestClient, config: &AppConfig) -> Self {
        Self {
            products: Arc::new(RestStore::<Product>::new(client.clone())),
            clients: Arc::new(RestStore::<Client>::new(client.clone())),
            sales: Arc::new(RestStore::<Sale>::new(client.clone())),
            promotions: Arc::new(RestStore::<Promotion>::new(client.clone())),
            users: Arc::new(RestStore::<User>::new(client.clone())),
            images: Arc::new(ImageStorage::new(client.clone(), config)),
        }
    }

    fn dashboard(&self, include_users: bool) -> DashboardStores {
        DashboardStores {
            products: self.products.clone(),
            clients: self.clients.clone(),
            sales: self.sales.clone(),
            promotions: self.promotions.clone(),
            users: include_users.then(|| self.users.clone()),
        }
    }
}

/// Options of `list`, detached from the clap enum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub filters: Vec<(String, String)>,
    pub sort: Option<String>,
    pub desc: bool,
    /// One-based
    pub page_number: usize,
    pub page_size: Option<usize>,
}

enum Mode {
    Demo,
    Remote { client: RestClient, auth: AuthClient },
}

/// One CLI run
pub struct Application {
    config: AppConfig,
    mode: Mode,
    stores: Stores,
    session: SessionState,
    hub: ServiceHub,
    notices: NoticeState,
}

impl Application {
    /// Build from parsed arguments: config file, env overrides and locale flag
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = resolve_config(cli.config.as_deref())?;
        let locale = Locale::resolve(cli.locale.as_deref().unwrap_or(&config.ui.locale));
        if cli.demo {
            Ok(Self::demo(config, locale))
        } else {
            Self::remote(config, locale)
        }
    }

    /// In-memory data with an administrator already signed in
    pub fn demo(config: AppConfig, locale: Locale) -> Self {
        let admin = SessionUser {
            id: EntityId::from("usr-1"),
            email: "admin@ferremarket.co".to_string(),
            rol: Some(Role::Admin),
        };
        let session = Session::new("demo".into(), "demo".into(), DEMO_SESSION_SECS, admin);
        tracing::info!("Running with demo data");
        Self::assemble(config, Mode::Demo, Stores::demo(), SessionState::new(Some(session), locale))
    }

    /// Backend-backed run, resuming a saved session when there is one
    pub fn remote(config: AppConfig, locale: Locale) -> Result<Self> {
        Self::remote_with_vault(
            config.clone(),
            locale,
            SessionVault::in_data_dir(session_key(&config.backend.anon_key))?,
        )
    }

    pub fn remote_with_vault(config: AppConfig, locale: Locale, vault: SessionVault) -> Result<Self> {
        let client = RestClient::new(&config.backend)?;
        let auth = AuthClient::new(client.clone(), vault);
        let session = auth.current_session()?;
        let stores = Stores::remote(&authorized(&client, session.as_ref()), &config);
        tracing::debug!(signed_in = session.is_some(), url = %config.backend.url, "Backend configured");
        Ok(Self::assemble(
            config,
            Mode::Remote { client, auth },
            stores,
            SessionState::new(session, locale),
        ))
    }

    fn assemble(config: AppConfig, mode: Mode, stores: Stores, session: SessionState) -> Self {
        let notices = NoticeState::new(crate::constants::NOTICE_CAPACITY, session.locale);
        Self {
            config,
            mode,
            stores,
            session,
            hub: ServiceHub::new(),
            notices,
        }
    }

    pub fn locale(&self) -> Locale {
        self.session.locale
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Notices produced since the last call, as `[LEVEL] message` lines
    pub fn take_notices(&mut self) -> Vec<String> {
        self.notices.drain_from(&self.hub.events());
        let lines = self
            .notices
            .entries()
            .iter()
            .map(|n| format!("[{}] {}", n.level.label(), n.message))
            .collect();
        self.notices.clear();
        lines
    }

    fn check_access(&self, command: &Command) -> Result<()> {
        let Some(route) = command.route() else {
            return Ok(());
        };
        match guard(route, &self.session) {
            GuardOutcome::Allow(_) => Ok(()),
            GuardOutcome::Redirect { to, reason } => {
                tracing::info!(requested = route.path(), redirected = to.path(), "Access denied");
                Err(Error::Unauthorized {
                    message: t(self.locale(), reason.message_key()).to_string(),
                })
            }
        }
    }

    /// Run one command and return what to print
    pub async fn run(&mut self, command: Command) -> Result<String> {
        self.check_access(&command)?;

        match command {
            Command::Login { email, password } => self.login(&email, &password).await,
            Command::Logout => self.logout().await,
            Command::Dashboard => {
                let stores = self.stores.dashboard(self.session.is_admin());
                let dashboard = Dashboard::load(&stores, &self.hub).await;
                Ok(dashboard.render(self.locale()))
            }
            Command::List {
                page,
                search,
                filters,
                sort,
                desc,
                page_number,
                page_size,
            } => {
                let query = ListQuery {
                    search,
                    filters,
                    sort,
                    desc,
                    page_number,
                    page_size,
                };
                self.list(page, &query).await
            }
            Command::Delete { page, id } => self.delete(page, EntityId::from(id)).await,
            Command::UploadImage { product_id, file } => {
                self.upload_image(EntityId::from(product_id), &file).await
            }
        }
    }

    async fn login(&mut self, email: &str, password: &str) -> Result<String> {
        let session = match &self.mode {
            Mode::Demo => demo_sign_in(email, password)?,
            Mode::Remote { client, auth } => {
                let session = auth.sign_in(email, password).await.inspect_err(|e| {
                    self.hub.emit(ServiceEvent::failed("Session", ServiceAction::SignIn, e));
                })?;
                self.stores = Stores::remote(&authorized(client, Some(&session)), &self.config);
                session
            }
        };
        let email = session.user.email.clone();
        self.session.sign_in(session);
        self.hub.emit(ServiceEvent::SessionChanged {
            email: Some(Arc::from(email.as_str())),
        });
        Ok(email)
    }

    async fn logout(&mut self) -> Result<String> {
        if let Mode::Remote { client, auth } = &self.mode {
            auth.sign_out().await?;
            self.stores = Stores::remote(&authorized(client, None), &self.config);
        }
        self.session.sign_out();
        self.hub.emit(ServiceEvent::SessionChanged { email: None });
        Ok(String::new())
    }

    fn page_size(&self, query: &ListQuery) -> usize {
        query.page_size.unwrap_or(self.config.ui.page_size)
    }

    async fn list(&self, page: PageKind, query: &ListQuery) -> Result<String> {
        let size = self.page_size(query);
        let locale = self.locale();
        match page {
            PageKind::Products => list_page(self.stores.products.clone(), &self.hub, query, size, locale).await,
            PageKind::Clients => list_page(self.stores.clients.clone(), &self.hub, query, size, locale).await,
            PageKind::Sales => list_page(self.stores.sales.clone(), &self.hub, query, size, locale).await,
            PageKind::Promotions => {
                list_page(self.stores.promotions.clone(), &self.hub, query, size, locale).await
            }
            PageKind::Users => list_page(self.stores.users.clone(), &self.hub, query, size, locale).await,
        }
    }

    async fn delete(&self, page: PageKind, id: EntityId) -> Result<String> {
        match page {
            PageKind::Products => delete_record(self.stores.products.clone(), &self.hub, &id).await?,
            PageKind::Clients => delete_record(self.stores.clients.clone(), &self.hub, &id).await?,
            PageKind::Sales => delete_record(self.stores.sales.clone(), &self.hub, &id).await?,
            PageKind::Promotions => delete_record(self.stores.promotions.clone(), &self.hub, &id).await?,
            PageKind::Users => delete_record(self.stores.users.clone(), &self.hub, &id).await?,
        }
        Ok(id.to_string())
    }

    async fn upload_image(&self, id: EntityId, file: &Path) -> Result<String> {
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Invalid {
                message: format!("Not a file: {}", file.display()),
            })?;
        let bytes = std::fs::read(file)?;

        let mut controller = ListController::new(self.stores.products.clone(), self.hub.clone());
        controller.refresh().await?;
        controller
            .upload_image(&id, file_name, bytes, self.stores.images.as_ref())
            .await
    }
}

/// REST client carrying the session token when signed in
fn authorized(client: &RestClient, session: Option<&Session>) -> RestClient {
    match session {
        Some(s) => client.clone().with_token(s.access_token.as_str()),
        None => client.clone(),
    }
}

/// Demo sign-in: any active sample account with a non-empty password
fn demo_sign_in(email: &str, password: &str) -> Result<Session> {
    if password.is_empty() {
        return Err(Error::Invalid {
            message: "Email and password are required".to_string(),
        });
    }
    let user = demo::users()
        .into_iter()
        .find(|u| u.activo && u.email.eq_ignore_ascii_case(email.trim()))
        .ok_or_else(|| Error::Unauthorized {
            message: "Invalid login credentials".to_string(),
        })?;
    Ok(Session::new(
        "demo".into(),
        "demo".into(),
        DEMO_SESSION_SECS,
        SessionUser {
            id: user.id,
            email: user.email,
            rol: Some(user.rol),
        },
    ))
}

async fn list_page<T: Page>(
    store: Arc<dyn EntityStore<T>>,
    hub: &ServiceHub,
    query: &ListQuery,
    page_size: usize,
    locale: Locale,
) -> Result<String> {
    let mut controller = ListController::new(store, hub.clone()).with_page_size(page_size);
    controller.refresh().await?;

    if let Some(search) = &query.search {
        controller.set_search(search.as_str());
    }
    for (id, value) in &query.filters {
        if !controller.config().has_filter(id) {
            return Err(Error::Invalid {
                message: format!(
                    "Unknown filter {id:?}; available: {}",
                    controller.config().filter_ids().join(", ")
                ),
            });
        }
        controller.set_filter(id.as_str(), value.as_str());
    }
    if let Some(field) = &query.sort {
        controller.set_sort(Some(if query.desc {
            SortSpec::desc(field.as_str())
        } else {
            SortSpec::asc(field.as_str())
        }));
    }
    controller.go_to_page(query.page_number.saturating_sub(1));

    let view = controller.view();
    let mut out = format!("{}\n\n", t(locale, T::TITLE_KEY));
    out.push_str(&render_stats(&view.stats, T::stat_format, locale));
    out.push('\n');
    out.push_str(&render_table(
        &T::columns(),
        &view,
        controller.view_state().sort.as_ref(),
        locale,
    ));
    out.push_str(&Pagination::from_view(&view).render(locale));
    out.push('\n');
    Ok(out)
}

async fn delete_record<T: Page>(
    store: Arc<dyn EntityStore<T>>,
    hub: &ServiceHub,
    id: &EntityId,
) -> Result<()> {
    ListController::new(store, hub.clone()).delete(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::DEFAULT_SESSION_KEY;

    fn demo_app() -> Application {
        Application::demo(AppConfig::default(), Locale::En)
    }

    fn list(page: PageKind) -> Command {
        list_with(
            page,
            ListQuery {
                page_number: 1,
                ..ListQuery::default()
            },
        )
    }

    fn list_with(page: PageKind, query: ListQuery) -> Command {
        Command::List {
            page,
            search: query.search,
            filters: query.filters,
            sort: query.sort,
            desc: query.desc,
            page_number: query.page_number,
            page_size: query.page_size,
        }
    }

    #[tokio::test]
    async fn demo_lists_products() {
        let mut app = demo_app();
        let out = app.run(list(PageKind::Products)).await.unwrap();

        assert!(out.starts_with("Products\n"));
        assert!(out.contains("Page 1 of 2 · 12 results"));
        assert!(app.take_notices().iter().any(|n| n.starts_with("[INFO]")));
    }

    #[tokio::test]
    async fn list_applies_query() {
        let mut app = demo_app();
        let command = Command::List {
            page: PageKind::Clients,
            search: None,
            filters: vec![("segmento".into(), "nuevo".into())],
            sort: Some("nombre".into()),
            desc: true,
            page_number: 9,
            page_size: Some(3),
        };
        let out = app.run(command).await.unwrap();
        assert!(out.contains("Name ↓"));
        assert!(!out.contains("No data"));
    }

    #[tokio::test]
    async fn unknown_filter_is_reported() {
        let mut app = demo_app();
        let command = list_with(
            PageKind::Products,
            ListQuery {
                filters: vec![("color".into(), "rojo".into())],
                page_number: 1,
                ..ListQuery::default()
            },
        );
        let err = app.run(command).await.unwrap_err();
        assert!(err.to_string().contains("nivel_stock"));
    }

    #[tokio::test]
    async fn demo_delete_then_missing() {
        let mut app = demo_app();
        let delete = Command::Delete {
            page: PageKind::Sales,
            id: "venta-001".into(),
        };
        assert_eq!(app.run(delete.clone()).await.unwrap(), "venta-001");
        assert!(matches!(app.run(delete).await, Err(Error::NotFound { .. })));
        assert!(app.take_notices().iter().any(|n| n.starts_with("[ERROR]")));
    }

    #[tokio::test]
    async fn sellers_are_kept_out_of_users() {
        let mut app = demo_app();
        app.run(Command::Login {
            email: "laura@ferremarket.co".into(),
            password: "secreta".into(),
        })
        .await
        .unwrap();
        assert!(!app.session().is_admin());

        let err = app.run(list(PageKind::Users)).await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized { .. }));

        let dashboard = app.run(Command::Dashboard).await.unwrap();
        assert!(!dashboard.contains("== Users =="));
    }

    #[tokio::test]
    async fn signed_out_runs_need_login() {
        let dir = tempfile::tempdir().unwrap();
        let vault = SessionVault::new(dir.path().join("session.dat"), *DEFAULT_SESSION_KEY);
        let mut app = Application::remote_with_vault(AppConfig::default(), Locale::Es, vault).unwrap();

        let err = app.run(Command::Dashboard).await.unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized: Debe iniciar sesión");
    }

    #[tokio::test]
    async fn demo_upload_links_image() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taladro.jpg");
        std::fs::write(&file, [0xFF, 0xD8, 0xFF]).unwrap();

        let mut app = demo_app();
        let url = app
            .run(Command::UploadImage {
                product_id: "prod-04".into(),
                file,
            })
            .await
            .unwrap();
        assert!(url.starts_with("memory://prod-04/"));
        assert!(url.ends_with(".jpg"));
    }
}
