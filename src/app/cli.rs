//! Command Line
//!
//! Every management page is reachable from the terminal: sign in, look at the
//! dashboard, list a page with search/filter/sort/paging, delete rows and
//! upload product images.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use super::navigation::Route;

#[derive(Parser, Debug)]
#[command(name = "ferremarket-admin")]
#[command(about = "Back-office for the FerreMarket hardware store", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use built-in sample data instead of the backend
    #[arg(long, global = true)]
    pub demo: bool,

    /// Display language: es or en
    #[arg(long, global = true)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Sign in with email and password
    Login {
        email: String,

        #[arg(long, env = "FERREMARKET_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the saved session
    Logout,

    /// Summary cards of every page
    Dashboard,

    /// One page of a management table
    List {
        page: PageKind,

        #[arg(long)]
        search: Option<String>,

        /// Field filter as `key=value`, repeatable
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,

        /// Field to sort by
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// One-based page number
        #[arg(long = "page", default_value = "1")]
        page_number: usize,

        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Delete one record
    Delete { page: PageKind, id: String },

    /// Upload an image file and link it to a product
    UploadImage { product_id: String, file: PathBuf },
}

/// Management pages addressable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    #[value(alias = "productos")]
    Products,
    #[value(alias = "clientes")]
    Clients,
    #[value(alias = "ventas")]
    Sales,
    #[value(alias = "promociones")]
    Promotions,
    #[value(alias = "usuarios")]
    Users,
}

impl PageKind {
    pub fn route(&self) -> Route {
        match self {
            PageKind::Products => Route::Products,
            PageKind::Clients => Route::Clients,
            PageKind::Sales => Route::Sales,
            PageKind::Promotions => Route::Promotions,
            PageKind::Users => Route::Users,
        }
    }
}

impl Command {
    /// Page the command opens; `None` for session commands
    pub fn route(&self) -> Option<Route> {
        match self {
            Command::Login { .. } | Command::Logout => None,
            Command::Dashboard => Some(Route::Dashboard),
            Command::List { page, .. } | Command::Delete { page, .. } => Some(page.route()),
            Command::UploadImage { .. } => Some(Route::Products),
        }
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected key=value, got {raw:?}")),
    }
}
