//! Storefront client shell: process entry point.
//!
//! A headless application shell that drives the same router, session store,
//! and API services a graphical front end would.  Each subcommand is one user
//! action; view "mounting" is printing which view the router selected.
//!
//! # Usage
//!
//! ```text
//! storefront [OPTIONS] <COMMAND>
//!
//! Commands:
//!   open      Navigate through one or more paths and print the mounted views
//!   status    Print the current view and session status
//!   login     Log in and store the returned session token
//!   register  Create an account
//!   logout    Clear the stored session token
//!   products  Search products
//!   create-product  Create a product from a JSON body
//!   orders    List orders
//!   order     Place an order
//!   init-config  Write the effective configuration to the config file
//!
//! Options:
//!   --config <PATH>        Config file [default: platform config dir]
//!   --api-base <URL>       Remote API base address      [env: STOREFRONT_API_BASE]
//!   --storage-dir <DIR>    Directory of session.json    [env: STOREFRONT_STORAGE_DIR]
//!   --ephemeral            Keep the session token in memory only
//! ```
//!
//! The log level comes from `RUST_LOG`, falling back to `client.log_level`
//! in the config file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront_client::application::{
    AuthService, LoginFlow, LoginOutcome, OrderService, ProductService, Router, SessionStore,
    TokenStore,
};
use storefront_client::infrastructure::history::MemoryHistory;
use storefront_client::infrastructure::network::HttpApiClient;
use storefront_client::infrastructure::storage::config::{self, AppConfig};
use storefront_client::infrastructure::storage::{FileTokenStore, MemoryTokenStore};
use storefront_core::protocol::{Credentials, OrderCreate, OrderProductCreate, ProductQuery, Registration};
use storefront_core::RouteTable;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Storefront client shell.
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Headless storefront client", version)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base address of the remote storefront API.
    #[arg(long, env = "STOREFRONT_API_BASE")]
    api_base: Option<String>,

    /// Directory holding the durable session token file.
    #[arg(long, env = "STOREFRONT_STORAGE_DIR")]
    storage_dir: Option<PathBuf>,

    /// Keep the session token in memory for this run only.
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Navigate through the given paths in order.
    Open {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Print the start view and whether a session is active.
    Status,
    /// Log in and store the returned session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Clear the stored session token.
    Logout,
    /// Search products with `key=value` query parameters.
    Products {
        #[arg(long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
    },
    /// Create a product from a raw JSON body.
    CreateProduct {
        #[arg(long, value_parser = parse_json)]
        body: Value,
    },
    /// List orders.
    Orders,
    /// Place an order from `product_id:quantity` lines.
    Order {
        #[arg(long = "product", value_parser = parse_order_line, required = true)]
        products: Vec<OrderProductCreate>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Write the effective configuration (file plus overrides) to the config file.
    InitConfig {
        /// Replace an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

fn parse_order_line(raw: &str) -> Result<OrderProductCreate, String> {
    let (product_id, quantity) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected product_id:quantity, got '{raw}'"))?;
    if product_id.is_empty() {
        return Err(format!("missing product id in '{raw}'"));
    }
    let quantity = quantity
        .parse::<u32>()
        .map_err(|e| format!("invalid quantity in '{raw}': {e}"))?;
    Ok(OrderProductCreate {
        product_id: product_id.to_string(),
        quantity,
    })
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON body: {e}"))
}

impl Cli {
    /// Loads the config file and applies the CLI overrides on top of it.
    fn resolve_config(&self) -> anyhow::Result<AppConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_config_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => match config::load_config() {
                Ok(cfg) => cfg,
                Err(config::ConfigError::NoPlatformConfigDir) => AppConfig::default(),
                Err(e) => return Err(e).context("failed to load config"),
            },
        };
        if let Some(base) = &self.api_base {
            cfg.api.base_url = base.clone();
        }
        if let Some(dir) = &self.storage_dir {
            cfg.session.storage_dir = Some(dir.clone());
        }
        Ok(cfg)
    }

    /// Saves `cfg` to `--config` or the platform config file and returns the
    /// path written.  An existing file is kept unless `force` is set.
    fn init_config(&self, cfg: &AppConfig, force: bool) -> anyhow::Result<PathBuf> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => config::config_file_path().context("no location for the config file")?,
        };
        if path.exists() && !force {
            bail!("{} already exists (use --force to replace it)", path.display());
        }
        config::save_config_to(&path, cfg)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(path)
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

fn token_store(cli: &Cli, cfg: &AppConfig) -> anyhow::Result<Arc<dyn TokenStore>> {
    if cli.ephemeral {
        return Ok(Arc::new(MemoryTokenStore::new()));
    }
    let store = match &cfg.session.storage_dir {
        Some(dir) => FileTokenStore::in_dir(dir),
        None => FileTokenStore::platform_default().context("no location for the session token")?,
    };
    info!("session token slot at {}", store.path().display());
    Ok(Arc::new(store))
}

fn print_json(body: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(body)?);
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = cli.resolve_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cfg.client.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Command::InitConfig { force } = cli.command {
        let path = cli.init_config(&cfg, force)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    // Session state is initialised from local storage before any view mounts.
    let slot = token_store(&cli, &cfg)?;
    let session = Arc::new(SessionStore::initialize(Arc::clone(&slot)));
    session.on_session_state_changed(|authenticated| {
        info!("session state changed (authenticated={authenticated})");
    });

    let mut router = Router::new(
        RouteTable::storefront(),
        Box::new(MemoryHistory::new(&cfg.client.start_path)),
    );

    let api = Arc::new(
        HttpApiClient::new(&cfg.api.base_url, cfg.api.timeout())
            .with_context(|| format!("invalid API base '{}'", cfg.api.base_url))?
            .with_token_store(Arc::clone(&slot)),
    );
    let auth = AuthService::new(api.clone());
    let products = ProductService::new(api.clone());
    let orders = OrderService::new(api);

    match cli.command {
        Command::Open { paths } => {
            for path in &paths {
                let nav = router.navigate(path);
                println!("{} → {}", nav.path, nav.view);
            }
            println!("authenticated: {}", session.is_authenticated());
        }
        Command::Status => {
            println!("{} → {}", router.current_path(), router.current_view());
            println!("authenticated: {}", session.is_authenticated());
        }
        Command::Login { email, password } => {
            println!("{}", router.navigate("/login").view);
            let flow = LoginFlow::new(
                auth,
                Arc::clone(&session),
                router.generation(),
                cfg.session.token_pointer.clone(),
            );
            match flow.login(&Credentials { email, password }).await? {
                LoginOutcome::Authenticated => println!("logged in"),
                LoginOutcome::Discarded => bail!("login response arrived after navigation"),
            }
        }
        Command::Register {
            email,
            password,
            name,
        } => {
            println!("{}", router.navigate("/register").view);
            let body = auth
                .register(&Registration {
                    email,
                    password,
                    name,
                })
                .await?;
            print_json(&body)?;
        }
        Command::Logout => {
            session.logout();
            println!("logged out");
        }
        Command::Products { query } => {
            println!("{}", router.navigate("/").view);
            let body = products
                .fetch_products(&query.into_iter().collect::<ProductQuery>())
                .await?;
            print_json(&body)?;
        }
        Command::CreateProduct { body } => {
            print_json(&products.create_product(&body).await?)?;
        }
        Command::Orders => {
            println!("{}", router.navigate("/profile").view);
            print_json(&orders.fetch_orders().await?)?;
        }
        Command::Order { products, status } => {
            println!("{}", router.navigate("/cart").view);
            let body = orders.create_order(&OrderCreate { products, status }).await?;
            print_json(&body)?;
        }
        // Written before any wiring, above.
        Command::InitConfig { .. } => {}
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_open_collects_paths() {
        let cli = Cli::parse_from(["storefront", "open", "/", "/cart"]);
        match cli.command {
            Command::Open { paths } => assert_eq!(paths, vec!["/", "/cart"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_open_requires_a_path() {
        assert!(Cli::try_parse_from(["storefront", "open"]).is_err());
    }

    #[test]
    fn test_cli_global_overrides() {
        let cli = Cli::parse_from([
            "storefront",
            "--api-base",
            "http://10.0.0.5:9000",
            "--storage-dir",
            "/tmp/sf",
            "--ephemeral",
            "status",
        ]);
        assert_eq!(cli.api_base.as_deref(), Some("http://10.0.0.5:9000"));
        assert_eq!(cli.storage_dir, Some(PathBuf::from("/tmp/sf")));
        assert!(cli.ephemeral);
    }

    #[test]
    fn test_cli_products_parses_query_pairs() {
        let cli = Cli::parse_from(["storefront", "products", "--query", "q=apple", "--query", "page=2"]);
        match cli.command {
            Command::Products { query } => assert_eq!(
                query,
                vec![
                    ("q".to_string(), "apple".to_string()),
                    ("page".to_string(), "2".to_string())
                ]
            ),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_order_parses_lines() {
        let cli = Cli::parse_from(["storefront", "order", "--product", "p-1:2", "--status", "new"]);
        match cli.command {
            Command::Order { products, status } => {
                assert_eq!(products[0].product_id, "p-1");
                assert_eq!(products[0].quantity, 2);
                assert_eq!(status.as_deref(), Some("new"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_key_value_keeps_equals_in_value() {
        assert_eq!(
            parse_key_value("q=a=b"),
            Ok(("q".to_string(), "a=b".to_string()))
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_parse_order_line_rejects_bad_input() {
        assert!(parse_order_line("p-1").is_err());
        assert!(parse_order_line(":3").is_err());
        assert!(parse_order_line("p-1:many").is_err());
    }

    #[test]
    fn test_parse_order_line_splits_on_last_colon() {
        let line = parse_order_line("sku:42:5").unwrap();
        assert_eq!(line.product_id, "sku:42");
        assert_eq!(line.quantity, 5);
    }

    #[test]
    fn test_parse_json_body() {
        assert_eq!(parse_json(r#"{"name":"Pear"}"#).unwrap()["name"], "Pear");
        assert!(parse_json("{").is_err());
    }

    #[test]
    fn test_resolve_config_applies_overrides() {
        // Arrange: point --config at a file that does not exist (defaults apply)
        let missing = std::env::temp_dir().join("storefront-missing-config.toml");
        let cli = Cli::parse_from([
            "storefront",
            "--config",
            missing.to_str().unwrap(),
            "--api-base",
            "http://api.test",
            "--storage-dir",
            "/tmp/sf",
            "status",
        ]);

        // Act
        let cfg = cli.resolve_config().unwrap();

        // Assert
        assert_eq!(cfg.api.base_url, "http://api.test");
        assert_eq!(cfg.session.storage_dir, Some(PathBuf::from("/tmp/sf")));
        assert_eq!(cfg.session.token_pointer, "/token");
    }

    #[test]
    fn test_init_config_writes_effective_config_once() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("storefront_init_{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");
        let cli = Cli::parse_from([
            "storefront",
            "--config",
            path.to_str().unwrap(),
            "--api-base",
            "http://api.test",
            "init-config",
        ]);
        let cfg = cli.resolve_config().unwrap();

        // Act
        let written = cli.init_config(&cfg, false).unwrap();

        // Assert
        assert_eq!(written, path);
        let loaded = config::load_config_from(&path).unwrap();
        assert_eq!(loaded.api.base_url, "http://api.test");
        assert!(cli.init_config(&cfg, false).is_err(), "existing file is kept");
        assert!(cli.init_config(&cfg, true).is_ok());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_cli_init_config_force_flag() {
        let cli = Cli::parse_from(["storefront", "init-config", "--force"]);
        assert!(matches!(cli.command, Command::InitConfig { force: true }));
    }
}
