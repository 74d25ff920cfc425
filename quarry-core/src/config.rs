use crate::{Connection, Driver, Error, QuarryError, Result};
use serde::Deserialize;
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::{Arc, LazyLock, RwLock},
};
use url::Url;

/// Database dialect of a configured connection, the `type` key in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    Pgsql,
    Mysql,
    Sqlite,
    Ibase,
    Oci8,
    Mssql,
}

impl DatabaseType {
    /// Name of the [`Driver`] serving this dialect, also the scheme of its URLs.
    pub fn driver_name(&self) -> &'static str {
        match self {
            DatabaseType::Pgsql => "postgres",
            DatabaseType::Mysql => "mysql",
            DatabaseType::Sqlite => "sqlite",
            DatabaseType::Ibase => "firebird",
            DatabaseType::Oci8 => "oracle",
            DatabaseType::Mssql => "mssql",
        }
    }

    pub fn default_port(&self) -> Option<u16> {
        match self {
            DatabaseType::Pgsql => Some(5432),
            DatabaseType::Mysql => Some(3306),
            DatabaseType::Mssql => Some(1433),
            DatabaseType::Sqlite | DatabaseType::Ibase | DatabaseType::Oci8 => None,
        }
    }
}

/// One named entry of the connections file.
///
/// ```toml
/// [main]
/// type = "pgsql"
/// host = "localhost"
/// name = "shop"
/// user = "postgres"
/// pass = "secret"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionConfig {
    #[serde(rename = "type")]
    pub database_type: DatabaseType,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub name: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl ConnectionConfig {
    pub fn new(database_type: DatabaseType) -> Self {
        Self {
            database_type,
            user: None,
            pass: None,
            name: None,
            host: None,
            port: None,
        }
    }

    /// URL handed to the driver.
    pub fn url(&self) -> Result<String> {
        let scheme = self.database_type.driver_name();
        let name = self.name.as_deref().unwrap_or_default();
        if self.database_type == DatabaseType::Sqlite {
            return Ok(format!("{}://{}", scheme, name));
        }
        let host = self.host.as_deref().unwrap_or("localhost");
        let mut url = Url::parse(&format!("{}://{}/{}", scheme, host, name))
            .map_err(|e| Error::new(e).context(format!("Invalid {} connection parameters", scheme)))?;
        if let Some(port) = self.port.or(self.database_type.default_port()) {
            let _ = url.set_port(Some(port));
        }
        if let Some(user) = &self.user {
            let _ = url.set_username(user);
        }
        if let Some(pass) = &self.pass {
            let _ = url.set_password(Some(pass));
        }
        Ok(url.into())
    }
}

#[derive(Default)]
struct Registry {
    path: Option<PathBuf>,
    config: BTreeMap<String, ConnectionConfig>,
    drivers: HashMap<&'static str, Arc<dyn Driver>>,
}

static REGISTRY: LazyLock<RwLock<Registry>> = LazyLock::new(Default::default);

fn registry_read() -> std::sync::RwLockReadGuard<'static, Registry> {
    REGISTRY.read().unwrap_or_else(|e| e.into_inner())
}

fn registry_write() -> std::sync::RwLockWriteGuard<'static, Registry> {
    REGISTRY.write().unwrap_or_else(|e| e.into_inner())
}

/// Process-wide table of named connections and of the drivers able to open them.
pub struct Connections;

impl Connections {
    /// Load the connections file, replacing the entries loaded before.
    pub fn load(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.is_file() {
            let error = QuarryError::ConfigFileNotFound(path.to_path_buf());
            log::error!("{}", error);
            return Err(error.into());
        }
        let invalid = |reason: String| QuarryError::InvalidConfigFile {
            path: path.to_path_buf(),
            reason,
        };
        let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let config: BTreeMap<String, ConnectionConfig> =
            toml::from_str(&content).map_err(|e| invalid(e.message().to_string()))?;
        if config.is_empty() {
            return Err(invalid("it must define at least one connection".into()).into());
        }
        log::debug!(
            "Loaded {} connection(s) from {}",
            config.len(),
            path.display()
        );
        let mut registry = registry_write();
        registry.path = Some(path.to_path_buf());
        registry.config = config;
        Ok(())
    }

    /// Path of the last file loaded successfully.
    pub fn path() -> Option<PathBuf> {
        registry_read().path.clone()
    }

    pub fn get(name: &str) -> Option<ConnectionConfig> {
        registry_read().config.get(name).cloned()
    }

    /// Add or replace a single named connection.
    pub fn insert(name: impl Into<String>, config: ConnectionConfig) {
        registry_write().config.insert(name.into(), config);
    }

    /// Make `driver` available to open connections of its dialect.
    pub fn register(driver: impl Driver + 'static) {
        let driver: Arc<dyn Driver> = Arc::new(driver);
        registry_write().drivers.insert(driver.name(), driver);
    }

    /// Establish a new connection for the named entry.
    pub async fn open(name: &str) -> Result<Box<dyn Connection>> {
        let (config, driver) = {
            let registry = registry_read();
            let Some(config) = registry.config.get(name).cloned() else {
                return Err(QuarryError::UnknownConnection(name.into()).into());
            };
            let driver_name = config.database_type.driver_name();
            let Some(driver) = registry.drivers.get(driver_name).cloned() else {
                return Err(QuarryError::DriverNotRegistered(driver_name.into()).into());
            };
            (config, driver)
        };
        let url = config.url()?;
        driver
            .connect(&url)
            .await
            .map_err(|e| e.context(format!("While opening the connection `{}`", name)))
    }
}
