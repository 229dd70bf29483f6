use std::{env, fs, path::Path, path::PathBuf, sync::Once};

use crate::errors::InvoiceError;

const DEFAULT_DIR_NAME: &str = ".invoice_core";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("invoice_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application-specific data directory, defaulting to `~/.invoice_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("INVOICE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Creates the directory (and parents) when it does not exist yet.
pub fn ensure_dir(path: &Path) -> Result<(), InvoiceError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
