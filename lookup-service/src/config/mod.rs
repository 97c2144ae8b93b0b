use crate::classifier::DEFAULT_NOT_FOUND_STATUS;
use axum::http::StatusCode;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;

#[derive(Debug, Clone, Default)]
pub struct LookupConfig {
    pub common: core_config::Config,
    pub lookup: LookupSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupSettings {
    /// Status answered for unknown record ids.
    #[serde(default = "default_not_found_status")]
    pub not_found_status: u16,
}

fn default_not_found_status() -> u16 {
    DEFAULT_NOT_FOUND_STATUS.as_u16()
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            not_found_status: default_not_found_status(),
        }
    }
}

impl LookupSettings {
    /// Only client-error statuses with a standard reason phrase are accepted,
    /// since the phrase is echoed in the `error` field of the envelope.
    pub fn not_found_status(&self) -> Result<StatusCode, AppError> {
        let status = StatusCode::from_u16(self.not_found_status).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "lookup.not_found_status {} is not a status code: {}",
                self.not_found_status,
                e
            ))
        })?;

        if !status.is_client_error() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "lookup.not_found_status must be a 4xx status, got {}",
                self.not_found_status
            )));
        }

        if status.canonical_reason().is_none() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "lookup.not_found_status {} has no standard reason phrase",
                self.not_found_status
            )));
        }

        Ok(status)
    }
}

impl LookupConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_source(core_config::builder().build()?)
    }

    pub fn from_source(source: config::Config) -> Result<Self, AppError> {
        let common: core_config::Config = source.clone().try_deserialize()?;

        let lookup = match source.get::<LookupSettings>("lookup") {
            Ok(settings) => settings,
            Err(config::ConfigError::NotFound(_)) => LookupSettings::default(),
            Err(e) => return Err(e.into()),
        };
        lookup.not_found_status()?;

        Ok(Self { common, lookup })
    }
}
