//! # Settings
//!
//! Shows the company details and notification toggles from the config
//! file, and writes changes back when any update flag is given.

use megapc_client::config::{GeneralSettings, NotificationSettings};
use megapc_client::ConsoleConfig;
use megapc_core::ValidationError;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use crate::error::ConsoleResult;
use crate::render;

/// Fields the operator can change; `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub company: Option<String>,
    pub email: Option<String>,
    pub currency: Option<String>,
    pub low_stock_alerts: Option<bool>,
    pub daily_reports: Option<bool>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.email.is_none()
            && self.currency.is_none()
            && self.low_stock_alerts.is_none()
            && self.daily_reports.is_none()
    }

    fn validate(&self) -> ConsoleResult<()> {
        for (field, value) in [("company", &self.company), ("currency", &self.currency)] {
            if matches!(value, Some(v) if v.trim().is_empty()) {
                return Err(ValidationError::Required {
                    field: field.to_string(),
                }
                .into());
            }
        }
        if let Some(email) = &self.email {
            let valid = email
                .split_once('@')
                .map(|(user, domain)| !user.is_empty() && domain.contains('.'))
                .unwrap_or(false);
            if !valid {
                return Err(ValidationError::InvalidFormat {
                    field: "email".to_string(),
                    reason: email.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Writes the given fields into `config`; true when anything changed.
    pub fn apply_to(&self, config: &mut ConsoleConfig) -> ConsoleResult<bool> {
        self.validate()?;

        let general = &mut config.general;
        let notifications = &mut config.notifications;
        let mut changed = false;

        changed |= set(&mut general.company, self.company.as_ref().map(|s| s.trim().to_string()));
        changed |= set(&mut general.email, self.email.clone());
        changed |= set(&mut general.currency, self.currency.as_ref().map(|s| s.trim().to_string()));
        changed |= set(&mut notifications.low_stock_alerts, self.low_stock_alerts);
        changed |= set(&mut notifications.daily_reports, self.daily_reports);

        Ok(changed)
    }
}

fn set<T: PartialEq>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) if *slot != v => {
            *slot = v;
            true
        }
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsView {
    pub general: GeneralSettings,
    pub notifications: NotificationSettings,
    pub api_url: String,
    pub low_stock_threshold: u32,
    /// Where the config was written, when this run changed it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
}

impl SettingsView {
    pub fn new(config: &ConsoleConfig) -> Self {
        SettingsView {
            general: config.general.clone(),
            notifications: config.notifications.clone(),
            api_url: config.api.base_url.clone(),
            low_stock_threshold: config.catalogue.low_stock_threshold,
            saved_to: None,
        }
    }
}

/// Applies `update` and saves the config file when it changed anything.
///
/// `config` is the effective configuration and is only displayed. The
/// update is written over the file's own contents, so environment
/// overrides in `config` stay out of the file.
pub fn run(
    config: &ConsoleConfig,
    config_path: Option<&Path>,
    update: &SettingsUpdate,
) -> ConsoleResult<SettingsView> {
    debug!(update = !update.is_empty(), "settings page");

    let mut effective = config.clone();
    update.apply_to(&mut effective)?;

    let mut saved_to = None;
    if !update.is_empty() {
        let mut stored = ConsoleConfig::load_file(config_path.map(Path::to_path_buf))?;
        if update.apply_to(&mut stored)? {
            let path = stored.save(config_path)?;
            info!(path = %path.display(), "Settings updated");
            saved_to = Some(path.display().to_string());
        }
    }

    Ok(SettingsView {
        saved_to,
        ..SettingsView::new(&effective)
    })
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

impl fmt::Display for SettingsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::heading(f, "Settings")?;

        writeln!(f, "General Settings")?;
        writeln!(f, "  Company Name  {}", self.general.company)?;
        writeln!(f, "  Email         {}", self.general.email)?;
        writeln!(f, "  Currency      {}", self.general.currency)?;
        writeln!(f)?;

        writeln!(f, "Notification Preferences")?;
        writeln!(f, "  Low Stock Alerts  {}", on_off(self.notifications.low_stock_alerts))?;
        writeln!(f, "  Daily Reports     {}", on_off(self.notifications.daily_reports))?;
        writeln!(f)?;

        writeln!(f, "Connection")?;
        writeln!(f, "  API URL              {}", self.api_url)?;
        writeln!(f, "  Low stock threshold  {}", self.low_stock_threshold)?;

        if let Some(path) = &self.saved_to {
            writeln!(f)?;
            writeln!(f, "Saved to {}", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("megapc-settings-{}-{}", std::process::id(), name))
            .join("console.toml")
    }

    #[test]
    fn test_show_without_update_does_not_save() {
        let path = scratch_path("show");
        let config = ConsoleConfig::default();

        let view = run(&config, Some(&path), &SettingsUpdate::default()).unwrap();
        assert_eq!(view.general.company, "MegaPC");
        assert_eq!(view.general.currency, "TND (Tunisian Dinar)");
        assert!(!view.notifications.low_stock_alerts);
        assert!(view.saved_to.is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_update_is_saved() {
        let path = scratch_path("update");
        let config = ConsoleConfig::default();
        let update = SettingsUpdate {
            company: Some("  MegaPC Sfax ".into()),
            low_stock_alerts: Some(true),
            ..SettingsUpdate::default()
        };

        let view = run(&config, Some(&path), &update).unwrap();
        assert_eq!(view.general.company, "MegaPC Sfax");
        assert!(view.notifications.low_stock_alerts);
        assert_eq!(view.saved_to, Some(path.display().to_string()));

        let reloaded = ConsoleConfig::load(Some(path.clone())).unwrap();
        assert_eq!(reloaded.general.company, "MegaPC Sfax");
        assert!(reloaded.notifications.low_stock_alerts);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_unchanged_values_do_not_save() {
        let path = scratch_path("same");
        let config = ConsoleConfig::default();
        let update = SettingsUpdate {
            company: Some("MegaPC".into()),
            daily_reports: Some(false),
            ..SettingsUpdate::default()
        };

        let view = run(&config, Some(&path), &update).unwrap();
        assert!(view.saved_to.is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_environment_overrides_are_not_saved() {
        let path = scratch_path("env");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[api]\nbase_url = \"http://file-host:8000/api\"\n").unwrap();

        let mut effective = ConsoleConfig::load_file(Some(path.clone())).unwrap();
        effective.api.base_url = "http://temporary-env:9999/api".to_string();
        effective.catalogue.low_stock_threshold = 3;

        let update = SettingsUpdate {
            company: Some("Acme".into()),
            ..SettingsUpdate::default()
        };
        let view = run(&effective, Some(&path), &update).unwrap();
        assert_eq!(view.general.company, "Acme");
        assert_eq!(view.api_url, "http://temporary-env:9999/api");

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("http://file-host:8000/api"));
        assert!(!written.contains("temporary-env"));

        let stored = ConsoleConfig::load_file(Some(path.clone())).unwrap();
        assert_eq!(stored.general.company, "Acme");
        assert_eq!(stored.catalogue.low_stock_threshold, 10);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_rejects_bad_email_and_blank_company() {
        let mut config = ConsoleConfig::default();

        let err = SettingsUpdate {
            email: Some("admin.megapc.tn".into()),
            ..SettingsUpdate::default()
        }
        .apply_to(&mut config)
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "email has invalid format: admin.megapc.tn");

        let err = SettingsUpdate {
            company: Some("   ".into()),
            ..SettingsUpdate::default()
        }
        .apply_to(&mut config)
        .unwrap_err();
        assert_eq!(err.message, "company is required");
        assert_eq!(config.general.company, "MegaPC");
    }

    #[test]
    fn test_text_view() {
        let text = SettingsView::new(&ConsoleConfig::default()).to_string();
        assert!(text.contains("General Settings"));
        assert!(text.contains("Notification Preferences"));
        assert!(text.contains("Low Stock Alerts  off"));
    }
}
