use crate::errors::Result;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeSetting {
    pub theme: Theme,
}

pub fn load_theme(storage: &dyn KeyValueStore) -> Theme {
    match storage.get_item(THEME_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!("ignoring stored theme: {err}");
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(err) => {
            warn!("failed to read theme: {err}");
            Theme::default()
        }
    }
}

pub fn save_theme(storage: &mut dyn KeyValueStore, theme: Theme) -> Result<()> {
    storage.set_item(THEME_KEY, &serde_json::to_string(&theme)?)
}
