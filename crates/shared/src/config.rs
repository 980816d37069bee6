use std::{fmt::Display, str::FromStr};

use const_format::concatcp;

use crate::api::{MANIFEST_PATH, STATIC_BASE_PATH};

pub const DEFAULT_TITLE: &str = "ColegiosPro";
pub const DEFAULT_BODY: &str = "Tienes un nuevo mensaje";
pub const DEFAULT_URL: &str = "/";

/// Path fragment carried by live websocket connections (`/ws/chat`, `/ws/admin`)
pub const LIVE_PATH_MARKER: &str = "/ws/";

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown variant \"{0}\", expected one of: app, landing")]
    UnknownVariant(String),
}

/// Static configuration for one deployment of the agent
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Name of the only cache bucket this deployment owns. Any other bucket is
    /// deleted on activation
    pub cache_name: &'static str,
    /// Warmed into the cache on install
    pub assets: &'static [&'static str],
    pub icon: &'static str,
    pub badge: &'static str,
    pub default_title: &'static str,
    pub default_body: &'static str,
    pub default_url: &'static str,
    /// Requests whose url contains this are never intercepted
    pub live_path_marker: Option<&'static str>,
}

const APP_ICON: &str = concatcp!(STATIC_BASE_PATH, "icons/icon-192.png");
const LANDING_ICON: &str = concatcp!(STATIC_BASE_PATH, "img/logo-192.png");

pub static APP: AgentConfig = AgentConfig {
    cache_name: "colegiospro-v1",
    assets: &[
        "/",
        MANIFEST_PATH,
        concatcp!(STATIC_BASE_PATH, "css/chat.css"),
        concatcp!(STATIC_BASE_PATH, "js/chat.js"),
        APP_ICON,
        concatcp!(STATIC_BASE_PATH, "icons/icon-512.png"),
        concatcp!(STATIC_BASE_PATH, "icons/chat-72.png"),
    ],
    icon: APP_ICON,
    badge: concatcp!(STATIC_BASE_PATH, "icons/badge-72.png"),
    default_title: DEFAULT_TITLE,
    default_body: DEFAULT_BODY,
    default_url: DEFAULT_URL,
    live_path_marker: Some(LIVE_PATH_MARKER),
};

pub static LANDING: AgentConfig = AgentConfig {
    cache_name: "colegiospro-landing-v1",
    assets: &[
        "/",
        concatcp!(STATIC_BASE_PATH, "css/styles.css"),
        LANDING_ICON,
        "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700;800&display=swap",
    ],
    icon: LANDING_ICON,
    badge: concatcp!(STATIC_BASE_PATH, "img/badge-72.png"),
    default_title: DEFAULT_TITLE,
    default_body: DEFAULT_BODY,
    default_url: DEFAULT_URL,
    live_path_marker: None,
};

/// Which deployment the agent is running as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    App,
    Landing,
}

impl Variant {
    pub fn config(&self) -> &'static AgentConfig {
        match self {
            Variant::App => &APP,
            Variant::Landing => &LANDING,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Variant::App => "app",
            Variant::Landing => "landing",
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "app" => Ok(Variant::App),
            "landing" => Ok(Variant::Landing),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.name().fmt(f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_variant_parse() {
        assert_eq!("app".parse::<Variant>().unwrap(), Variant::App);
        assert_eq!("Landing".parse::<Variant>().unwrap(), Variant::Landing);
        assert!(matches!(
            "chat".parse::<Variant>(),
            Err(ConfigError::UnknownVariant(v)) if v == "chat"
        ));
    }

    #[test]
    fn test_variant_display_round_trips() {
        for v in [Variant::App, Variant::Landing] {
            assert_eq!(v.to_string().parse::<Variant>().unwrap(), v);
        }
    }

    #[test]
    fn test_each_variant_owns_its_bucket() {
        assert_eq!(Variant::App.config().cache_name, "colegiospro-v1");
        assert_eq!(Variant::Landing.config().cache_name, "colegiospro-landing-v1");
    }

    #[test]
    fn test_only_app_skips_live_connections() {
        assert_eq!(APP.live_path_marker, Some("/ws/"));
        assert_eq!(LANDING.live_path_marker, None);
    }

    #[test]
    fn test_landing_warms_font_stylesheet() {
        assert!(LANDING
            .assets
            .iter()
            .any(|a| a.starts_with("https://fonts.googleapis.com/")));
        assert!(APP.assets.contains(&"/manifest.json"));
    }
}
