use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::i18n::Locale;

/// Terminal front-end for trip stop reports and route questionnaires.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Mini-app link to open, e.g. "/stop-reason?trip_id=1&stop_state_id=2"
    pub link: String,

    /// Config file (default: XDG config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the UI locale (en, ru, uz)
    #[arg(long)]
    pub locale: Option<Locale>,

    /// Run as a standalone terminal app: never auto-close after submitting
    #[arg(long)]
    pub standalone: bool,
}

impl Cli {
    /// Applies command-line overrides on top of loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.base_url {
            config.api_base_url = url.clone();
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if self.standalone {
            config.embedded = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_link_and_overrides() {
        let cli = Cli::try_parse_from([
            "tripform",
            "--base-url",
            "https://trips.example.org",
            "--locale",
            "ru",
            "--standalone",
            "/route",
        ])
        .unwrap();
        assert_eq!(cli.link, "/route");

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.api_base_url, "https://trips.example.org");
        assert_eq!(config.locale, Locale::Ru);
        assert!(!config.embedded);
    }

    #[test]
    fn no_overrides_keep_config() {
        let cli = Cli::try_parse_from(["tripform", "/language"]).unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn bad_locale_is_rejected() {
        assert!(Cli::try_parse_from(["tripform", "--locale", "xx", "/route"]).is_err());
    }

    #[test]
    fn link_is_required() {
        assert!(Cli::try_parse_from(["tripform"]).is_err());
    }
}
