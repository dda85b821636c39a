//! Config subcommand handlers.

use std::fmt::Write;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        if let Some(ref url) = p.base_url {
            let _ = writeln!(out, "base_url = \"{url}\"");
        }
        if let Some(ref version) = p.api_version {
            let _ = writeln!(out, "api_version = \"{version}\"");
        }
        if p.api_key.is_some() {
            let _ = writeln!(out, "api_key = \"****\"");
        }
        if let Some(ref env) = p.api_key_env {
            let _ = writeln!(out, "api_key_env = \"{env}\"");
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path(global);

    match args.command {
        ConfigCommand::Path => output::print_output(&path.display().to_string(), global.quiet),
        ConfigCommand::Show => {
            let cfg = config::load_config(&path)?;
            output::print_output(format_config_redacted(&cfg).trim_end(), global.quiet)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::Profile;

    #[test]
    fn redacted_output_masks_api_key() {
        let cfg = Config {
            default_profile: Some("home".into()),
            profiles: HashMap::from([(
                "home".to_owned(),
                Profile {
                    api_key: Some("very-secret".into()),
                    api_key_env: Some("HOME_KEY".into()),
                    ..Profile::default()
                },
            )]),
        };

        let out = format_config_redacted(&cfg);

        assert!(!out.contains("very-secret"), "{out}");
        assert!(out.contains("api_key = \"****\""), "{out}");
        assert!(out.contains("api_key_env = \"HOME_KEY\""), "{out}");
        assert!(out.contains("[profiles.home]"), "{out}");
    }
}
