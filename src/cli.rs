use anyhow::{Result, bail};

pub const USAGE: &str = "usage: issue-monitor [repos | fetch [owner/repo] | config path]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// List the configured repositories.
    Repos,
    /// Fetch once and print the issues, optionally for a single repository.
    Fetch { repo: Option<String> },
    ConfigPath,
    Help,
}

/// `None` means no subcommand: start the interactive browser.
pub fn parse_args(args: &[String]) -> Result<Option<CliCommand>> {
    if args.len() <= 1 {
        return Ok(None);
    }

    let command = args.get(1).map(String::as_str);
    let argument = args.get(2).map(String::as_str);

    match (command, argument) {
        (Some("repos"), None) => Ok(Some(CliCommand::Repos)),
        (Some("fetch"), repo) => {
            if args.len() > 3 {
                bail!("fetch takes at most one repository\n{}", USAGE);
            }
            Ok(Some(CliCommand::Fetch {
                repo: repo.map(str::to_string),
            }))
        }
        (Some("config"), Some("path")) => Ok(Some(CliCommand::ConfigPath)),
        (Some("help" | "-h" | "--help"), _) => Ok(Some(CliCommand::Help)),
        _ => bail!("unknown command: {}\n{}", args[1..].join(" "), USAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::{CliCommand, parse_args};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parse_args_returns_none_for_empty() {
        let parsed = parse_args(&args(&["issue-monitor"])).expect("parse succeeds");
        assert_eq!(parsed, None);
    }

    #[test]
    fn parse_args_returns_repos() {
        let parsed = parse_args(&args(&["issue-monitor", "repos"])).expect("parse succeeds");
        assert_eq!(parsed, Some(CliCommand::Repos));
    }

    #[test]
    fn parse_args_returns_fetch_with_optional_repo() {
        let parsed = parse_args(&args(&["issue-monitor", "fetch"])).expect("parse succeeds");
        assert_eq!(parsed, Some(CliCommand::Fetch { repo: None }));

        let parsed =
            parse_args(&args(&["issue-monitor", "fetch", "Azure/AKS"])).expect("parse succeeds");
        assert_eq!(
            parsed,
            Some(CliCommand::Fetch {
                repo: Some("Azure/AKS".to_string())
            })
        );
    }

    #[test]
    fn parse_args_returns_config_path() {
        let parsed =
            parse_args(&args(&["issue-monitor", "config", "path"])).expect("parse succeeds");
        assert_eq!(parsed, Some(CliCommand::ConfigPath));
    }

    #[test]
    fn parse_args_rejects_unknown_commands() {
        let error = parse_args(&args(&["issue-monitor", "cache", "reset"]))
            .expect_err("unknown command fails");
        assert!(error.to_string().contains("unknown command: cache reset"));
        assert!(parse_args(&args(&["issue-monitor", "fetch", "a/b", "c/d"])).is_err());
    }
}
