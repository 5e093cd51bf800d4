use clap::Parser;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install specific modules:\n    agentpack install bmm design-kit\n\n\
                   Install the default-selected set:\n    agentpack install\n\n\
                   Install from an explicit source tree:\n    agentpack install bmm --source ./modules")]
pub struct InstallArgs {
    /// Module ids to install. With none given, installs the source tree's
    /// default-selected modules. `core` is always included when present.
    pub modules: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_install_multiple_modules() {
        let cli = Cli::try_parse_from(["agentpack", "install", "bmm", "design-kit"]).unwrap();
        match cli.command {
            Commands::Install(args) => {
                assert_eq!(args.modules, vec!["bmm".to_string(), "design-kit".to_string()]);
            }
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_install_no_modules_is_valid() {
        let cli = Cli::try_parse_from(["agentpack", "install"]).unwrap();
        match cli.command {
            Commands::Install(args) => assert!(args.modules.is_empty()),
            _ => panic!("Expected Install command"),
        }
    }
}
