use clap::Parser;
use std::path::PathBuf;

/// Arguments for the compile command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Compile next to the definition:\n    agentpack compile agents/sage.agent.yaml\n\n\
                   Compile with answers:\n    agentpack compile sage.agent.yaml --answer tone=formal\n\n\
                   Compile with an answers file:\n    agentpack compile sage.agent.yaml --answers answers.yaml")]
pub struct CompileArgs {
    /// Agent definition file (`*.agent.yaml`)
    pub definition: PathBuf,

    /// Output path (defaults to the definition's directory, `.md` extension)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Answer value as key=value; repeatable
    #[arg(long = "answer", short = 'a', value_name = "KEY=VALUE")]
    pub answer: Vec<String>,

    /// Answers file (JSON or YAML flat map); --answer values win
    #[arg(long = "answers", value_name = "FILE")]
    pub answers_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::super::{Cli, Commands};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_compile_parsing() {
        let cli = Cli::try_parse_from([
            "agentpack",
            "compile",
            "sage.agent.yaml",
            "-o",
            "out/sage.md",
            "-a",
            "tone=formal",
            "-a",
            "depth=3",
        ])
        .unwrap();

        match cli.command {
            Commands::Compile(args) => {
                assert_eq!(args.definition, PathBuf::from("sage.agent.yaml"));
                assert_eq!(args.output, Some(PathBuf::from("out/sage.md")));
                assert_eq!(args.answer, vec!["tone=formal".to_string(), "depth=3".to_string()]);
            }
            _ => panic!("Expected Compile command"),
        }
    }
}
