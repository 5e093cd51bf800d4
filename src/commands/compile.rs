//! Compile command implementation

use console::style;

use crate::cli::CompileArgs;
use crate::commands::helpers::RunContext;
use crate::compiler;
use crate::error::Result;
use crate::template::Answers;

pub fn run(ctx: &RunContext, args: &CompileArgs) -> Result<()> {
    // answers file first, explicit --answer pairs override
    let mut answers = match &args.answers_file {
        Some(path) => Answers::from_file(path)?,
        None => Answers::new(),
    };
    let overrides = Answers::from_pairs(&args.answer)?;
    for (key, value) in overrides.iter() {
        answers.insert(key.clone(), value.clone());
    }

    let (compiled, dest) =
        compiler::compile_file(&args.definition, args.output.as_deref(), &answers)?;

    println!(
        "{} compiled '{}' -> {}",
        style("Done:").green().bold(),
        compiled
            .metadata
            .name
            .as_deref()
            .unwrap_or(&compiler::definition_slug(&args.definition)),
        style(dest.display()).cyan()
    );

    if ctx.verbose && !answers.is_empty() {
        let keys: Vec<&str> = answers.iter().map(|(k, _)| k.as_str()).collect();
        println!("{}", style(format!("  answers applied: {}", keys.join(", "))).dim());
    }

    Ok(())
}
