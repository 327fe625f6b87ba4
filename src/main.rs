use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use studyplan_pdf::model::StudyPlan;
use studyplan_pdf::{Error, export_file_name, export_plan};

/// Export a research study plan to PDF.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to a study plan JSON file.
    input: PathBuf,

    /// Output PDF path. Defaults to the plan title next to the input.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn run(args: &Args) -> Result<PathBuf, Error> {
    let json = std::fs::read_to_string(&args.input)?;
    let plan: StudyPlan =
        serde_json::from_str(&json).map_err(|e| Error::InvalidPlan(e.to_string()))?;

    let output = match &args.output {
        Some(path) => path.clone(),
        None => args.input.with_file_name(export_file_name(&plan.title)),
    };
    export_plan(&plan, &output)?;
    Ok(output)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(output) => {
            println!("{}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
