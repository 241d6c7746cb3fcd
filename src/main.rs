mod app;
mod cli;
mod compute;
mod config;
mod data;
mod error;
mod report;

use std::process::ExitCode;

use app::ExhumationApp;
use cli::Parsed;
use config::RunConfig;
use error::RunError;

/// Frame lines are padded with dashes to this width.
const BANNER_WIDTH: usize = 80;

fn banner(text: &str) -> String {
    let head = format!("#--- {text} ");
    let fill = BANNER_WIDTH.saturating_sub(head.len() + 1);
    format!("{head}{}#", "-".repeat(fill))
}

fn main() -> ExitCode {
    env_logger::init();

    println!("{}", banner("Pecube average exhumation rate calculator started"));
    println!();

    let args = match cli::parse_args(std::env::args_os()) {
        Parsed::Run(args) => args,
        Parsed::Info(info) => {
            // Help/version text; nothing useful to do if stdout is gone.
            let _ = info.print();
            return ExitCode::SUCCESS;
        }
        Parsed::Usage(err) => return fail(&err),
    };

    let config = RunConfig::new(&args.model);
    log::info!(
        "inputs: {}, {}; output: {}",
        config.comparison.display(),
        config.ttpaths.display(),
        config.output.display()
    );

    match ExhumationApp::new(config).run() {
        Ok(_) => {
            println!();
            println!("{}", banner("Execution complete. Have a nice day."));
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err),
    }
}

fn fail(err: &RunError) -> ExitCode {
    let code = err.exit_code();
    log::debug!("exiting with code {code}: {err:?}");

    println!("Error: {err:#}");
    println!();
    if err.is_usage() {
        println!("{}", cli::usage());
        println!();
    }
    if let Some(hint) = err.hint() {
        println!("{hint}");
        println!();
    }
    println!(
        "{}",
        banner(&format!("Execution complete with error code {code}."))
    );
    ExitCode::from(code)
}
