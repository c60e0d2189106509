use std::error::Error;
use std::process::ExitCode;

use log::{error,info};
use lsm_fit::functions::registry;
use lsm_fit::request::{FitRequest,run};

const USAGE:&str = "usage: lsm_fit <request.json> | --list";

fn execute(path:&str) -> lsm_fit::Result<String> {
    let request = FitRequest::load(path)?;
    info!("loaded request from {path}");
    let report = run(&request)?;
    serde_json::to_string_pretty(&report)
        .map_err(|e| lsm_fit::FitError::Format { reason:e.to_string() })
}

fn main() -> ExitCode {
    env_logger::init();
    let args:Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [flag] if flag == "--list" => {
            for function in registry::builtins() {
                println!("{:>2}  {:<16}{}",function.id,function.name,function.label);
            }
            ExitCode::SUCCESS
        }
        [path] => match execute(path) {
            Ok(rendered) => {
                println!("{rendered}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("{e}");
                eprintln!("error: {e}");
                let mut source = e.source();
                while let Some(cause) = source {
                    eprintln!("  caused by: {cause}");
                    source = cause.source();
                }
                ExitCode::FAILURE
            }
        },
        _ => {
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
    }
}
