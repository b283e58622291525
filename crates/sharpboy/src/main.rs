use std::path::PathBuf;

use sharpboy::RunConfig;
use sharpboy_core::Fault;

const USAGE: &str = "Usage: sharpboy <rom-path> [max-cycles]";

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom_path: PathBuf = args.next().map(PathBuf::from).unwrap_or_else(|| {
        eprintln!("{USAGE}");
        std::process::exit(2);
    });
    let cycle_budget = args.next().map(|arg| {
        arg.parse::<u64>().unwrap_or_else(|_| {
            eprintln!("Invalid max-cycles '{arg}'; expected an integer.\n{USAGE}");
            std::process::exit(2);
        })
    });

    let config = RunConfig::builder()
        .rom_path(rom_path)
        .cycle_budget(cycle_budget)
        .build();

    match sharpboy::run(&config) {
        Ok(summary) => println!("{summary}"),
        Err(err) => {
            match err.downcast_ref::<Fault>() {
                Some(fault) => eprintln!("{}: {fault}\n{err:#}", fault.kind()),
                None => eprintln!("error: {err:#}"),
            }
            std::process::exit(1);
        }
    }
}
