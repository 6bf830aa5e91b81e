use clap::Parser;
use colored::Colorize;
use lazytok_core::cli::{self, Cli};
use lazytok_core::exit::LazytokExit;
use lazytok_core::logging::{self, LogConfig};

fn main() -> LazytokExit {
    let cli = Cli::parse();

    let mut log = LogConfig::default();
    log.json_format |= cli.global.json_logs;
    if cli.global.verbose {
        log.filter = Some("lazytok_core=debug".to_string());
    }
    logging::init(&log);

    let result = if let Some(cmd) = cli.command {
        cli::dispatch::execute(cmd, &cli.global)
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(LazytokExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            LazytokExit::Error
        }
    }
}
