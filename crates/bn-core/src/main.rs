use bn_core::cli::{run, Cli};
use bn_core::logging::init_logging;
use bn_core::ExitCode;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log_level, cli.log_json) {
        eprintln!("bn-infer: {e}");
        std::process::exit(ExitCode::ConfigError.as_i32());
    }

    let stdout = std::io::stdout();
    let code = match run(&cli, &mut stdout.lock()) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(code = e.code(), error = %e, "run failed");
            eprintln!("bn-infer: {e}");
            ExitCode::from(&e)
        }
    };
    std::process::exit(code.as_i32());
}
