use env_logger::Env;
use repostat::cli::{report_failure, Cli};
use repostat::error_log::FileErrorLog;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let error_log = FileErrorLog::default();
    if let Err(e) = cli.execute(&error_log) {
        report_failure(&e, &error_log);
        std::process::exit(1);
    }
}
