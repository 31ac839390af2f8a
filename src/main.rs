use std::process::exit;

use todoist_today::client::Client;
use todoist_today::config::Config;
use todoist_today::run;

#[tokio::main]
async fn main() {
    env_logger::init();

    // Configuration problems (no token, bogus time zone) abort before any network call
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            exit(1);
        },
    };
    log::debug!("Current time zone: {}", config.time_zone());

    let client = Client::new(&config);
    if let Err(err) = run::run(&config, &client).await {
        // A fetch failure means no task could be updated at all
        log::error!("Run aborted: {}", err);
        exit(1);
    }
    // Per-task update failures have already been logged; they do not affect the exit code
}
