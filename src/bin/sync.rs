use chained_feeds::config::Config;
use chained_feeds::sync;
use dotenv::dotenv;
use std::process;

fn main() {
    dotenv().ok();
    env_logger::init();

    let result = Config::from_env()
        .map_err(sync::StartupError::from)
        .and_then(|config| sync::start(&config));

    if let Err(error) = result {
        log::error!("Couldn't start syncing feeds: {error}");
        process::exit(1);
    }
}
