//! Inserts the two-team demo roster into the configured database.

use std::env;

use dotenvy::dotenv;

use roster_search::db::establish_connection_pool;
use roster_search::models::config::ServerConfig;
use roster_search::repository::{DieselRepository, MemberReader};
use roster_search::services::seed::seed_demo_roster;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let server_config = match ServerConfig::load(&app_env) {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let options = server_config.connection_options();
    let pool = match establish_connection_pool(&server_config.database_url, options) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);

    match seed_demo_roster(&repo) {
        Ok(members) => log::info!("Inserted {} members", members.len()),
        Err(e) => {
            log::error!("Failed to seed members: {e}");
            std::process::exit(1);
        }
    }

    match repo.count_members() {
        Ok(total) => log::info!("Database now holds {total} members"),
        Err(e) => log::error!("Failed to count members: {e}"),
    }
}
