//! Member search engine: optional filters composed into a single query plan,
//! executed against SQLite with plain, counted and count-eliding pagination.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use actix_web::{App, HttpServer, middleware, web};

    use crate::db::establish_connection_pool;
    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;
    use crate::routes::api::{api_v1_members, api_v1_members_page, api_v1_members_page_complex};

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        // Establish Diesel connection pool for the SQLite database.
        let pool = establish_connection_pool(
            &server_config.database_url,
            server_config.connection_options(),
        )
        .map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

        let repo = DieselRepository::new(pool);

        let bind_address = (server_config.address.clone(), server_config.port);

        log::info!(
            "Starting member search API on {}:{}",
            bind_address.0,
            bind_address.1
        );

        HttpServer::new(move || {
            App::new()
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(
                    web::scope("/api")
                        .service(api_v1_members)
                        .service(api_v1_members_page)
                        .service(api_v1_members_page_complex),
                )
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
