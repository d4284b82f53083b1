use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod api;
mod config;
mod db;
mod error;
mod models;
mod services;
mod store;

use config::Config;
use db::create_mongodb_client;
use store::{PostStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().expect("Failed to load configuration");

    log::info!(
        "Starting server on {}:{}",
        config.server.host,
        config.server.port
    );

    let mongodb_db = create_mongodb_client(&config)
        .await
        .expect("Failed to create MongoDB client");

    log::info!("Database connection established");

    let user_store = UserStore::new(&mongodb_db);
    let post_store = PostStore::new(&mongodb_db);

    let openapi = api::ApiDoc::openapi();

    let server_host = config.server.host.clone();
    let server_port = config.server.port;
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(user_store.clone()))
            .app_data(web::Data::new(post_store.clone()))
            .route(
                "/api/docs",
                web::get().to(|| async {
                    actix_web::HttpResponse::PermanentRedirect()
                        .append_header(("Location", "/api/docs/"))
                        .finish()
                }),
            )
            .service(
                SwaggerUi::new("/api/docs/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .service(
                // Literal segments are registered before `{username}` so the
                // search and stats routes stay reachable.
                web::scope("/users")
                    .route("", web::post().to(api::users::create_user))
                    .route("", web::get().to(api::users::get_users))
                    .route("/find/by_date", web::get().to(api::users::users_by_date))
                    .route(
                        "/search/by_email_domain",
                        web::get().to(api::users::users_by_email_domain),
                    )
                    .route(
                        "/stats/total_posts",
                        web::get().to(api::posts::post_counts_by_user),
                    )
                    .route(
                        "/{username}/mutual_friends/{other}",
                        web::get().to(api::users::mutual_friends),
                    )
                    .route(
                        "/{username}/mutual_friends",
                        web::get().to(api::users::users_with_mutual_friends),
                    )
                    .route("/{username}/email", web::put().to(api::users::update_email))
                    .route(
                        "/{username}/add_friend",
                        web::put().to(api::users::add_friend),
                    )
                    .route("/{username}", web::get().to(api::users::get_user))
                    .route("/{username}", web::delete().to(api::users::delete_user)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::post().to(api::posts::create_post))
                    .route(
                        "/search/by_likes_comments",
                        web::get().to(api::posts::posts_by_likes_comments),
                    )
                    .route(
                        "/search/{keyword}",
                        web::get().to(api::posts::search_posts_by_keyword),
                    )
                    .route("/{username}", web::get().to(api::posts::posts_by_user)),
            )
            .route("/popusers", web::get().to(api::users::popular_users))
            .route(
                "/online_users_count",
                web::get().to(api::users::online_users_count),
            )
            .route("/trending", web::get().to(api::posts::trending_posts))
    })
    .bind(format!("{}:{}", server_host, server_port))?
    .run()
    .await
}
