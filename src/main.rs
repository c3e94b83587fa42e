use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Scope};

mod models;
mod routes;
mod session;
mod store;
mod views;

async fn get_root() -> HttpResponse {
    routes::redirect("/lists")
}

#[actix_web::main]
async fn main() {
    let bind_address = "0.0.0.0";
    let port = 1337;

    let app_data = web::Data::new(store::SessionStore::new());

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    println!("Listening on {}:{}", bind_address, port);
    HttpServer::new(move || {
        let lists_scope =
            Scope::new("/lists").configure(routes::list::configure_collection_routes);
        let list_scope = Scope::new("/list")
            .configure(routes::list::configure_item_routes)
            .configure(routes::todo::configure_routes);

        App::new()
            .app_data(app_data.clone())
            .wrap(middleware::NormalizePath::new(
                middleware::TrailingSlash::Trim,
            ))
            .wrap(middleware::Logger::default())
            .wrap(Cors::permissive())
            .route("/", web::get().to(get_root))
            .service(lists_scope)
            .service(list_scope)
    })
    .bind((bind_address, port))
    .unwrap()
    .run()
    .await
    .unwrap()
}
