use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::page::NotificationTiming;
use crate::routes::contact::{contact, ContactCoordinator};
use crate::routes::health::health_check;

pub fn run(
    listener: TcpListener,
    coordinator: ContactCoordinator,
    timing: NotificationTiming,
) -> Result<Server, std::io::Error> {
    let coordinator = web::Data::new(coordinator);
    let timing = web::Data::new(timing);
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(health_check))
            .route("/contact", web::post().to(contact))
            .app_data(coordinator.clone())
            .app_data(timing.clone())
    })
    .listen(listener)?
    .run())
}
