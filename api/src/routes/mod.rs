pub mod rag;

use actix_web::{HttpResponse, Responder, dev::HttpServiceFactory, get, web};

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api").service(health_check).service(rag::search)
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}
