//! CORS policy for the blog front-ends.

use actix_cors::Cors;
use actix_web::http::{Method, header};

/// Allow the configured origins with the methods and headers the front-end uses.
pub fn cors_policy(origins: &[String]) -> Cors {
    let mut cors = Cors::default();
    for origin in origins {
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else {
            cors = cors.allowed_origin(origin);
        }
    }

    cors.allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(3600)
}
