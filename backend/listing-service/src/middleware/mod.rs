//! HTTP middleware for the listing service.
//!
//! Provides JWT bearer authentication. The middleware is the access gate:
//! it resolves the credential to a user id before a request reaches any
//! handler, and handlers extract that id with [`UserId`]. Everything behind
//! the gate trusts the id unconditionally.
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use uuid::Uuid;

use crate::auth::jwt;

/// Extracted user identifier stored in request extensions after auth.
#[derive(Debug, Clone)]
pub struct UserId(pub Uuid);

/// Actix middleware that validates a Bearer token using the shared JWT
/// helpers.
pub struct JwtAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| ErrorUnauthorized("Missing Authorization header"))?;

            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or_else(|| ErrorUnauthorized("Invalid Authorization scheme"))?;

            let claims = jwt::validate_token(token)
                .map_err(|_| ErrorUnauthorized("Invalid or expired token"))?;

            let user_id = Uuid::parse_str(&claims.claims.sub)
                .map_err(|_| ErrorUnauthorized("Invalid user ID"))?;

            req.extensions_mut().insert(UserId(user_id));

            service.call(req).await
        })
    }
}

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserId>()
                .cloned()
                .ok_or_else(|| ErrorUnauthorized("User ID missing")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    async fn protected() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    /// Rejections surface either as an error response or as a service-level
    /// error depending on where in the chain they occur; both carry the
    /// status.
    async fn status_of<S, R, B>(srv: &S, req: R) -> StatusCode
    where
        S: Service<R, Response = ServiceResponse<B>, Error = Error>,
    {
        match srv.call(req).await {
            Ok(resp) => resp.status(),
            Err(err) => err.as_response_error().status_code(),
        }
    }

    #[actix_web::test]
    async fn test_missing_header_rejected() {
        let srv = test::init_service(
            App::new()
                .wrap(JwtAuthMiddleware)
                .route("/", web::get().to(protected)),
        )
        .await;
        let req = test::TestRequest::get().uri("/").to_request();
        assert_eq!(status_of(&srv, req).await, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_non_bearer_scheme_rejected() {
        let srv = test::init_service(
            App::new()
                .wrap(JwtAuthMiddleware)
                .route("/", web::get().to(protected)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();
        assert_eq!(status_of(&srv, req).await, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_garbage_token_rejected() {
        let srv = test::init_service(
            App::new()
                .wrap(JwtAuthMiddleware)
                .route("/", web::get().to(protected)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("Authorization", "Bearer not.a.token"))
            .to_request();
        assert_eq!(status_of(&srv, req).await, StatusCode::UNAUTHORIZED);
    }

    #[::core::prelude::v1::test]
    fn test_user_id_wraps_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(UserId(id).0, id);
    }
}
