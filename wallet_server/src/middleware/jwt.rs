//! Access token middleware for the wallet server.
//! This middleware can be placed on any route or service.
//!
//! It reads the `Authorization: Bearer <token>` header, validates the token and stores the resulting [`JwtClaims`] in
//! the request extensions. Requests without a valid token never reach the wrapped service; they receive a 401
//! response instead.
use std::{future::Future, pin::Pin, rc::Rc};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error,
    HttpMessage,
};
use futures::future::{ok, Ready};
use log::*;

use crate::{
    auth::{JwtClaims, TokenIssuer},
    errors::{AuthError, ServerError},
};

pub struct JwtMiddlewareFactory {
    issuer: Rc<TokenIssuer>,
}

impl JwtMiddlewareFactory {
    pub fn new(issuer: TokenIssuer) -> Self {
        JwtMiddlewareFactory { issuer: Rc::new(issuer) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(JwtMiddlewareService { issuer: Rc::clone(&self.issuer), service: Rc::new(service) })
    }
}

pub struct JwtMiddlewareService<S> {
    issuer: Rc<TokenIssuer>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let claims = claims_from_request(&req, &self.issuer);
        Box::pin(async move {
            let claims = claims.map_err(ServerError::AuthenticationError)?;
            trace!("🔐️ Access token accepted for user #{}", claims.sub);
            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

fn claims_from_request(req: &ServiceRequest, issuer: &TokenIssuer) -> Result<JwtClaims, AuthError> {
    let header = req.headers().get(AUTHORIZATION).ok_or_else(|| {
        debug!("🔐️ No Authorization header in request to {}", req.path());
        AuthError::MissingToken
    })?;
    let token = header
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AuthError::PoorlyFormattedToken)?;
    issuer.validate(token)
}
