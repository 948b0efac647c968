//! HTML forms can only POST. This rewrites `POST ...?_method=PUT` (or PATCH,
//! DELETE) to the named method before the router sees the request.

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
    web,
};
use serde::Deserialize;
use std::future::{Ready, ready};

#[derive(Deserialize)]
struct OverrideParam {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// The method a POST should be treated as, if the query string asks for one.
pub fn override_method(query: &str) -> Option<Method> {
    let param = web::Query::<OverrideParam>::from_query(query).ok()?;
    match param.into_inner().method?.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = MethodOverrideService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideService { service }))
    }
}

pub struct MethodOverrideService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if *req.method() == Method::POST {
            if let Some(method) = override_method(req.query_string()) {
                tracing::debug!(%method, path = req.path(), "Overriding request method");
                req.head_mut().method = method;
            }
        }

        self.service.call(req)
    }
}
