// File: ./src/client/middleware.rs
//! Tower middleware stamping default headers (content type, accept, user agent)
//! onto every outgoing request.
use http::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderValue, Request};
use std::task::{Context, Poll};
use tower_layer::Layer;
use tower_service::Service;

pub const JSON: &str = "application/json";

#[derive(Clone, Debug)]
pub struct DefaultHeadersLayer {
    headers: HeaderMap,
}

impl DefaultHeadersLayer {
    /// JSON content type and accept, plus the given user agent.
    pub fn json(user_agent: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        match HeaderValue::from_str(user_agent) {
            Ok(val) => {
                headers.insert(USER_AGENT, val);
            }
            Err(_) => log::warn!("Ignoring invalid user agent {:?}", user_agent),
        }
        Self { headers }
    }
}

impl<S> Layer<S> for DefaultHeadersLayer {
    type Service = DefaultHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DefaultHeadersService {
            inner,
            headers: self.headers.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DefaultHeadersService<S> {
    inner: S,
    headers: HeaderMap,
}

impl<S, ReqBody> Service<Request<ReqBody>> for DefaultHeadersService<S>
where
    S: Service<Request<ReqBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        for (name, value) in &self.headers {
            // Headers set on the request itself win.
            if !req.headers().contains_key(name) {
                req.headers_mut().insert(name.clone(), value.clone());
            }
        }
        self.inner.call(req)
    }
}
