//! fetch 传输层
//!
//! 使用 `gloo-net` 发送请求，每个请求与 `gloo-timers` 超时竞速。

use async_trait::async_trait;
use catalogo::request::HttpMethod;
use catalogo::{HttpClient, HttpError, HttpRequest, HttpResponse};
use futures::future::{Either, select};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FetchClient {
    timeout: Duration,
}

impl FetchClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
        match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Delete => Request::delete(url),
        }
    }

    async fn fetch(req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = Self::builder(req.method, &req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| HttpError::RequestBuild(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::ResponseRead(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let millis = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
        let fetch = Box::pin(Self::fetch(req));

        let timeout = Box::pin(TimeoutFuture::new(millis));

        match select(fetch, timeout).await {
            Either::Left((result, _)) => result,
            // 超时：丢弃 fetch future，请求结果被忽略
            Either::Right(_) => Err(HttpError::Timeout(self.timeout)),
        }
    }
}
