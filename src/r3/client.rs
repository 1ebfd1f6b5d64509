//! K2HR3 HTTP transport

use log::{debug, error, info, warn};
use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;
use std::thread;
use std::time::Duration;

use crate::config::{api, http};
use crate::error::{R3Error, Result};
use crate::r3::models::{Headers, HttpMethod, UrlParams};
use crate::r3::traits::K2hr3Api;
use crate::settings::{HttpConfig, Settings};

/// Outcome of a single failed attempt
enum Failure {
    /// Worth another attempt (timeouts, refused connections)
    Temporary(reqwest::Error),
    Fatal(R3Error),
}

fn classify(err: reqwest::Error) -> Failure {
    if err.is_timeout() || err.is_connect() {
        Failure::Temporary(err)
    } else {
        Failure::Fatal(R3Error::Http(err))
    }
}

/// Blocking HTTP transport for [`K2hr3Api`] requests.
///
/// Keeps the url, query and headers of the last call for inspection, so a
/// transport is used by one thread at a time.
pub struct K2hr3Http {
    client: Client,
    base_url: String,
    config: HttpConfig,
    headers: Headers,
    url: Option<String>,
    urlparams: Option<String>,
}

impl K2hr3Http {
    /// Create a transport with default timeouts and retry policy
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, HttpConfig::default())
    }

    /// Create a transport for `base_url`.
    ///
    /// The url must use http or https and its host must resolve.
    pub fn with_config(base_url: &str, config: HttpConfig) -> Result<Self> {
        let parsed = validate_base_url(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(0)
            .danger_accept_invalid_certs(accepts_invalid_certs(&config, &parsed))
            .build()
            .map_err(|e| R3Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
            headers: default_headers(),
            url: None,
            urlparams: None,
        })
    }

    /// Create a transport from loaded settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::with_config(&settings.k2hr3.api_url, settings.http.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Url of the last request, without the query string
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Encoded query string (or form body for POST) of the last request
    pub fn urlparams(&self) -> Option<&str> {
        self.urlparams.as_deref()
    }

    /// Headers sent with the last request
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    #[must_use]
    pub fn get<A: K2hr3Api + ?Sized>(&mut self, r3api: &mut A) -> bool {
        self.dispatch(HttpMethod::Get, r3api)
    }

    #[must_use]
    pub fn head<A: K2hr3Api + ?Sized>(&mut self, r3api: &mut A) -> bool {
        self.dispatch(HttpMethod::Head, r3api)
    }

    #[must_use]
    pub fn post<A: K2hr3Api + ?Sized>(&mut self, r3api: &mut A) -> bool {
        self.dispatch(HttpMethod::Post, r3api)
    }

    #[must_use]
    pub fn put<A: K2hr3Api + ?Sized>(&mut self, r3api: &mut A) -> bool {
        self.dispatch(HttpMethod::Put, r3api)
    }

    #[must_use]
    pub fn delete<A: K2hr3Api + ?Sized>(&mut self, r3api: &mut A) -> bool {
        self.dispatch(HttpMethod::Delete, r3api)
    }

    fn dispatch<A: K2hr3Api + ?Sized>(&mut self, method: HttpMethod, r3api: &mut A) -> bool {
        self.send(method, r3api).is_ok()
    }

    /// Send `r3api` with `method`, retrying temporary failures.
    ///
    /// On success the response is attached to `r3api`.
    pub fn send<A: K2hr3Api + ?Sized>(&mut self, method: HttpMethod, r3api: &mut A) -> Result<()> {
        let mut retries = i64::from(self.config.max_retries);
        let mut attempts: u32 = 0;
        let mut current = method;
        loop {
            attempts += 1;
            match self.send_once(current, r3api) {
                Ok(()) => return Ok(()),
                Err(Failure::Fatal(e)) => {
                    debug!("{} {} failed: {}", current, r3api.basepath(), e);
                    return Err(e);
                }
                Err(Failure::Temporary(e)) => {
                    retries -= 1;
                    if retries < 0 {
                        error!("reached the max retry count after {} attempts", attempts);
                        return Err(R3Error::RetriesExhausted {
                            attempts,
                            source: e,
                        });
                    }
                    warn!(
                        "{} failed: {}. sleeping for {}s, {} retries left",
                        current, e, self.config.retry_interval_seconds, retries
                    );
                    thread::sleep(Duration::from_secs(self.config.retry_interval_seconds));
                    if self.config.retry_with_get {
                        current = HttpMethod::Get;
                    }
                }
            }
        }
    }

    fn send_once<A: K2hr3Api + ?Sized>(
        &mut self,
        method: HttpMethod,
        r3api: &mut A,
    ) -> std::result::Result<(), Failure> {
        self.headers = default_headers();
        self.url = None;
        self.urlparams = None;

        let path = r3api.api_path(method).ok_or_else(|| {
            Failure::Fatal(R3Error::Unsupported {
                method,
                basepath: r3api.basepath().to_string(),
            })
        })?;
        let url = format!("{}/{}", self.base_url, path);
        self.url = Some(url.clone());

        let request_headers = r3api.headers().cloned().unwrap_or_default();
        let query = r3api
            .urlparams()
            .map(encode_params)
            .filter(|q| !q.is_empty());

        let (target, body) = match method {
            HttpMethod::Post => {
                let body = if request_headers.get("Content-Type") == Some(api::CONTENT_TYPE_JSON) {
                    r3api.body().map(str::to_string)
                } else {
                    query
                };
                self.urlparams = body.clone();
                (url, body)
            }
            _ => {
                self.urlparams = query.clone();
                match query {
                    Some(q) => (format!("{}?{}", url, q), None),
                    None => (url, None),
                }
            }
        };
        self.headers.merge(&request_headers);

        debug!("{} {}", method, target);
        let mut request = self.client.request(method.into(), &target);
        for (name, value) in self.headers.iter() {
            request = request.header(name, value);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().map_err(classify)?;
        let status = response.status();
        let final_url = response.url().to_string();
        let headers = Headers::from(response.headers());

        if !status.is_success() {
            error!(
                "{} {} returned {} headers {:?}",
                method, target, status, headers
            );
            let detail = response.text().unwrap_or_default();
            return Err(Failure::Fatal(R3Error::Api {
                status: status.as_u16(),
                message: if detail.is_empty() {
                    status.canonical_reason().unwrap_or("").to_string()
                } else {
                    detail
                },
            }));
        }

        let text = response.text().map_err(classify)?;
        let body = if text.is_empty() { None } else { Some(text) };
        r3api
            .set_response(status.as_u16(), &final_url, headers, body)
            .map_err(Failure::Fatal)
    }
}

/// Self-signed certificates are only accepted on https endpoints
fn accepts_invalid_certs(config: &HttpConfig, url: &Url) -> bool {
    config.allow_self_signed_cert && url.scheme() == "https"
}

fn default_headers() -> Headers {
    [("User-Agent", http::USER_AGENT)].into_iter().collect()
}

/// Check scheme and host of a base url and resolve the host
fn validate_base_url(value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| R3Error::Config(format!("'{}' is not a valid url: {}", value, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(R3Error::Config(format!(
                "scheme should be http or https, not {}",
                other
            )))
        }
    }

    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => {
            return Err(R3Error::Config(format!(
                "url contains no domain, {}",
                value
            )))
        }
    };

    let addrs = url
        .socket_addrs(|| None)
        .map_err(|e| R3Error::Config(format!("unresolved domain, {}: {}", host, e)))?;
    match addrs.first() {
        Some(addr) => info!("{} resolved to {}", host, addr.ip()),
        None => {
            return Err(R3Error::Config(format!(
                "unresolved domain, {}",
                host
            )))
        }
    }
    debug!(
        "url={} host={} port={:?} path={}",
        value,
        host,
        url.port_or_known_default(),
        url.path()
    );
    Ok(url)
}

/// Percent-encode url params as `k1=v1&k2=v2`.
///
/// Strings are sent verbatim, other scalars as text, arrays and objects as
/// compact JSON; nulls are left out.
pub(crate) fn encode_params(params: &UrlParams) -> String {
    params
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&text)
            ))
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r3::testing::{fast_config, MockApi};
    use crate::r3::traits::{url_params, ApiBase};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    /// Minimal request: GET sends params, POST sends a JSON body
    struct Probe {
        base: ApiBase,
    }

    impl Probe {
        fn new() -> Self {
            Self {
                base: ApiBase::new("probe").with_headers(
                    [("Content-Type", "application/json"), ("x-auth-token", "U=t")]
                        .into_iter()
                        .collect(),
                ),
            }
        }
    }

    impl K2hr3Api for Probe {
        fn base(&self) -> &ApiBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ApiBase {
            &mut self.base
        }

        fn api_path(&mut self, method: HttpMethod) -> Option<String> {
            match method {
                HttpMethod::Get | HttpMethod::Delete => {
                    self.base
                        .set_urlparams(url_params([("expand", json!(true)), ("skip", Value::Null)]));
                    Some(self.base.path())
                }
                HttpMethod::Post => {
                    self.base.set_json_body(&json!({"probe": {"name": "p"}}));
                    Some(self.base.path())
                }
                _ => None,
            }
        }
    }

    /// Non-JSON request: POST carries the url params as a form body
    struct FormRequest {
        base: ApiBase,
    }

    impl K2hr3Api for FormRequest {
        fn base(&self) -> &ApiBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ApiBase {
            &mut self.base
        }

        fn api_path(&mut self, method: HttpMethod) -> Option<String> {
            match method {
                HttpMethod::Post => {
                    self.base.set_body("ignored".to_string());
                    self.base
                        .set_urlparams(url_params([("a", json!("x y")), ("n", json!(3))]));
                    Some(self.base.path())
                }
                _ => None,
            }
        }
    }

    #[test]
    fn test_encode_params_value_types() {
        let params = url_params([
            ("name", json!("a b&c")),
            ("expand", json!(true)),
            ("port", json!(8080)),
            ("keys", json!({"k": "v"})),
            ("skip", Value::Null),
            ("list", json!(["x", 1])),
        ]);
        assert_eq!(
            encode_params(&params),
            "name=a%20b%26c&expand=true&port=8080&keys=%7B%22k%22%3A%22v%22%7D&list=%5B%22x%22%2C1%5D"
        );
    }

    #[test]
    fn test_encode_params_empty() {
        assert_eq!(encode_params(&UrlParams::new()), "");
    }

    #[test]
    fn test_rejects_bad_scheme() {
        let err = K2hr3Http::new("ftp://localhost:18080").err().unwrap();
        assert!(matches!(err, R3Error::Config(_)));
        assert!(err.to_string().contains("scheme"));
    }

    #[test]
    fn test_rejects_missing_scheme() {
        assert!(matches!(
            K2hr3Http::new("127.0.0.1:18080").err(),
            Some(R3Error::Config(_))
        ));
    }

    #[test]
    fn test_rejects_unresolvable_host() {
        let err = K2hr3Http::new("http://no-such-host.invalid:18080")
            .err()
            .unwrap();
        assert!(err.to_string().contains("unresolved domain"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let http = K2hr3Http::new("http://127.0.0.1:18080/").unwrap();
        assert_eq!(http.base_url(), "http://127.0.0.1:18080");
        assert!(http.url().is_none());
        assert_eq!(http.headers().get("User-Agent"), Some("K2hr3Http"));
    }

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        settings.http.max_retries = 7;
        let http = K2hr3Http::from_settings(&settings).unwrap();
        assert_eq!(http.base_url(), "http://127.0.0.1:18080");
        assert_eq!(http.config().max_retries, 7);
    }

    #[test]
    fn test_get_sends_query_and_headers() {
        let mock = MockApi::start();
        mock.mount(
            Mock::given(method("GET"))
                .and(path("/v1/probe"))
                .and(query_param("expand", "true"))
                .and(header("x-auth-token", "U=t"))
                .and(header("user-agent", "K2hr3Http"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true}))),
        );

        let mut http = mock.http();
        let mut probe = Probe::new();
        assert!(http.get(&mut probe));

        assert_eq!(http.url(), Some(format!("{}/v1/probe", mock.uri()).as_str()));
        assert_eq!(http.urlparams(), Some("expand=true"));
        let resp = probe.response().unwrap();
        assert_eq!(resp.code(), 200);
        assert_eq!(resp.json().unwrap()["result"], true);
        assert!(resp.url().starts_with(&mock.uri()));
    }

    #[test]
    fn test_post_sends_json_body() {
        let mock = MockApi::start();
        mock.mount(
            Mock::given(method("POST"))
                .and(path("/v1/probe"))
                .respond_with(ResponseTemplate::new(201).set_body_json(json!({"result": true}))),
        );

        let mut http = mock.http();
        let mut probe = Probe::new();
        assert!(http.post(&mut probe));

        let requests = mock.received();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), None);
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body, json!({"probe": {"name": "p"}}));
        assert_eq!(probe.response().unwrap().code(), 201);
    }

    #[test]
    fn test_unsupported_method_sends_nothing() {
        let mock = MockApi::start();
        let mut http = mock.http();
        let mut probe = Probe::new();

        assert!(!http.head(&mut probe));
        let err = http.send(HttpMethod::Put, &mut probe).unwrap_err();
        assert!(matches!(err, R3Error::Unsupported { method: HttpMethod::Put, .. }));
        assert!(mock.received().is_empty());
        assert!(probe.response().is_none());
    }

    #[test]
    fn test_non_2xx_is_fatal_without_retry() {
        let mock = MockApi::start();
        mock.mount(
            Mock::given(method("DELETE"))
                .respond_with(ResponseTemplate::new(403).set_body_string("forbidden")),
        );

        let mut http = mock.http_with(HttpConfig {
            max_retries: 3,
            ..fast_config()
        });
        let mut probe = Probe::new();
        let err = http.send(HttpMethod::Delete, &mut probe).unwrap_err();

        match err {
            R3Error::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "forbidden");
            }
            other => panic!("Expected R3Error::Api, got {:?}", other),
        }
        assert_eq!(mock.received().len(), 1);
        assert!(probe.response().is_none());
    }

    #[test]
    fn test_retries_exhausted_after_max_retries() {
        // bind then drop a listener to get a port nobody serves
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let mut http = K2hr3Http::with_config(
            &format!("http://127.0.0.1:{}", port),
            HttpConfig {
                max_retries: 2,
                ..fast_config()
            },
        )
        .unwrap();

        let mut probe = Probe::new();
        match http.send(HttpMethod::Get, &mut probe).unwrap_err() {
            R3Error::RetriesExhausted { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("Expected RetriesExhausted, got {:?}", other),
        }
        assert!(probe.response().is_none());
    }

    #[test]
    fn test_retry_sleeps_between_attempts() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let mut http = K2hr3Http::with_config(
            &format!("http://127.0.0.1:{}", port),
            HttpConfig {
                max_retries: 2,
                retry_interval_seconds: 1,
                ..fast_config()
            },
        )
        .unwrap();

        let mut probe = Probe::new();
        let started = std::time::Instant::now();
        let err = http.send(HttpMethod::Get, &mut probe).unwrap_err();
        assert!(matches!(err, R3Error::RetriesExhausted { attempts: 3, .. }));
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[test]
    fn test_post_without_json_content_type_sends_form_body() {
        let mock = MockApi::start();
        mock.mount(
            Mock::given(method("POST"))
                .and(path("/v1/form"))
                .respond_with(ResponseTemplate::new(201)),
        );

        let mut http = mock.http();
        let mut request = FormRequest {
            base: ApiBase::new("form").with_headers(
                [("Content-Type", "application/octet-stream")]
                    .into_iter()
                    .collect(),
            ),
        };
        assert!(http.post(&mut request));

        let received = mock.only_request();
        assert_eq!(received.url.query(), None);
        assert_eq!(String::from_utf8(received.body).unwrap(), "a=x%20y&n=3");
        assert_eq!(http.urlparams(), Some("a=x%20y&n=3"));
    }

    #[test]
    fn test_accepts_invalid_certs_only_on_https() {
        let https = Url::parse("https://127.0.0.1:18443").unwrap();
        let plain = Url::parse("http://127.0.0.1:18080").unwrap();
        let allow = HttpConfig {
            allow_self_signed_cert: true,
            ..fast_config()
        };
        let deny = HttpConfig {
            allow_self_signed_cert: false,
            ..fast_config()
        };

        assert!(accepts_invalid_certs(&allow, &https));
        assert!(!accepts_invalid_certs(&allow, &plain));
        assert!(!accepts_invalid_certs(&deny, &https));
        assert!(!accepts_invalid_certs(&deny, &plain));
    }

    #[test]
    fn test_timeout_is_retried_with_same_method() {
        let mock = MockApi::start();
        mock.mount(
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
                .up_to_n_times(1),
        );
        mock.mount(
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(201).set_body_json(json!({"result": true}))),
        );

        let mut http = mock.http_with(HttpConfig {
            timeout_seconds: 1,
            max_retries: 1,
            ..fast_config()
        });
        let mut probe = Probe::new();
        assert!(http.post(&mut probe));

        let requests = mock.received();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.method.as_str() == "POST"));
        assert_eq!(probe.response().unwrap().code(), 201);
    }

    #[test]
    fn test_retry_with_get_reissues_as_get() {
        let mock = MockApi::start();
        mock.mount(
            Mock::given(method("DELETE"))
                .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(3))),
        );
        mock.mount(Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)));

        let mut http = mock.http_with(HttpConfig {
            timeout_seconds: 1,
            max_retries: 1,
            retry_with_get: true,
            ..fast_config()
        });
        let mut probe = Probe::new();
        assert!(http.delete(&mut probe));

        let methods: Vec<String> = mock
            .received()
            .iter()
            .map(|r| r.method.to_string())
            .collect();
        assert_eq!(methods, vec!["DELETE", "GET"]);
    }

    #[test]
    fn test_empty_body_is_none() {
        let mock = MockApi::start();
        mock.mount(Mock::given(method("GET")).respond_with(ResponseTemplate::new(204)));

        let mut http = mock.http();
        let mut probe = Probe::new();
        assert!(http.get(&mut probe));
        assert!(probe.response().unwrap().body().is_none());
    }
}
