//! Shared test utilities for integration tests
//!
//! Provides a serialized environment guard, a minimal HTTP stub server for
//! exercising the real transport, and an in-memory fake of the Clawprint API
//! for exercising the client and CLI without a network.

use async_trait::async_trait;
use clawprint::error::ApiError;
use clawprint::transport::{ApiRequest, Transport};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_VARS: &[&str] = &[
    "CLAWPRINT_API_URL",
    "CLAWPRINT_API_KEY",
    "CLAWPRINT_TIMEOUT_SECS",
    "CLAWPRINT_BIN",
    "XDG_CONFIG_HOME",
];

/// Holds the environment lock and restores the captured variables on drop.
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

/// Lock the environment, clear every `CLAWPRINT_*` variable the loader reads,
/// and point the global config directory at `config_home`.
pub fn isolated_env(config_home: &std::path::Path) -> EnvGuard {
    let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved = ENV_VARS
        .iter()
        .map(|key| (*key, std::env::var(key).ok()))
        .collect();
    for key in ENV_VARS {
        std::env::remove_var(key);
    }
    std::env::set_var("XDG_CONFIG_HOME", config_home);
    EnvGuard { saved, _lock: lock }
}

/// One request as seen by [`StubServer`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Answers every connection with the same canned response.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubServer {
    pub fn start(status: u16, body: &str) -> Self {
        Self::with_delay(status, body, Duration::ZERO)
    }

    /// Like [`StubServer::start`], sleeping `delay` before each response.
    pub fn with_delay(status: u16, body: &str, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&requests);
        let body = body.to_string();

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                if let Some(request) = read_request(&mut stream) {
                    captured.lock().unwrap().push(request);
                }
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
                let response = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{}/api", port),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> CapturedRequest {
        self.requests().last().cloned().expect("no request captured")
    }
}

fn read_request(stream: &mut TcpStream) -> Option<CapturedRequest> {
    stream.set_read_timeout(Some(Duration::from_secs(5))).ok()?;
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buffer) {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();
    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buffer[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(CapturedRequest {
        request_line,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|w| w == b"\r\n\r\n")
}

#[derive(Default)]
struct FakeState {
    next_id: u64,
    agents: BTreeMap<String, Value>,
    sponsors: BTreeMap<String, Value>,
    businesses: BTreeMap<String, Value>,
    invoices: BTreeMap<String, Value>,
    requests: Vec<ApiRequest>,
}

impl FakeState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}_{:04}", prefix, self.next_id)
    }
}

/// In-memory Clawprint API: agents, sponsors, businesses, and invoices.
#[derive(Default)]
pub struct FakeServer {
    state: Mutex<FakeState>,
}

fn not_found(what: &str) -> ApiError {
    ApiError::from_status(404, json!({ "error": format!("{} not found", what) }))
}

fn bad_request(message: &str) -> ApiError {
    ApiError::from_status(400, json!({ "error": message }))
}

fn str_of<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

fn merge(target: &mut Value, patch: &Value) {
    if let (Some(target), Some(patch)) = (target.as_object_mut(), patch.as_object()) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
}

impl FakeServer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn business(&self, id: &str) -> Option<Value> {
        self.state.lock().unwrap().businesses.get(id).cloned()
    }

    pub fn invoice(&self, id: &str) -> Option<Value> {
        self.state.lock().unwrap().invoices.get(id).cloned()
    }

    pub fn invoice_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().invoices.keys().cloned().collect()
    }

    /// Seed a business directly, bypassing the API.
    pub fn seed_business(&self, legal_name: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id("biz");
        state.businesses.insert(
            id.clone(),
            json!({
                "business_id": id,
                "legal_name": legal_name,
                "sponsor_email": "sponsor@example.com",
                "type": "llc",
                "formation_state": "delaware",
                "status": "active",
            }),
        );
        id
    }

    fn handle(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        let body = request.body.clone().unwrap_or(Value::Null);
        let segments: Vec<&str> = request
            .endpoint
            .segments()
            .iter()
            .map(String::as_str)
            .collect();

        match (request.method.as_str(), segments.as_slice()) {
            ("GET", ["health"]) => Ok(json!({
                "status": "healthy",
                "version": "1.4.2",
                "services": { "database": "up", "api": "up" },
            })),

            ("POST", ["agents"]) => {
                let email = str_of(&body, "email").ok_or_else(|| bad_request("Email is required"))?;
                if !email.contains('@') {
                    return Err(bad_request("Invalid email format"));
                }
                if state.agents.contains_key(email) {
                    return Err(ApiError::from_status(
                        409,
                        json!({ "error": "Email already registered" }),
                    ));
                }
                let id = state.next_id("usr");
                let user = json!({
                    "id": id,
                    "email": email,
                    "display_name": body.get("display_name").cloned().unwrap_or(Value::Null),
                });
                state.agents.insert(email.to_string(), user.clone());
                Ok(json!({
                    "user": user,
                    "public_key": format!("pk_{}", id),
                    "secret_key": format!("sk_{}_0123456789abcdef", id),
                    "message": "Store your secret key securely. It will not be shown again.",
                }))
            }

            ("POST", ["sponsors"]) => {
                let email = str_of(&body, "email").ok_or_else(|| bad_request("Email is required"))?;
                if let Some(existing) = state.sponsors.get(email) {
                    return Ok(existing.clone());
                }
                let mut sponsor = body.clone();
                merge(&mut sponsor, &json!({ "id": state.next_id("spn"), "verification_status": "pending" }));
                state.sponsors.insert(email.to_string(), sponsor.clone());
                Ok(sponsor)
            }
            ("GET", ["sponsors"]) => {
                let email = request.endpoint.query_value("email").unwrap_or_default();
                Ok(state.sponsors.get(email).cloned().unwrap_or(Value::Null))
            }

            ("POST", ["businesses"]) => {
                let legal_name =
                    str_of(&body, "legal_name").ok_or_else(|| bad_request("legal_name is required"))?;
                let sponsor_email = str_of(&body, "sponsor_email")
                    .ok_or_else(|| bad_request("sponsor_email is required"))?;
                let id = state.next_id("biz");
                let business = json!({
                    "business_id": id,
                    "legal_name": legal_name,
                    "purpose": body.get("purpose").cloned().unwrap_or(Value::Null),
                    "sponsor_email": sponsor_email,
                    "type": body.get("type").cloned().unwrap_or(json!("llc")),
                    "formation_state": body.get("formation_state").cloned().unwrap_or(json!("delaware")),
                    "status": "forming",
                    "created_at": "2026-02-01T12:00:00Z",
                    "sponsor_verification_sent": true,
                    "estimated_completion": "2026-02-15T00:00:00Z",
                    "next_steps": ["Sponsor verifies identity", "LLC filing submitted"],
                });
                state.businesses.insert(id, business.clone());
                Ok(business)
            }
            ("GET", ["businesses"]) => {
                Ok(Value::Array(state.businesses.values().cloned().collect()))
            }
            ("GET", ["businesses", id]) => {
                state.businesses.get(*id).cloned().ok_or_else(|| not_found("Business"))
            }
            ("PATCH", ["businesses", id]) => {
                let business = state.businesses.get_mut(*id).ok_or_else(|| not_found("Business"))?;
                merge(business, &body);
                Ok(business.clone())
            }
            ("DELETE", ["businesses", id]) => {
                let business = state.businesses.get_mut(*id).ok_or_else(|| not_found("Business"))?;
                merge(business, &json!({ "status": "dissolved" }));
                Ok(json!({ "success": true }))
            }
            ("GET", ["businesses", id, "status"]) => {
                let business = state.businesses.get(*id).ok_or_else(|| not_found("Business"))?;
                Ok(json!({
                    "business_id": id,
                    "name": business["legal_name"],
                    "status": business["status"],
                    "created_at": business.get("created_at").cloned().unwrap_or(Value::Null),
                    "llc": { "status": "pending", "state": business["formation_state"] },
                    "ein": { "status": "pending" },
                    "bank_account": { "status": "pending", "provider": "Mercury" },
                    "sponsor": { "email": business["sponsor_email"], "verification_status": "pending" },
                }))
            }
            ("GET", ["businesses", id, "financials"]) => {
                if !state.businesses.contains_key(*id) {
                    return Err(not_found("Business"));
                }
                let period = request.endpoint.query_value("period").unwrap_or("all");
                let paid: f64 = state
                    .invoices
                    .values()
                    .filter(|inv| str_of(inv, "business_id") == Some(*id))
                    .filter(|inv| str_of(inv, "status") == Some("paid"))
                    .filter_map(|inv| inv["total_amount"].as_f64())
                    .sum();
                Ok(json!({
                    "business_id": id,
                    "period": period,
                    "summary": {
                        "revenue": paid,
                        "expenses": { "stripe_fees": 0.0, "clawprint_fees": 0.0, "total": 0.0 },
                        "net_income": paid,
                        "current_balance": paid,
                    },
                    "transactions": [],
                }))
            }

            ("POST", ["invoices"]) => {
                let business_id = str_of(&body, "business_id")
                    .ok_or_else(|| bad_request("business_id is required"))?;
                if !state.businesses.contains_key(business_id) {
                    return Err(not_found("Business"));
                }
                let items = body
                    .get("line_items")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                if items.is_empty() {
                    return Err(bad_request("At least one line item is required"));
                }
                let mut amount = 0.0;
                let mut tax = 0.0;
                for item in &items {
                    let subtotal = item["quantity"].as_f64().unwrap_or(0.0)
                        * item["unit_price"].as_f64().unwrap_or(0.0);
                    amount += subtotal;
                    tax += subtotal * item["tax_rate"].as_f64().unwrap_or(0.0) / 100.0;
                }
                let id = state.next_id("inv");
                let number = body
                    .get("invoice_number")
                    .cloned()
                    .unwrap_or_else(|| json!(format!("INV-{}", id)));
                let invoice = json!({
                    "invoice_id": id,
                    "invoice_number": number,
                    "business_id": business_id,
                    "customer_email": body["customer_email"],
                    "customer_name": body.get("customer_name").cloned().unwrap_or(Value::Null),
                    "line_items": items,
                    "amount": amount,
                    "tax_amount": tax,
                    "total_amount": amount + tax,
                    "currency": "usd",
                    "status": "draft",
                    "issued_date": "2026-02-01T12:00:00Z",
                    "due_date": body.get("due_date").cloned().unwrap_or(Value::Null),
                });
                state.invoices.insert(id, invoice.clone());
                Ok(invoice)
            }
            ("GET", ["invoices"]) => {
                let business_id = request.endpoint.query_value("business_id").unwrap_or_default();
                let invoices: Vec<Value> = state
                    .invoices
                    .values()
                    .filter(|inv| str_of(inv, "business_id") == Some(business_id))
                    .cloned()
                    .collect();
                Ok(json!({ "total": invoices.len(), "invoices": invoices }))
            }
            ("GET", ["invoices", id]) => {
                state.invoices.get(*id).cloned().ok_or_else(|| not_found("Invoice"))
            }
            ("POST", ["invoices", id, "payment-link"]) => {
                let invoice = state.invoices.get_mut(*id).ok_or_else(|| not_found("Invoice"))?;
                let url = format!("https://pay.stripe.test/{}", id);
                merge(
                    invoice,
                    &json!({
                        "stripe_payment_link": url,
                        "stripe_invoice_id": format!("in_{}", id),
                        "status": "sent",
                    }),
                );
                Ok(json!({
                    "payment_link_url": url,
                    "invoice_id": id,
                    "stripe_invoice_id": format!("in_{}", id),
                    "expires_at": "2026-03-01T00:00:00Z",
                }))
            }
            ("GET", ["invoices", id, "payment-link"]) => {
                let invoice = state.invoices.get(*id).ok_or_else(|| not_found("Invoice"))?;
                match str_of(invoice, "stripe_payment_link") {
                    Some(url) => Ok(json!({ "payment_link_url": url, "invoice_id": id })),
                    None => Err(not_found("Payment link")),
                }
            }

            _ => Err(not_found("Route")),
        }
    }
}

#[async_trait]
impl Transport for FakeServer {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.handle(&request)
    }
}

/// A transport that always fails at the connection level.
pub struct UnreachableTransport;

#[async_trait]
impl Transport for UnreachableTransport {
    async fn send(&self, _request: ApiRequest) -> Result<Value, ApiError> {
        Err(ApiError::Transport(
            "Connection error: connection refused".to_string(),
        ))
    }
}
