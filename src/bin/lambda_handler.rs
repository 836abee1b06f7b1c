//! AWS Lambda handler for the mortgage calculator boundary
//!
//! Accepts the calculator form fields as JSON (every field optional, string
//! or number) and returns the computed monthly and lifetime totals.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use chrono::Local;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use mortgage_system::{parse_loan_request, MortgageEngine, MortgageResult};

fn error_response(status: u16, message: &str) -> Response<Body> {
    // serde_json escapes the message; parser errors can quote the input
    let body = serde_json::json!({ "error": message }).to_string();
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(body))
        .unwrap()
}

fn json_response(body: &MortgageResult) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request = match parse_loan_request(&body_str) {
        Ok(r) => r,
        Err(e) => return Ok(error_response(400, &format!("Invalid JSON: {}", e))),
    };

    let engine = MortgageEngine::new(Local::now().date_naive());
    Ok(json_response(&engine.calculate(&request)))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
