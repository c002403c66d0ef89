#![allow(dead_code)]

use chrono::NaiveDate;
use std::sync::Arc;
use wiremock::MockServer;
use zerobug_notifier::EndpointConfig;
use zerobug_notifier::client::ZeroBugClient;
use zerobug_notifier::clock::FixedClock;
use zerobug_notifier::notifier::Notifier;

pub const REQUEST_PATH: &str = "/api/request";
pub const SITES_PATH: &str = "/api/sites";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
}

pub fn endpoints(base: &str) -> EndpointConfig {
    EndpointConfig {
        request_url: format!("{}{}", base, REQUEST_PATH),
        list_sites_url: format!("{}{}", base, SITES_PATH),
        timeout_secs: 5,
    }
}

pub fn client_for(server: &MockServer) -> ZeroBugClient {
    ZeroBugClient::new(&endpoints(&server.uri())).unwrap()
}

pub fn notifier_for(server: &MockServer) -> Notifier {
    Notifier::with_clock(client_for(server), Arc::new(FixedClock(today())))
}

/// Base URL of a local port nothing listens on.
pub fn refused_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

pub fn refused_client() -> ZeroBugClient {
    ZeroBugClient::new(&endpoints(&refused_base())).unwrap()
}
