use airport_lookup::api::{FetchedResponse, HttpFetcher, ReqwestFetcher};
use airport_lookup::{AirportLookupClient, Authority, CodeType, LookupError};
use reqwest::Url;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

const PATH: &str = "/anbdata/airports/locations/doc7910";

/// Answers a single request with `status_line` and `body`, reporting the
/// request line it saw.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();

        let request = String::from_utf8_lossy(&request).to_string();
        let request_line = request.lines().next().unwrap_or_default().to_string();
        tx.send(request_line).unwrap();
    });

    (format!("http://{}{}", addr, PATH), rx)
}

fn client_for(base_url: &str) -> AirportLookupClient {
    let http = reqwest::blocking::Client::builder()
        .no_proxy()
        .build()
        .unwrap();
    AirportLookupClient::builder("k1")
        .base_url(base_url)
        .fetcher(Arc::new(ReqwestFetcher::from_client(http)))
        .build()
        .unwrap()
}

#[test]
fn test_icao_lookup_over_http() {
    let (base_url, requests) = serve_once("200 OK", r#"[{"airportCode":"CYGK","name":"Kingston"}]"#);
    let client = client_for(&base_url);

    let record = client.find_by_icao("cygk").unwrap();
    assert_eq!(record, r#"{"airportCode":"CYGK","name":"Kingston"}"#);

    let request_line = requests.recv().unwrap();
    assert_eq!(
        request_line,
        format!("GET {}?api_key=k1&airports=CYGK&format=json HTTP/1.1", PATH)
    );
}

#[test]
fn test_two_element_answer_is_unwrapped_textually() {
    let (base_url, _requests) = serve_once("200 OK", r#"[{"a":1},{"b":2}]"#);
    let client = client_for(&base_url);

    assert_eq!(client.find_by_iata("YGK").unwrap(), r#"{"a":1},{"b":2}"#);
}

#[test]
fn test_not_found_becomes_http_error() {
    let (base_url, _requests) = serve_once("404 Not Found", "");
    let client = client_for(&base_url);

    match client.find_by_icao("ZZZZ") {
        Err(LookupError::Http { code, message }) => {
            assert_eq!(code, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected http error, got {:?}", other),
    }
}

#[test]
fn test_http_error_keeps_server_reason_phrase() {
    let (base_url, _requests) = serve_once("404 Airport Unknown", "");
    let client = client_for(&base_url);

    match client.find_by_icao("ZZZZ") {
        Err(LookupError::Http { code, message }) => {
            assert_eq!(code, 404);
            assert_eq!(message, "Airport Unknown");
        }
        other => panic!("expected http error, got {:?}", other),
    }
}

#[test]
fn test_server_error_becomes_http_error() {
    let (base_url, _requests) = serve_once("503 Service Unavailable", "busy");
    let client = client_for(&base_url);

    let err = client.find_by_lid("3N6", Authority::Faa).unwrap_err();
    assert_eq!(err.http_status(), Some(503));
    assert_eq!(err.to_string(), "HTTP Error: 503 Service Unavailable");
}

#[test]
fn test_refused_connection_is_transport_error() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = client_for(&format!("http://{}{}", addr, PATH));

    let err = client.find_by_icao("CYGK").unwrap_err();
    assert!(matches!(err, LookupError::Transport(_)));
}

struct CountingFetcher {
    calls: AtomicUsize,
}

impl HttpFetcher for CountingFetcher {
    fn get(&self, _url: &Url) -> Result<FetchedResponse, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FetchedResponse::ok("[{}]"))
    }
}

#[test]
fn test_rejected_codes_never_reach_the_network() {
    let fetcher = Arc::new(CountingFetcher {
        calls: AtomicUsize::new(0),
    });
    let client = AirportLookupClient::builder("k1")
        .fetcher(fetcher.clone())
        .build()
        .unwrap();

    assert!(client.find_by_icao("YGK").unwrap_err().is_invalid_argument());
    assert!(client.find_by_icao("CYGKK").unwrap_err().is_invalid_argument());
    assert!(client.find_by_iata("CYGK").unwrap_err().is_invalid_argument());
    assert!(client
        .find_by_lid("KNL3", Authority::Tc)
        .unwrap_err()
        .is_invalid_argument());
    assert!(client
        .find_by_lid("AB-12", Authority::Faa)
        .unwrap_err()
        .is_invalid_argument());
    assert!(matches!(
        client.airport_image("CNL3", CodeType::Lid),
        Err(LookupError::NotImplemented(_))
    ));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);

    assert_eq!(client.find_by_icao("cygk").unwrap(), "{}");
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_clients_are_shareable_across_threads() {
    let fetcher = Arc::new(CountingFetcher {
        calls: AtomicUsize::new(0),
    });
    let client = AirportLookupClient::builder("k1")
        .fetcher(fetcher.clone())
        .build()
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = client.clone();
            thread::spawn(move || client.find_by_icao("CYGK").unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "{}");
    }
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 4);
}
