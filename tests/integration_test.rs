//! Tests de integración para el servidor
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en un puerto efímero, en un thread
//! de fondo que vive hasta que termina el proceso de test.

use keepalive_server::config::Config;
use keepalive_server::server::Server;
use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const INVALID_BODY: &[u8] = b"Invalid request.\n\nNot found.\n";

/// Helper: arranca un servidor sirviendo archivos desde `root`
fn start_server(root: &TempDir, crlf: bool) -> SocketAddr {
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        static_root: root.path().to_string_lossy().into_owned(),
        max_message_len: 64 * 1024,
        max_file_size: 1024,
        crlf,
        ..Config::default()
    };

    let server = Server::bind(config).expect("bind");
    let addr = server.local_addr().expect("local addr");
    thread::spawn(move || {
        let _ = server.run();
    });
    addr
}

fn fixture_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("hello.txt"), b"Hello, static world!\n").unwrap();
    fs::write(dir.path().join("data.bin"), [0u8, 159, 146, 150, 0, 10]).unwrap();
    fs::write(dir.path().join("huge.txt"), vec![b'z'; 4096]).unwrap();
    dir
}

fn connect(addr: SocketAddr) -> TcpStream {
    let stream = TcpStream::connect(addr).expect("connect");
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.set_write_timeout(Some(Duration::from_secs(5))).unwrap();
    stream
}

/// Helper: lee una respuesta completa (headers + Content-Length bytes)
fn read_response(stream: &mut TcpStream, separator: &[u8]) -> (String, Vec<u8>) {
    let mut head = Vec::new();
    let mut byte = [0u8; 1];
    while !head.ends_with(separator) {
        let n = stream.read(&mut byte).expect("read header");
        assert_eq!(n, 1, "connection closed mid-header: {:?}", String::from_utf8_lossy(&head));
        head.push(byte[0]);
    }
    let head = String::from_utf8(head).unwrap();

    let length: usize = head
        .lines()
        .find_map(|line| line.strip_prefix("Content-Length: "))
        .expect("Content-Length header")
        .trim_end()
        .parse()
        .unwrap();

    let mut body = vec![0u8; length];
    stream.read_exact(&mut body).expect("read body");
    (head, body)
}

/// Helper: envía un request y retorna (headers, body)
fn request(stream: &mut TcpStream, raw: &str) -> (String, Vec<u8>) {
    stream.write_all(raw.as_bytes()).unwrap();
    read_response(stream, b"\n\n")
}

#[test]
fn test_plus_example_exact_response() {
    let dir = fixture_dir();
    let addr = start_server(&dir, false);
    let mut stream = connect(addr);

    stream.write_all(b"GET /plus/2/3 HTTP/1.1\r\n\r\n").unwrap();
    let expected: &[u8] = b"HTTP/1.1 200\n\
                            Content-type: text/plain\n\
                            Content-Length: 21\n\
                            Connection: Keep-Alive\n\
                            \n\
                            Sum of 2 and 3 is 5.\n";
    let mut actual = vec![0u8; expected.len()];
    stream.read_exact(&mut actual).unwrap();

    assert_eq!(actual, expected);
}

#[test]
fn test_plus_content_length_matches_body() {
    let dir = fixture_dir();
    let addr = start_server(&dir, false);
    let mut stream = connect(addr);

    for (a, b) in [(0i64, 0i64), (-5, 12), (123456789, 987654321), (i64::MAX, i64::MAX)] {
        let (head, body) = request(&mut stream, &format!("GET /plus/{}/{} HTTP/1.1\r\n\r\n", a, b));
        let expected = format!("Sum of {} and {} is {}.\n", a, b, i128::from(a) + i128::from(b));
        assert_eq!(body, expected.as_bytes());
        assert!(head.contains(&format!("Content-Length: {}\n", expected.len())));
    }
}

#[test]
fn test_malformed_plus_keeps_connection_open() {
    let dir = fixture_dir();
    let addr = start_server(&dir, false);
    let mut stream = connect(addr);

    for path in ["/plus/abc/1", "/plus/1/", "/plus/1", "/plus/", "/plus//2"] {
        let (head, body) = request(&mut stream, &format!("GET {} HTTP/1.1\r\n\r\n", path));
        assert!(head.starts_with("HTTP/1.1 200\n"));
        assert_eq!(body, INVALID_BODY, "path {}", path);
    }

    // Sigue respondiendo en el mismo socket
    let (_, body) = request(&mut stream, "GET /plus/1/1 HTTP/1.1\r\n\r\n");
    assert_eq!(body, b"Sum of 1 and 1 is 2.\n");
}

#[test]
fn test_unknown_route() {
    let dir = fixture_dir();
    let addr = start_server(&dir, false);
    let mut stream = connect(addr);

    let (_, body) = request(&mut stream, "GET /help HTTP/1.1\r\n\r\n");
    assert_eq!(body, INVALID_BODY);
}

#[test]
fn test_static_file_contents() {
    let dir = fixture_dir();
    let addr = start_server(&dir, false);
    let mut stream = connect(addr);

    let (head, body) = request(&mut stream, "GET /static/hello.txt HTTP/1.1\r\n\r\n");
    assert_eq!(body, b"Hello, static world!\n");
    assert!(head.contains("Content-Length: 21\n"));

    let (_, body) = request(&mut stream, "GET /static/data.bin HTTP/1.1\r\n\r\n");
    assert_eq!(body, [0u8, 159, 146, 150, 0, 10]);
}

#[test]
fn test_static_nonexistent_keeps_connection_open() {
    let dir = fixture_dir();
    let addr = start_server(&dir, false);
    let mut stream = connect(addr);

    let (_, body) = request(&mut stream, "GET /static/missing.txt HTTP/1.1\r\n\r\n");
    assert_eq!(body, b"Nonexistent resource\n");

    let (_, body) = request(&mut stream, "GET /static/hello.txt HTTP/1.1\r\n\r\n");
    assert_eq!(body, b"Hello, static world!\n");
}

#[test]
fn test_static_traversal_is_refused() {
    let dir = fixture_dir();
    let addr = start_server(&dir, false);
    let mut stream = connect(addr);

    let (_, body) = request(&mut stream, "GET /static/../hello.txt HTTP/1.1\r\n\r\n");
    assert_eq!(body, b"Nonexistent resource\n");
}

#[test]
fn test_oversized_file_closes_only_that_connection() {
    let dir = fixture_dir();
    let addr = start_server(&dir, false);
    let mut victim = connect(addr);
    let mut other = connect(addr);

    victim.write_all(b"GET /static/huge.txt HTTP/1.1\r\n\r\n").unwrap();
    let mut buf = Vec::new();
    victim.read_to_end(&mut buf).unwrap();
    assert!(buf.is_empty());

    let (_, body) = request(&mut other, "GET /plus/3/4 HTTP/1.1\r\n\r\n");
    assert_eq!(body, b"Sum of 3 and 4 is 7.\n");
}

#[test]
fn test_peer_close_does_not_affect_other_clients() {
    let dir = fixture_dir();
    let addr = start_server(&dir, false);
    let mut survivor = connect(addr);

    let (_, body) = request(&mut survivor, "GET /plus/1/2 HTTP/1.1\r\n\r\n");
    assert_eq!(body, b"Sum of 1 and 2 is 3.\n");

    for _ in 0..5 {
        drop(connect(addr));
    }

    let (_, body) = request(&mut survivor, "GET /plus/5/6 HTTP/1.1\r\n\r\n");
    assert_eq!(body, b"Sum of 5 and 6 is 11.\n");
}

#[test]
fn test_concurrent_clients_get_their_own_sums() {
    let dir = fixture_dir();
    let addr = start_server(&dir, false);

    let handles: Vec<_> = (0..4i64)
        .map(|client| {
            thread::spawn(move || {
                let mut stream = connect(addr);
                for i in 0..50i64 {
                    let (a, b) = (client * 1000 + i, client);
                    let (_, body) =
                        request(&mut stream, &format!("GET /plus/{}/{} HTTP/1.1\r\n\r\n", a, b));
                    assert_eq!(body, format!("Sum of {} and {} is {}.\n", a, b, a + b).as_bytes());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("client thread panicked");
    }
}

#[test]
fn test_acceptor_not_blocked_by_idle_client() {
    let dir = fixture_dir();
    let addr = start_server(&dir, false);

    // Un cliente que nunca envía nada no bloquea a los siguientes
    let _idle = connect(addr);
    let mut active = connect(addr);

    let (_, body) = request(&mut active, "GET /plus/8/8 HTTP/1.1\r\n\r\n");
    assert_eq!(body, b"Sum of 8 and 8 is 16.\n");
}

#[test]
fn test_crlf_framing() {
    let dir = fixture_dir();
    let addr = start_server(&dir, true);
    let mut stream = connect(addr);

    stream.write_all(b"GET /plus/2/3 HTTP/1.1\r\n\r\n").unwrap();
    let (head, body) = read_response(&mut stream, b"\r\n\r\n");
    assert!(head.starts_with("HTTP/1.1 200\r\n"));
    assert!(head.contains("Connection: Keep-Alive\r\n"));
    assert_eq!(body, b"Sum of 2 and 3 is 5.\n");
}
