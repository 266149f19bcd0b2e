/// Integration test for the batch transform pipeline
///
/// Tests the following scenarios:
/// 1. Mixed batch: encrypted, plaintext and malformed lines in one run
/// 2. Output order matches input order, no line dropped
/// 3. File sink conflict resolution (overwrite / append / abort)
/// 4. HTTP source gates: non-success status and wrong content-type
/// 5. HTTP source streaming a well-formed remote log
///
/// Note: the HTTP scenarios bind a local TCP listener and speak a minimal
/// canned HTTP/1.1 response; no real network access is needed.
use std::fs;
use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;

use logveil::batch::source::{Source, SourceError};
use logveil::batch::{BatchProcessor, Direction};
use logveil::codec::message;
use logveil::crypto::new_block;
use logveil::output::{OutputError, OutputSink, OverwritePolicy};

/// Helper: unique scratch path for this test process
fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("logveil_{}_{}", std::process::id(), name))
}

/// Helper: seal a payload under the test password
fn sealed(plaintext: &str) -> String {
    let block = new_block("hunter2");
    message::seal(plaintext, block.as_ref()).unwrap()
}

/// Helper: serve exactly one canned HTTP response on a local port
///
/// Returns the URL to fetch. The listener thread answers the first
/// connection and exits.
fn serve_once(status: &'static str, content_type: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind test listener");
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("failed to accept");
        let mut request = [0u8; 2048];
        let _ = stream.read(&mut request);

        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).expect("failed to respond");
    });

    format!("http://{}", addr)
}

fn read_lines(path: &PathBuf) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_mixed_batch_order_and_tolerance() {
    let garbage = logveil::codec::text::encode(&[42u8; 48]);
    let input = format!(
        "[2024-01-01 12:00:00] #channel alice: {}\n\
         just a log line\n\
         [2024-01-01 12:00:01] #channel bob: plain chatter\n\
         [2024-01-01 12:00:02] #channel alice: {}\n\
         [2024-01-01 12:00:03] #channel mallory: {}\n",
        sealed("hello"),
        sealed("@bob hi"),
        garbage
    );

    let path = temp_path("mixed_batch.log");
    let _ = fs::remove_file(&path);

    let mut sink = OutputSink::file(&path, None).unwrap();
    let processor = BatchProcessor::new(new_block("hunter2"), Direction::Decrypt);
    let summary = processor.run(Cursor::new(input), &mut sink).unwrap();

    assert_eq!(summary.lines, 5);
    assert_eq!(summary.transformed, 2);
    assert_eq!(summary.passed_through, 3);

    let lines = read_lines(&path);
    assert_eq!(
        lines,
        vec![
            "[2024-01-01 12:00:00] #channel alice: hello".to_string(),
            "just a log line".to_string(),
            "[2024-01-01 12:00:01] #channel bob: plain chatter".to_string(),
            "[2024-01-01 12:00:02] #channel alice: @bob hi".to_string(),
            format!("[2024-01-01 12:00:03] #channel mallory: {}", garbage),
        ]
    );

    let _ = fs::remove_file(&path);
}

#[test]
fn test_encrypt_then_decrypt_batch_roundtrip() {
    let input = "[2024-01-01 12:00:00] #channel alice: secret plans\n\
                 not a chat line\n";

    let encrypted_path = temp_path("encrypt_roundtrip_a.log");
    let decrypted_path = temp_path("encrypt_roundtrip_b.log");
    let _ = fs::remove_file(&encrypted_path);
    let _ = fs::remove_file(&decrypted_path);

    let mut sink = OutputSink::file(&encrypted_path, None).unwrap();
    BatchProcessor::new(new_block("hunter2"), Direction::Encrypt)
        .run(Cursor::new(input.to_string()), &mut sink)
        .unwrap();

    let encrypted = fs::read_to_string(&encrypted_path).unwrap();
    assert!(!encrypted.contains("secret plans"));
    assert!(encrypted.contains("not a chat line"));

    let mut sink = OutputSink::file(&decrypted_path, None).unwrap();
    BatchProcessor::new(new_block("hunter2"), Direction::Decrypt)
        .run(Cursor::new(encrypted), &mut sink)
        .unwrap();

    assert_eq!(
        read_lines(&decrypted_path),
        vec![
            "[2024-01-01 12:00:00] #channel alice: secret plans".to_string(),
            "not a chat line".to_string(),
        ]
    );

    let _ = fs::remove_file(&encrypted_path);
    let _ = fs::remove_file(&decrypted_path);
}

#[test]
fn test_conflict_overwrite_truncates() {
    let path = temp_path("conflict_overwrite.log");
    fs::write(&path, "old content\n").unwrap();

    let mut sink = OutputSink::file(&path, Some(OverwritePolicy::Overwrite)).unwrap();
    sink.write_line("fresh").unwrap();
    drop(sink);

    assert_eq!(read_lines(&path), vec!["fresh".to_string()]);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_conflict_append_keeps_existing_content() {
    let path = temp_path("conflict_append.log");
    fs::write(&path, "old content\n").unwrap();

    let mut sink = OutputSink::file(&path, Some(OverwritePolicy::Append)).unwrap();
    sink.write_line("fresh").unwrap();
    drop(sink);

    assert_eq!(
        read_lines(&path),
        vec!["old content".to_string(), "fresh".to_string()]
    );
    let _ = fs::remove_file(&path);
}

#[test]
fn test_conflict_abort_leaves_file_untouched() {
    let path = temp_path("conflict_abort.log");
    fs::write(&path, "old content\n").unwrap();

    match OutputSink::file(&path, Some(OverwritePolicy::Abort)) {
        Err(OutputError::Aborted) => {}
        other => panic!("expected abort, got {:?}", other.err()),
    }

    assert_eq!(read_lines(&path), vec!["old content".to_string()]);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_directory_output_is_rejected() {
    match OutputSink::file(&std::env::temp_dir(), None) {
        Err(OutputError::IsDirectory) => {}
        other => panic!("expected directory error, got {:?}", other.err()),
    }
}

#[test]
fn test_http_error_status_aborts_run() {
    let url = serve_once("404 Not Found", "text/plain; charset=utf-8", String::new());

    match Source::Url(url).open() {
        Err(SourceError::Status(404)) => {}
        other => panic!("expected status error, got {:?}", other.err()),
    }
}

#[test]
fn test_http_wrong_content_type_aborts_run() {
    let url = serve_once("200 OK", "text/html", "<html></html>".to_string());

    match Source::Url(url).open() {
        Err(SourceError::ContentType(found)) => assert_eq!(found, "text/html"),
        other => panic!("expected content-type error, got {:?}", other.err()),
    }
}

#[test]
fn test_source_error_exit_codes() {
    assert_eq!(SourceError::Status(500).exit_code(), 1);
    assert_eq!(SourceError::ContentType("text/html".to_string()).exit_code(), 2);
}

#[test]
fn test_http_source_streams_and_decrypts() {
    let body = format!(
        "[2024-01-01 12:00:00] #channel alice: {}\nplain remote line\n",
        sealed("hello")
    );
    let url = serve_once("200 OK", "text/plain; charset=utf-8", body);

    let reader = Source::Url(url).open().unwrap();

    let path = temp_path("http_stream.log");
    let _ = fs::remove_file(&path);
    let mut sink = OutputSink::file(&path, None).unwrap();

    let summary = BatchProcessor::new(new_block("hunter2"), Direction::Decrypt)
        .run(reader, &mut sink)
        .unwrap();
    assert_eq!(summary.lines, 2);
    assert_eq!(summary.transformed, 1);

    assert_eq!(
        read_lines(&path),
        vec![
            "[2024-01-01 12:00:00] #channel alice: hello".to_string(),
            "plain remote line".to_string(),
        ]
    );

    let _ = fs::remove_file(&path);
}

#[test]
fn test_missing_input_file_is_a_source_error() {
    let missing = temp_path("definitely_missing.log");
    let _ = fs::remove_file(&missing);

    match Source::File(missing).open() {
        Err(SourceError::Io(_)) => {}
        other => panic!("expected io error, got {:?}", other.err()),
    }
}
