use std::net::IpAddr;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;

use crate::analysis::domain::analysis_response::AnalysisResponse;
use crate::analysis::domain::people_counter::{AnalysisError, PeopleCounter};
use crate::shared::constants::UPLOAD_FIELD_NAME;
use crate::shared::selected_file::SelectedFile;

/// Talks to the analysis server over HTTP.
///
/// Each call is a single `POST` with a `multipart/form-data` body holding
/// one part named `file`. No timeout or retry is applied.
///
/// Uses the blocking reqwest client, so it must not be called from inside an
/// async runtime; callers run it on a worker thread.
pub struct HttpPeopleCounter {
    client: Client,
    endpoint: String,
}

impl HttpPeopleCounter {
    /// Builds a client for `endpoint`. Loopback endpoints bypass any
    /// configured proxy, the way browsers treat `localhost`.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, AnalysisError> {
        let endpoint = endpoint.into();
        let mut builder = Client::builder();
        if is_loopback(&endpoint) {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| transport_error(&endpoint, e))?;
        Ok(Self { client, endpoint })
    }
}

impl PeopleCounter for HttpPeopleCounter {
    fn count_people(&self, file: &SelectedFile) -> Result<u32, AnalysisError> {
        let bytes = file.read().map_err(|e| AnalysisError::Read {
            name: file.name().to_string(),
            source: e,
        })?;

        log::info!(
            "Uploading {} ({} bytes, {}) to {}",
            file.name(),
            bytes.len(),
            file.mime_type(),
            self.endpoint
        );

        let part = Part::bytes(bytes)
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())
            .map_err(|e| transport_error(&self.endpoint, e))?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|e| transport_error(&self.endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Status {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .map_err(|e| transport_error(&self.endpoint, e))?;
        let decoded = AnalysisResponse::decode(&body)?;

        log::info!("Detected {} people in {}", decoded.people_count, file.name());
        Ok(decoded.people_count)
    }
}

fn is_loopback(endpoint: &str) -> bool {
    let Ok(url) = reqwest::Url::parse(endpoint) else {
        return false;
    };
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback()),
        None => false,
    }
}

fn transport_error(url: &str, source: reqwest::Error) -> AnalysisError {
    AnalysisError::Transport {
        url: url.to_string(),
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serves exactly one request with a canned response and hands back the
    /// raw request it received.
    fn one_shot_server(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/analyze", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request
        });

        (url, handle)
    }

    fn read_request(stream: &mut impl Read) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if request_complete(&buf) {
                break;
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    fn request_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let headers = text[..header_end].to_ascii_lowercase();
        let body_len = buf.len() - (header_end + 4);

        if let Some(line) = headers
            .lines()
            .find(|l| l.starts_with("content-length:"))
        {
            let expected: usize = line["content-length:".len()..].trim().parse().unwrap();
            return body_len >= expected;
        }
        if headers.contains("transfer-encoding: chunked") {
            return text.ends_with("0\r\n\r\n");
        }
        true
    }

    fn test_counter(url: String) -> HttpPeopleCounter {
        HttpPeopleCounter::new(url).unwrap()
    }

    fn jpeg_file() -> SelectedFile {
        SelectedFile::from_bytes("photo.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0, 0x42, 0x42])
    }

    #[test]
    fn test_count_people_success() {
        let (url, server) = one_shot_server("200 OK", r#"{"peopleCount": 7}"#);
        let counter = test_counter(url);

        let count = counter.count_people(&jpeg_file()).unwrap();

        assert_eq!(count, 7);
        server.join().unwrap();
    }

    #[test]
    fn test_request_is_multipart_post_with_file_part() {
        let (url, server) = one_shot_server("200 OK", r#"{"peopleCount": 1}"#);
        let counter = test_counter(url);

        counter.count_people(&jpeg_file()).unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with("POST /analyze HTTP/1.1\r\n"));
        assert!(request
            .to_ascii_lowercase()
            .contains("content-type: multipart/form-data; boundary="));
        assert!(request.contains(r#"name="file"; filename="photo.jpg""#));
        assert!(request.contains("Content-Type: image/jpeg"));
        assert!(request.contains("BB"));
    }

    #[test]
    fn test_server_error_status_is_failure() {
        let (url, server) = one_shot_server("500 Internal Server Error", r#"{"error": "boom"}"#);
        let counter = test_counter(url);

        let err = counter.count_people(&jpeg_file()).unwrap_err();

        assert!(matches!(err, AnalysisError::Status { status: 500, .. }));
        server.join().unwrap();
    }

    #[test]
    fn test_bad_request_status_is_failure() {
        let (url, server) = one_shot_server("400 Bad Request", r#"{"error": "No file uploaded"}"#);
        let counter = test_counter(url);

        let err = counter.count_people(&jpeg_file()).unwrap_err();

        assert!(matches!(err, AnalysisError::Status { status: 400, .. }));
        server.join().unwrap();
    }

    #[test]
    fn test_missing_count_field_is_malformed() {
        let (url, server) = one_shot_server("200 OK", r#"{"people": 3}"#);
        let counter = test_counter(url);

        let err = counter.count_people(&jpeg_file()).unwrap_err();

        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
        server.join().unwrap();
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/analyze", listener.local_addr().unwrap());
        drop(listener);
        let counter = test_counter(url.clone());

        let err = counter.count_people(&jpeg_file()).unwrap_err();

        assert!(matches!(err, AnalysisError::Transport { .. }));
        assert!(err.to_string().contains(&url));
    }

    #[test]
    fn test_unreadable_file_fails_before_request() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = SelectedFile::from_path(tmp.path().join("missing.jpg"));
        let counter = test_counter("http://127.0.0.1:9/analyze".to_string());

        let err = counter.count_people(&file).unwrap_err();

        assert!(matches!(err, AnalysisError::Read { .. }));
    }

    #[rstest]
    #[case("http://localhost:5000/analyze", true)]
    #[case("http://127.0.0.1:5000/analyze", true)]
    #[case("http://[::1]:5000/analyze", true)]
    #[case("https://analysis.example.com/analyze", false)]
    #[case("http://10.0.0.5/analyze", false)]
    #[case("not a url", false)]
    fn test_is_loopback(#[case] endpoint: &str, #[case] expected: bool) {
        assert_eq!(is_loopback(endpoint), expected);
    }
}
