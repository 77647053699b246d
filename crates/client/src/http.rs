//! HTTP implementation of the collaborator contracts.
//!
//! Uses `ureq` (sync). Callers in async code wrap each call in
//! `tokio::task::spawn_blocking`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use ureq::http::Response;
use ureq::{Agent, Body};

use crate::config::ClientConfig;
use crate::core::{
    hint_endpoint, AccuracyService, CheckVerdict, Checker, CollaboratorError, HealthCheck,
    HintSource, Leaderboard, SessionControl, SolutionSource, WordSource,
};
use crate::protocol::{
    AccuracyResponse, CheckResponse, DefinitionResponse, LeaderboardResponse, LeaderboardUpdate,
    PartOfSpeechResponse, WordResponse,
};
use crate::types::{Accuracy, HintKind, LeaderboardEntry};

/// Client for the scramble service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    agent: Agent,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build()
            .into();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn get(&self, endpoint: &'static str) -> Result<Response<Body>, CollaboratorError> {
        debug!("[Client] GET {}", endpoint);
        let result = self.agent.get(&self.url(endpoint)).call();
        classify(endpoint, result)
    }

    fn post_form(
        &self,
        endpoint: &'static str,
        fields: &[(&str, &str)],
    ) -> Result<Response<Body>, CollaboratorError> {
        debug!("[Client] POST {} (form)", endpoint);
        let result = self
            .agent
            .post(&self.url(endpoint))
            .send_form(fields.iter().copied());
        classify(endpoint, result)
    }

    fn post_json<B: Serialize>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> Result<Response<Body>, CollaboratorError> {
        debug!("[Client] POST {} (json)", endpoint);
        let result = self.agent.post(&self.url(endpoint)).send_json(body);
        classify(endpoint, result)
    }
}

/// Map a transport result onto the collaborator error classes.
fn classify(
    endpoint: &'static str,
    result: Result<Response<Body>, ureq::Error>,
) -> Result<Response<Body>, CollaboratorError> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::StatusCode(status)) => {
            warn!("[Client] {} answered {}", endpoint, status);
            Err(CollaboratorError::Status {
                endpoint: endpoint.to_string(),
                status,
            })
        }
        Err(err) => {
            warn!("[Client] {} unreachable: {}", endpoint, err);
            Err(CollaboratorError::unreachable(endpoint, err.to_string()))
        }
    }
}

fn read_json<T: DeserializeOwned>(
    endpoint: &'static str,
    response: Response<Body>,
) -> Result<T, CollaboratorError> {
    let text = read_text(endpoint, response)?;
    serde_json::from_str(&text).map_err(|e| CollaboratorError::malformed(endpoint, e.to_string()))
}

fn read_text(endpoint: &'static str, response: Response<Body>) -> Result<String, CollaboratorError> {
    response
        .into_body()
        .read_to_string()
        .map_err(|e| CollaboratorError::malformed(endpoint, e.to_string()))
}

impl HealthCheck for HttpBackend {
    fn ping(&self) -> Result<(), CollaboratorError> {
        self.get("/").map(|_| ())
    }
}

impl SessionControl for HttpBackend {
    fn open_session(&self) -> Result<(), CollaboratorError> {
        self.get("/session").map(|_| ())
    }
}

impl WordSource for HttpBackend {
    fn get_word(&self, letters: u8) -> Result<String, CollaboratorError> {
        const ENDPOINT: &str = "/get-word";
        let letters = letters.to_string();
        let response = self.post_form(ENDPOINT, &[("letters", &letters)])?;
        let body: WordResponse = read_json(ENDPOINT, response)?;
        Ok(body.word)
    }
}

impl Checker for HttpBackend {
    fn check_word(&self, guess: &str) -> Result<CheckVerdict, CollaboratorError> {
        const ENDPOINT: &str = "/check-word";
        let response = self.post_form(ENDPOINT, &[("word", guess)])?;
        let body: CheckResponse = read_json(ENDPOINT, response)?;
        body.into_verdict()
            .map_err(|message| CollaboratorError::malformed(ENDPOINT, message))
    }
}

impl HintSource for HttpBackend {
    fn get_hint(&self, kind: HintKind) -> Result<String, CollaboratorError> {
        let endpoint = hint_endpoint(kind);
        let response = self.get(endpoint)?;
        let hint = match kind {
            HintKind::Speech => read_json::<PartOfSpeechResponse>(endpoint, response)?.part_of_speech,
            HintKind::Letter => read_text(endpoint, response)?.trim().to_string(),
            HintKind::Definition => read_json::<DefinitionResponse>(endpoint, response)?.definition,
        };
        if hint.is_empty() {
            return Err(CollaboratorError::malformed(endpoint, "empty hint"));
        }
        Ok(hint)
    }
}

impl SolutionSource for HttpBackend {
    fn get_solution(&self) -> Result<String, CollaboratorError> {
        const ENDPOINT: &str = "/get-solution";
        let response = self.get(ENDPOINT)?;
        let solution = read_text(ENDPOINT, response)?.trim().to_string();
        if solution.is_empty() {
            return Err(CollaboratorError::malformed(ENDPOINT, "empty solution"));
        }
        Ok(solution)
    }
}

impl AccuracyService for HttpBackend {
    fn compute_accuracy(&self, guess_attempts: u8) -> Result<Accuracy, CollaboratorError> {
        const ENDPOINT: &str = "/accuracy";
        let attempts = guess_attempts.to_string();
        let response = self.post_form(ENDPOINT, &[("guess_attempts", &attempts)])?;
        let body: AccuracyResponse = read_json(ENDPOINT, response)?;
        Ok(body.into())
    }
}

impl Leaderboard for HttpBackend {
    fn update_leaderboard(&self, username: &str, score: i32) -> Result<(), CollaboratorError> {
        let body = LeaderboardUpdate {
            username,
            new_score: score,
        };
        self.post_json("/update-leaderboard", &body).map(|_| ())
    }

    fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, CollaboratorError> {
        const ENDPOINT: &str = "/get-leaderboard";
        let response = self.get(ENDPOINT)?;
        let body: LeaderboardResponse = read_json(ENDPOINT, response)?;

        let mut entries = Vec::new();
        for line in body.leaderboard.lines().filter(|l| !l.trim().is_empty()) {
            match LeaderboardEntry::parse_line(line) {
                Some(entry) => entries.push(entry),
                None => debug!("[Client] skipping leaderboard line {:?}", line),
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use std::time::Duration;

    /// Serve one canned HTTP response, handing back the raw request.
    fn serve_once(status: &'static str, body: &'static str) -> (HttpBackend, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut request = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
                request.push_str(&line);
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut payload = vec![0u8; content_length];
            reader.read_exact(&mut payload).unwrap();
            request.push_str(&String::from_utf8_lossy(&payload));

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            reader.get_mut().write_all(response.as_bytes()).unwrap();
            request
        });

        let config = ClientConfig {
            base_url: format!("http://{addr}/"),
            timeout: Duration::from_secs(5),
        };
        (HttpBackend::new(&config), handle)
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let (backend, handle) = serve_once("200 OK", "ok");
        assert!(!backend.base_url().ends_with('/'));
        assert!(backend.url("/get-word").ends_with("/get-word"));
        assert!(!backend.url("/get-word").contains("//get-word"));
        backend.ping().unwrap();
        let request = handle.join().unwrap();
        assert!(request.starts_with("GET / HTTP/1.1"));
    }

    #[test]
    fn test_get_word_sends_form() {
        let (backend, handle) = serve_once("200 OK", r#"{"word":"stac"}"#);
        assert_eq!(backend.get_word(4).unwrap(), "stac");
        let request = handle.join().unwrap();
        assert!(request.starts_with("POST /get-word HTTP/1.1"));
        assert!(request.ends_with("letters=4"));
    }

    #[test]
    fn test_check_word_parses_verdict() {
        let (backend, handle) = serve_once(
            "200 OK",
            r#"{"result":"correct","score":{"code":"****","similarity":"100.00%"}}"#,
        );
        let verdict = backend.check_word("cats").unwrap();
        assert!(verdict.correct);
        assert_eq!(verdict.feedback.correct_count(), 4);
        assert!(handle.join().unwrap().ends_with("word=cats"));
    }

    #[test]
    fn test_letter_hint_is_plain_text() {
        let (backend, handle) = serve_once("200 OK", "c");
        assert_eq!(backend.get_hint(HintKind::Letter).unwrap(), "c");
        assert!(handle.join().unwrap().starts_with("GET /hint-2 "));
    }

    #[test]
    fn test_leaderboard_update_sends_json() {
        let (backend, handle) = serve_once("200 OK", "Leaderboard updated");
        backend.update_leaderboard("alice", 27).unwrap();
        let request = handle.join().unwrap();
        assert!(request.starts_with("POST /update-leaderboard "));

        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(body, serde_json::json!({"username": "alice", "newScore": 27}));
    }

    #[test]
    fn test_leaderboard_listing() {
        let (backend, handle) = serve_once("200 OK", r#"{"leaderboard":"1. alice, 27\n2. bob, 11"}"#);
        let board = backend.get_leaderboard().unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[1].name, "bob");
        handle.join().unwrap();
    }

    #[test]
    fn test_leaderboard_skips_unparsable_lines() {
        let (backend, handle) = serve_once(
            "200 OK",
            r#"{"leaderboard":"1. alice, 27\n2. carol, NaN\n\n3. bob, 11"}"#,
        );
        let board = backend.get_leaderboard().unwrap();
        let names: Vec<&str> = board.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
        assert_eq!(board[1].rank, 3);
        handle.join().unwrap();
    }

    #[test]
    fn test_status_error() {
        let (backend, handle) = serve_once("500 Internal Server Error", "boom");
        let err = backend.get_solution().unwrap_err();
        assert_eq!(
            err,
            CollaboratorError::Status {
                endpoint: "/get-solution".to_string(),
                status: 500,
            }
        );
        handle.join().unwrap();
    }

    #[test]
    fn test_malformed_body() {
        let (backend, handle) = serve_once("200 OK", r#"{"completion":"lots"}"#);
        let err = backend.compute_accuracy(3).unwrap_err();
        assert!(matches!(err, CollaboratorError::Malformed { .. }));
        assert_eq!(err.endpoint(), "/accuracy");
        handle.join().unwrap();
    }

    #[test]
    fn test_connection_refused_is_unreachable() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let config = ClientConfig::default().with_base_url(format!("http://{addr}"));
        let backend = HttpBackend::new(&config);
        let err = backend.ping().unwrap_err();
        assert!(matches!(err, CollaboratorError::Unreachable { .. }));
    }
}
