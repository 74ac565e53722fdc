//! HTTP annotation provider.
//!
//! Talks to an NLP service that accepts `POST {"text": "..."}` and answers
//! with `{"tokens": [{"text": .., "lemma": .., "pos": ..}, ...]}`. The service
//! checked once on construction with an empty request; if that fails the
//! provider is reported unavailable.

use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::AnnotationProvider;
use crate::error::ProviderError;
use crate::token::Annotation;

use super::lexicon::UNKNOWN_POS;

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    tokens: Vec<RemoteToken>,
}

#[derive(Debug, Deserialize)]
struct RemoteToken {
    text: String,
    #[serde(default)]
    lemma: Option<String>,
    #[serde(default, alias = "upos", alias = "tag")]
    pos: Option<String>,
}

impl From<RemoteToken> for Annotation {
    fn from(t: RemoteToken) -> Self {
        let lemma = t
            .lemma
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| t.text.clone());
        let pos = t
            .pos
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| UNKNOWN_POS.to_string());
        Annotation {
            surface: t.text,
            lemma,
            pos,
        }
    }
}

/// Parse a service response body into annotations
pub fn parse_response(body: &str) -> Result<Vec<Annotation>, ProviderError> {
    let response: AnnotateResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    Ok(response.tokens.into_iter().map(Annotation::from).collect())
}

/// An [`AnnotationProvider`] backed by a remote HTTP service
#[derive(Debug)]
pub struct RemoteAnnotator {
    client: reqwest::blocking::Client,
    url: String,
}

impl RemoteAnnotator {
    /// Build the client and check the service once
    pub fn connect(url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("gloss-rs/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let annotator = RemoteAnnotator {
            client,
            url: url.to_string(),
        };

        info!("checking annotation service at {}", url);
        annotator
            .request("")
            .map_err(|e| ProviderError::Unavailable(format!("{} ({})", url, e)))?;

        Ok(annotator)
    }

    fn request(&self, sentence: &str) -> Result<Vec<Annotation>, ProviderError> {
        let response = self
            .client
            .post(&self.url)
            .json(&AnnotateRequest { text: sentence })
            .send()
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Request(format!(
                "service returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        let annotations = parse_response(&body)?;
        debug!("service returned {} tokens", annotations.len());
        Ok(annotations)
    }
}

impl AnnotationProvider for RemoteAnnotator {
    fn name(&self) -> &str {
        "remote"
    }

    fn annotate(&self, sentence: &str) -> Result<Vec<Annotation>, ProviderError> {
        self.request(sentence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answer `connections` requests with a fixed reply and return the
    /// request bodies in arrival order
    fn serve(
        status: &'static str,
        body: &'static str,
        connections: usize,
    ) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/annotate", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let mut bodies = Vec::new();
            for _ in 0..connections {
                let (stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream);

                let mut content_length = 0;
                loop {
                    let mut header = String::new();
                    reader.read_line(&mut header).unwrap();
                    let header = header.trim_end();
                    if header.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = header.split_once(':') {
                        if name.eq_ignore_ascii_case("content-length") {
                            content_length = value.trim().parse().unwrap();
                        }
                    }
                }
                let mut request_body = vec![0; content_length];
                reader.read_exact(&mut request_body).unwrap();
                bodies.push(String::from_utf8(request_body).unwrap());

                let reply = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let mut stream = reader.into_inner();
                stream.write_all(reply.as_bytes()).unwrap();
                stream.flush().unwrap();
            }
            bodies
        });

        (url, handle)
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{"tokens": [
            {"text": "Running", "lemma": "run", "pos": "VERB"},
            {"text": "fast", "upos": "ADV"},
            {"text": "!", "lemma": "", "pos": ""}
        ]}"#;
        let annotations = parse_response(body).unwrap();

        assert_eq!(
            annotations,
            vec![
                Annotation::new("Running", "run", "VERB"),
                Annotation::new("fast", "fast", "ADV"),
                Annotation::new("!", "!", "X"),
            ]
        );
    }

    #[test]
    fn test_parse_response_malformed() {
        let err = parse_response(r#"{"words": []}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn test_connect_refused_is_unavailable() {
        // Port 9 (discard) is not expected to be listening
        let err = RemoteAnnotator::connect("http://127.0.0.1:9/annotate", Duration::from_secs(2))
            .unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable(_)));
    }

    #[test]
    fn test_connected_service_feeds_gloss() {
        let reply = r#"{"tokens": [
            {"text": "running", "lemma": "run", "pos": "VERB"},
            {"text": "zorps", "lemma": "zorp", "pos": "NOUN"}
        ]}"#;
        let (url, server) = serve("200 OK", reply, 2);

        let annotator = RemoteAnnotator::connect(&url, Duration::from_secs(5)).unwrap();
        let records = crate::gloss("running zorps", Some(&annotator));

        let glosses: Vec<&str> = records.iter().map(|r| r.gloss.as_str()).collect();
        assert_eq!(glosses, vec!["RUN.PROG", "zorp[?]"]);
        assert_eq!(records[0].lemma, "run");
        assert_eq!(records[1].pos, "NOUN");

        let bodies = server.join().unwrap();
        assert_eq!(
            bodies,
            vec![r#"{"text":""}"#, r#"{"text":"running zorps"}"#]
        );
    }

    #[test]
    fn test_connect_server_error_is_unavailable() {
        let (url, server) = serve("500 Internal Server Error", r#"{"error": "down"}"#, 1);

        let err = RemoteAnnotator::connect(&url, Duration::from_secs(5)).unwrap_err();
        match err {
            ProviderError::Unavailable(reason) => assert!(reason.contains("500"), "{}", reason),
            other => panic!("expected Unavailable, got {:?}", other),
        }

        assert_eq!(server.join().unwrap(), vec![r#"{"text":""}"#]);
    }
}
