//! Stdio message framing. A client may send one JSON document per line, or
//! LSP-style `Content-Length` frames; replies use whichever the request used.

use std::io::{self, BufRead, Read, Write};

use crate::protocol::JsonRpcResponse;

/// Largest `Content-Length` body accepted. Requests here are a handful of
/// numbers, so anything near this is hostile or broken.
pub const MAX_FRAME_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    Line,
    ContentLength,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Incoming {
    Message { payload: Vec<u8>, framing: Framing },
    /// A frame that could not be read; answered with a parse error.
    Malformed { reason: String, framing: Framing },
}

/// Next message from `reader`, skipping blank lines. `None` at EOF.
pub fn read_incoming<R: BufRead>(reader: &mut R) -> io::Result<Option<Incoming>> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if header_name(trimmed).is_none() {
            return Ok(Some(Incoming::Message {
                payload: trimmed.as_bytes().to_vec(),
                framing: Framing::Line,
            }));
        }

        let length = match read_body_length(reader, trimmed)? {
            Ok(v) => v,
            Err(reason) => return Ok(Some(malformed(reason))),
        };

        let mut payload = Vec::with_capacity(length);
        let got = reader.by_ref().take(length as u64).read_to_end(&mut payload)?;
        if got < length {
            return Ok(Some(malformed(format!(
                "frame body truncated: expected {length} bytes, got {got}"
            ))));
        }
        return Ok(Some(Incoming::Message {
            payload,
            framing: Framing::ContentLength,
        }));
    }
}

fn malformed(reason: String) -> Incoming {
    Incoming::Malformed {
        reason,
        framing: Framing::ContentLength,
    }
}

/// Recognised header names, lowercased. Anything else starts a line message.
fn header_name(line: &str) -> Option<&'static str> {
    let (name, _) = line.split_once(':')?;
    let name = name.trim();
    ["content-length", "content-type"]
        .into_iter()
        .find(|known| name.eq_ignore_ascii_case(known))
}

/// Consumes the header block that begins with `first` and returns the body
/// length. The outer `Result` carries I/O failures, the inner one a reason to
/// reject the frame.
fn read_body_length<R: BufRead>(
    reader: &mut R,
    first: &str,
) -> io::Result<Result<usize, String>> {
    let mut declared = content_length_value(first);
    let mut header = String::new();
    loop {
        header.clear();
        if reader.read_line(&mut header)? == 0 {
            return Ok(Err("unexpected eof while reading frame headers".to_string()));
        }
        let trimmed = header.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }
        if let Some(v) = content_length_value(trimmed) {
            declared = Some(v);
        }
    }

    let Some(raw) = declared else {
        return Ok(Err("missing content-length header".to_string()));
    };
    Ok(check_length(&raw))
}

fn content_length_value(line: &str) -> Option<String> {
    if header_name(line) != Some("content-length") {
        return None;
    }
    line.split_once(':').map(|(_, v)| v.trim().to_string())
}

fn check_length(raw: &str) -> Result<usize, String> {
    let length = raw
        .parse::<u64>()
        .map_err(|_| format!("invalid content-length: {raw}"))?;
    match usize::try_from(length) {
        Ok(v) if v <= MAX_FRAME_BYTES => Ok(v),
        _ => Err(format!(
            "frame of {length} bytes exceeds limit of {MAX_FRAME_BYTES}"
        )),
    }
}

pub fn write_response<W: Write>(
    writer: &mut W,
    response: &JsonRpcResponse,
    framing: Framing,
) -> io::Result<()> {
    let body = serde_json::to_vec(response)?;
    match framing {
        Framing::Line => {
            writer.write_all(&body)?;
            writer.write_all(b"\n")?;
        }
        Framing::ContentLength => {
            write!(writer, "Content-Length: {}\r\n\r\n", body.len())?;
            writer.write_all(&body)?;
        }
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn read_all(input: &[u8]) -> Vec<Incoming> {
        let mut reader = Cursor::new(input.to_vec());
        let mut out = Vec::new();
        while let Some(msg) = read_incoming(&mut reader).expect("in-memory read") {
            out.push(msg);
        }
        out
    }

    fn reason_of(msg: &Incoming) -> &str {
        match msg {
            Incoming::Malformed { reason, .. } => reason.as_str(),
            Incoming::Message { .. } => "",
        }
    }

    #[test]
    fn header_names_are_case_insensitive() {
        assert_eq!(header_name("content-LENGTH: 42"), Some("content-length"));
        assert_eq!(header_name("Content-Type: json"), Some("content-type"));
        assert_eq!(header_name("{\"jsonrpc\":\"2.0\"}"), None);
        assert_eq!(check_length("42"), Ok(42));
    }

    #[test]
    fn line_and_framed_messages_are_split() {
        let msgs = read_all(b"\n{\"a\":1}\r\nContent-Length: 7\r\n\r\n{\"b\":2}");
        assert_eq!(
            msgs,
            vec![
                Incoming::Message {
                    payload: b"{\"a\":1}".to_vec(),
                    framing: Framing::Line
                },
                Incoming::Message {
                    payload: b"{\"b\":2}".to_vec(),
                    framing: Framing::ContentLength
                },
            ]
        );
    }

    #[test]
    fn missing_content_length_is_rejected() {
        let msgs = read_all(b"Content-Type: application/json\r\n\r\n");
        assert_eq!(msgs.len(), 1);
        assert_eq!(reason_of(&msgs[0]), "missing content-length header");
    }

    #[test]
    fn oversized_content_length_is_rejected_without_allocating() {
        let msgs = read_all(b"Content-Length: 18446744073709551615\r\n\r\n{}");
        assert!(reason_of(&msgs[0]).contains("exceeds limit"));

        let just_over = format!("Content-Length: {}\r\n\r\n", MAX_FRAME_BYTES + 1);
        let msgs = read_all(just_over.as_bytes());
        assert!(reason_of(&msgs[0]).contains("exceeds limit"));

        let msgs = read_all(b"Content-Length: 99999999999999999999999\r\n\r\n");
        assert!(reason_of(&msgs[0]).starts_with("invalid content-length"));
    }

    #[test]
    fn short_body_is_reported_as_truncated() {
        let msgs = read_all(b"Content-Length: 100\r\n\r\n{\"id\":1}");
        assert_eq!(
            reason_of(&msgs[0]),
            "frame body truncated: expected 100 bytes, got 8"
        );
        assert_eq!(msgs.len(), 1);
    }

    #[test]
    fn eof_inside_headers_is_rejected() {
        let msgs = read_all(b"Content-Length: 10\r\n");
        assert_eq!(
            reason_of(&msgs[0]),
            "unexpected eof while reading frame headers"
        );
    }
}
