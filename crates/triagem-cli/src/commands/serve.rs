use std::io::{Cursor, Read};
use std::path::PathBuf;

use serde::Serialize;
use tiny_http::{Header, Method, Response, Server};
use tracing::{info, warn};
use triagem_core::catalog::SectorCatalog;
use triagem_core::error::TriagemError;

use crate::commands::resolve_catalog;

/// Largest request body accepted, for page batches and roster workbooks alike.
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Serve classification and roster normalization until the process is
/// stopped. Requests are handled one at a time; each classification call
/// starts from fresh page context.
pub fn run(addr: &str, catalog_file: Option<PathBuf>) -> Result<(), TriagemError> {
    let catalog = resolve_catalog(catalog_file)?;
    let server = Server::http(addr)
        .map_err(|e| TriagemError::Server(format!("cannot listen on {addr}: {e}")))?;

    info!(addr, catalog = %catalog.name, "listening");

    for mut request in server.incoming_requests() {
        let declared = request.body_length();
        let (status, payload, bytes) =
            match read_body(request.as_reader(), declared, MAX_BODY_BYTES) {
                Ok(body) => {
                    let (status, payload) =
                        route(request.method(), request.url(), &body, &catalog);
                    (status, payload, body.len())
                }
                Err((status, payload)) => (status, payload, 0),
            };

        info!(
            method = %request.method(),
            url = request.url(),
            status,
            bytes,
            "request handled"
        );

        if let Err(e) = request.respond(json_response(status, payload)) {
            warn!(error = %e, "failed to send response");
        }
    }

    Ok(())
}

/// Read a request body of at most `limit` bytes. Oversized bodies are
/// refused with 413, whether the size is declared up front or only found
/// while reading.
fn read_body(
    reader: &mut dyn Read,
    declared: Option<usize>,
    limit: usize,
) -> Result<Vec<u8>, (u16, String)> {
    let too_large = || error_body(413, &format!("request body exceeds {limit} bytes"));

    if declared.is_some_and(|len| len > limit) {
        return Err(too_large());
    }

    let mut body = Vec::new();
    reader
        .take(limit as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| error_body(400, &format!("could not read request body: {e}")))?;
    if body.len() > limit {
        return Err(too_large());
    }
    Ok(body)
}

fn route(method: &Method, url: &str, body: &[u8], catalog: &SectorCatalog) -> (u16, String) {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (Method::Get, "/saude") => (200, r#"{"status":"ok"}"#.to_string()),
        (Method::Post, "/classificar") => match triagem_core::classify_json(body, catalog) {
            Ok(results) => to_json(200, &results),
            Err(e) => error_body(400, &e.to_string()),
        },
        (Method::Post, "/escala") => match triagem_core::normalize_schedule(body) {
            Ok(extraction) => to_json(200, &extraction),
            Err(e) => error_body(422, &e.to_string()),
        },
        (_, "/saude" | "/classificar" | "/escala") => error_body(405, "method not allowed"),
        _ => error_body(404, "not found"),
    }
}

fn to_json<T: Serialize>(status: u16, value: &T) -> (u16, String) {
    match serde_json::to_string(value) {
        Ok(json) => (status, json),
        Err(e) => error_body(500, &e.to_string()),
    }
}

fn error_body(status: u16, message: &str) -> (u16, String) {
    (status, serde_json::json!({ "erro": message }).to_string())
}

fn json_response(status: u16, body: String) -> Response<Cursor<Vec<u8>>> {
    let response = Response::from_string(body).with_status_code(status);
    match Header::from_bytes(&b"Content-Type"[..], &b"application/json; charset=utf-8"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
