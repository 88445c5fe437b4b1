//! Bidirectional mapping between the typed message model and the legacy
//! XML wire format.
//!
//! # Responsibilities
//! - Encode requests/responses as flat XML documents, one element per field
//! - Decode the documents back, rejecting anything outside the closed set
//!
//! This is an explicit codec per message shape, not a general XML mapper;
//! new message kinds are out of scope by design.

use std::collections::HashMap;

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

use crate::legacy::message::{LegacyRequest, LegacyResponse};

/// Errors produced while decoding legacy wire content.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("legacy payload is not parseable XML: {0}")]
    Malformed(String),

    #[error("unrecognized legacy message root `{0}`")]
    UnknownRoot(String),

    #[error("legacy message `{root}` is missing required element `{element}`")]
    MissingElement {
        root: &'static str,
        element: &'static str,
    },
}

fn element(name: &str, value: &str) -> String {
    format!("<{name}>{}</{name}>", escape(value))
}

/// Encode a request into its XML wire form.
pub fn encode_request(request: &LegacyRequest) -> String {
    match request {
        LegacyRequest::Register {
            name,
            email,
            protected_cpf,
        } => format!(
            "<cadastro>{}{}{}</cadastro>",
            element("nome", name),
            element("email", email),
            element("cpf", protected_cpf),
        ),
        LegacyRequest::Lookup { id } => {
            format!("<consulta>{}</consulta>", element("id", id))
        }
    }
}

/// Encode a response into its XML wire form.
pub fn encode_response(response: &LegacyResponse) -> String {
    match response {
        LegacyResponse::Accepted {
            status,
            id,
            message,
        } => format!(
            "<resposta>{}{}{}</resposta>",
            element("status", status),
            element("id", id),
            element("mensagem", message),
        ),
        LegacyResponse::Record {
            id,
            name,
            email,
            protected_cpf,
        } => format!(
            "<cliente>{}{}{}{}</cliente>",
            element("id", id),
            element("nome", name),
            element("email", email),
            element("cpf_protegido", protected_cpf),
        ),
        LegacyResponse::Rejected { message } => {
            format!("<erro>{}</erro>", element("mensagem", message))
        }
    }
}

/// Decode an XML request the legacy system received.
pub fn decode_request(xml: &str) -> Result<LegacyRequest, CodecError> {
    let (root, mut fields) = parse_flat(xml)?;
    match root.as_str() {
        "cadastro" => Ok(LegacyRequest::Register {
            name: take_required(&mut fields, "cadastro", "nome")?,
            email: fields.remove("email").unwrap_or_default(),
            protected_cpf: take_required(&mut fields, "cadastro", "cpf")?,
        }),
        "consulta" => Ok(LegacyRequest::Lookup {
            id: take_required(&mut fields, "consulta", "id")?,
        }),
        _ => Err(CodecError::UnknownRoot(root)),
    }
}

/// Decode an XML reply the legacy system produced.
pub fn decode_response(xml: &str) -> Result<LegacyResponse, CodecError> {
    let (root, mut fields) = parse_flat(xml)?;
    match root.as_str() {
        "resposta" => Ok(LegacyResponse::Accepted {
            status: take_required(&mut fields, "resposta", "status")?,
            id: take_required(&mut fields, "resposta", "id")?,
            message: take_required(&mut fields, "resposta", "mensagem")?,
        }),
        "cliente" => Ok(LegacyResponse::Record {
            id: take_required(&mut fields, "cliente", "id")?,
            name: take_required(&mut fields, "cliente", "nome")?,
            email: fields.remove("email").unwrap_or_default(),
            protected_cpf: take_required(&mut fields, "cliente", "cpf_protegido")?,
        }),
        "erro" => Ok(LegacyResponse::Rejected {
            message: take_required(&mut fields, "erro", "mensagem")?,
        }),
        _ => Err(CodecError::UnknownRoot(root)),
    }
}

fn take_required(
    fields: &mut HashMap<String, String>,
    root: &'static str,
    element: &'static str,
) -> Result<String, CodecError> {
    fields
        .remove(element)
        .ok_or(CodecError::MissingElement { root, element })
}

/// Parse a one-level document into its root name and child text fields.
///
/// The dialect never nests deeper than root → field → text, so a flat
/// walk over the event stream is sufficient.
fn parse_flat(xml: &str) -> Result<(String, HashMap<String, String>), CodecError> {
    let mut reader = Reader::from_str(xml);

    let mut root: Option<String> = None;
    let mut fields = HashMap::new();
    let mut current: Option<String> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                if root.is_none() {
                    root = Some(name);
                } else {
                    current = Some(name);
                    text.clear();
                }
            }
            Ok(Event::Empty(empty)) => {
                if root.is_some() {
                    let name = String::from_utf8_lossy(empty.name().as_ref()).into_owned();
                    fields.insert(name, String::new());
                }
            }
            Ok(Event::Text(t)) => {
                if current.is_some() {
                    let unescaped = t.unescape().map_err(|e| CodecError::Malformed(e.to_string()))?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::End(_)) => {
                if let Some(field) = current.take() {
                    fields.insert(field, text.trim().to_owned());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(CodecError::Malformed(e.to_string())),
        }
    }

    match root {
        Some(root) => Ok((root, fields)),
        None => Err(CodecError::Malformed("document has no root element".into())),
    }
}
