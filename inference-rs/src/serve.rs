//! Line-oriented request loop: one JSON request in, one JSON response out.
//!
//! Every per-request failure is turned into an error response here; only
//! I/O failures on the streams themselves end the loop.

use crate::form::InputForm;
use crate::predictor::PricePredictor;
use crate::record::FeatureRecord;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

/// Incoming request line.
#[derive(Debug, Clone)]
pub enum Request {
    Command(Command),
    Predict(FeatureRecord),
}

impl Request {
    /// Parse one line. Lines with a `command` key are commands, anything
    /// else must be a full feature record.
    pub fn parse(line: &str) -> std::result::Result<Self, serde_json::Error> {
        let mut value: serde_json::Value = serde_json::from_str(line)?;
        match value.get_mut("command").map(serde_json::Value::take) {
            Some(command) => Ok(Request::Command(serde_json::from_value(command)?)),
            None => Ok(Request::Predict(serde_json::from_value(value)?)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Form,
    Details,
}

/// Outgoing response line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Price {
        ok: bool,
        price: f64,
        display: String,
    },
    Form {
        ok: bool,
        form: InputForm,
    },
    Details {
        ok: bool,
        details: String,
    },
    Error {
        ok: bool,
        error: String,
    },
}

impl Response {
    fn error(message: impl std::fmt::Display) -> Self {
        Response::Error {
            ok: false,
            error: format!("Error during prediction: {message}"),
        }
    }
}

/// Answer a single request line.
pub fn handle_line(predictor: &PricePredictor, line: &str) -> Response {
    let request = match Request::parse(line) {
        Ok(request) => request,
        Err(e) => {
            log::debug!("rejected malformed request: {e}");
            return Response::error(format!("malformed request: {e}"));
        }
    };

    match request {
        Request::Command(Command::Form) => Response::Form {
            ok: true,
            form: predictor.form(),
        },
        Request::Command(Command::Details) => Response::Details {
            ok: true,
            details: predictor.details(),
        },
        Request::Predict(record) => match predictor.predict(&record) {
            Ok(result) => Response::Price {
                ok: true,
                price: result.price_estimate,
                display: result.display(),
            },
            Err(e) => {
                log::warn!("prediction rejected for {record:?}: {e}");
                Response::error(e)
            }
        },
    }
}

/// Serve requests from `input` until EOF, writing responses to `output`.
///
/// Returns the number of requests answered.
pub fn run<R: BufRead, W: Write>(
    predictor: &PricePredictor,
    input: R,
    mut output: W,
) -> Result<usize> {
    let mut served = 0;

    for line in input.lines() {
        let line = line.context("failed to read request")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handle_line(predictor, line);
        serde_json::to_writer(&mut output, &response).context("failed to encode response")?;
        output.write_all(b"\n").context("failed to write response")?;
        output.flush().context("failed to flush response")?;
        served += 1;
    }

    Ok(served)
}
