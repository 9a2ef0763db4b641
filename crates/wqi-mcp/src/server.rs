use std::io::{self, BufRead, Write};
use std::sync::{Mutex, PoisonError};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};
use wqi_core::{
    classify, format_index, insights, parameter_feedback, predict_with_rng, progress_value, quality_scale,
    Measurement, Parameter, PredictOptions, QualityCategory, WEIGHTS,
};

use crate::config::ServerConfig;
use crate::framing::{read_incoming, write_response, Incoming};
use crate::protocol::{
    JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND,
    PARSE_ERROR,
};

const DEFAULT_MCP_PROTOCOL_VERSION: &str = "2024-11-05";

pub struct ScorerServer {
    config: ServerConfig,
    rng: Mutex<ChaCha8Rng>,
}

impl ScorerServer {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::from_env())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let seed = config.uncertainty_seed.unwrap_or_else(rand::random);
        Self {
            config,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                INVALID_REQUEST,
                "invalid jsonrpc version",
            ));
        }

        // Notifications are never answered.
        let Some(id) = request.id else {
            debug!(method = %request.method, "notification");
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => {
                let protocol_version = request
                    .params
                    .get("protocolVersion")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_MCP_PROTOCOL_VERSION);
                JsonRpcResponse::success(
                    id,
                    json!({
                        "protocolVersion": protocol_version,
                        "serverInfo": {"name": "wqi-mcp", "version": env!("CARGO_PKG_VERSION")},
                        "capabilities": {
                            "tools": {
                                "listChanged": false
                            }
                        }
                    }),
                )
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, tools_list_result()),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(id, METHOD_NOT_FOUND, "method not found"),
        };

        Some(response)
    }

    fn handle_tools_call(&self, id: Value, params: Value) -> JsonRpcResponse {
        let parsed: ToolsCallParams = match serde_json::from_value(params) {
            Ok(v) => v,
            Err(err) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("invalid params: {err}"));
            }
        };

        debug!(tool = %parsed.name, "tools/call");
        match parsed.name.as_str() {
            "water_quality_predict" => self.exec_predict(id, parsed.arguments),
            "water_quality_insights" => exec_insights(id, parsed.arguments),
            "water_quality_parameter_feedback" => exec_parameter_feedback(id, parsed.arguments),
            "water_quality_scale" => exec_scale(id),
            "water_quality_parameters" => exec_parameters(id),
            _ => JsonRpcResponse::error(id, METHOD_NOT_FOUND, "unknown tool"),
        }
    }

    fn exec_predict(&self, id: Value, arguments: Option<Value>) -> JsonRpcResponse {
        let args: PredictInput = match parse_args(arguments) {
            Ok(v) => v,
            Err(resp) => return resp.with_id(id),
        };
        let options = PredictOptions {
            with_uncertainty: args
                .with_uncertainty
                .unwrap_or(self.config.default_with_uncertainty),
        };

        let outcome = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            predict_with_rng(&args.measurement, options, &mut *rng)
        };
        let result = match outcome {
            Ok(v) => v,
            Err(err) => {
                warn!(rejected = ?err.rejected, "rejected measurement");
                return JsonRpcResponse::error_with_data(
                    id,
                    INVALID_PARAMS,
                    err.to_string(),
                    Some(json!({ "rejected": err.rejected })),
                );
            }
        };

        let feedback = parameter_feedback(&args.measurement);
        JsonRpcResponse::success(
            id,
            json!({
                "content": [
                    {
                        "type": "text",
                        "text": format!(
                            "Water quality: {} (WQI {})",
                            result.category,
                            format_index(result.index)
                        )
                    }
                ],
                "structuredContent": {
                    "category": result.category,
                    "index": result.index,
                    "index_display": format_index(result.index),
                    "progress": progress_value(result.index),
                    "presentation_tag": result.presentation_tag,
                    "sub_index": result.sub_index,
                    "with_uncertainty": options.with_uncertainty,
                    "insights": insights(result.index, result.category),
                    "feedback": feedback
                }
            }),
        )
    }

    pub fn serve_stdio(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Reads requests until EOF, answering each in the framing it arrived in.
    /// Malformed frames get a parse error and the loop carries on.
    pub fn serve<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> io::Result<()> {
        while let Some(incoming) = read_incoming(&mut reader)? {
            let (payload, framing) = match incoming {
                Incoming::Message { payload, framing } => (payload, framing),
                Incoming::Malformed { reason, framing } => {
                    warn!(%reason, "rejected stdio frame");
                    let response = JsonRpcResponse::error(
                        Value::Null,
                        PARSE_ERROR,
                        format!("invalid stdio frame: {reason}"),
                    );
                    write_response(&mut writer, &response, framing)?;
                    continue;
                }
            };

            let response = match serde_json::from_slice::<JsonRpcRequest>(&payload) {
                Ok(request) => self.handle_request(request),
                Err(err) => {
                    warn!(%err, "unparseable request");
                    Some(JsonRpcResponse::error(
                        Value::Null,
                        PARSE_ERROR,
                        format!("parse error: {err}"),
                    ))
                }
            };
            if let Some(response) = response {
                write_response(&mut writer, &response, framing)?;
            }
        }

        Ok(())
    }
}

impl Default for ScorerServer {
    fn default() -> Self {
        Self::new()
    }
}

fn tools_list_result() -> Value {
    let measurement_schema = json!({
        "type": "object",
        "required": Parameter::ALL.map(Parameter::key),
        "properties": Parameter::ALL
            .iter()
            .map(|p| (p.key().to_string(), json!({"type": "number", "description": p.description()})))
            .collect::<serde_json::Map<_, _>>()
    });

    json!({
        "tools": [
            {
                "name": "water_quality_predict",
                "description": "Score a water sample into a quality index and category.",
                "inputSchema": {
                    "type": "object",
                    "required": ["measurement"],
                    "properties": {
                        "measurement": measurement_schema.clone(),
                        "with_uncertainty": {"type": "boolean"}
                    }
                }
            },
            {
                "name": "water_quality_insights",
                "description": "Advisory sentences for a quality index.",
                "inputSchema": {
                    "type": "object",
                    "required": ["index", "category"],
                    "properties": {
                        "index": {"type": "number"},
                        "category": {
                            "type": "string",
                            "enum": QualityCategory::ALL.map(QualityCategory::label)
                        }
                    }
                }
            },
            {
                "name": "water_quality_parameter_feedback",
                "description": "Flag individual readings outside their recommended range.",
                "inputSchema": {
                    "type": "object",
                    "required": ["measurement"],
                    "properties": {
                        "measurement": measurement_schema
                    }
                }
            },
            {
                "name": "water_quality_scale",
                "description": "Quality category legend with index ranges.",
                "inputSchema": {"type": "object", "properties": {}}
            },
            {
                "name": "water_quality_parameters",
                "description": "Measured parameters with units, descriptions and index weights.",
                "inputSchema": {"type": "object", "properties": {}}
            }
        ]
    })
}

fn exec_insights(id: Value, arguments: Option<Value>) -> JsonRpcResponse {
    let args: InsightsInput = match parse_args(arguments) {
        Ok(v) => v,
        Err(resp) => return resp.with_id(id),
    };
    let category = args.category.parse::<QualityCategory>().unwrap_or_else(|err| {
        warn!(%err, "unrecognised category; answering from the index");
        classify(args.index)
    });
    let lines = insights(args.index, category);

    JsonRpcResponse::success(
        id,
        json!({
            "content": [{"type": "text", "text": lines.join("\n")}],
            "structuredContent": {"insights": lines}
        }),
    )
}

fn exec_parameter_feedback(id: Value, arguments: Option<Value>) -> JsonRpcResponse {
    let args: FeedbackInput = match parse_args(arguments) {
        Ok(v) => v,
        Err(resp) => return resp.with_id(id),
    };
    let feedback = parameter_feedback(&args.measurement);
    let text = if feedback.is_empty() {
        "All parameters within recommended ranges".to_string()
    } else {
        feedback.join("\n")
    };

    JsonRpcResponse::success(
        id,
        json!({
            "content": [{"type": "text", "text": text}],
            "structuredContent": {"feedback": feedback}
        }),
    )
}

fn exec_scale(id: Value) -> JsonRpcResponse {
    JsonRpcResponse::success(
        id,
        json!({
            "content": [{"type": "text", "text": "quality scale ready"}],
            "structuredContent": {"scale": quality_scale()}
        }),
    )
}

fn exec_parameters(id: Value) -> JsonRpcResponse {
    let parameters = Parameter::ALL
        .iter()
        .map(|p| {
            json!({
                "key": p.key(),
                "label": p.label(),
                "unit": p.unit(),
                "description": p.description(),
                "weight": parameter_weight(*p)
            })
        })
        .collect::<Vec<_>>();

    JsonRpcResponse::success(
        id,
        json!({
            "content": [{"type": "text", "text": "parameter catalogue ready"}],
            "structuredContent": {
                "parameters": parameters,
                "sample": Measurement::sample()
            }
        }),
    )
}

/// `None` for readings that do not feed the index.
const fn parameter_weight(parameter: Parameter) -> Option<f64> {
    match parameter {
        Parameter::Temperature => None,
        Parameter::DissolvedOxygen => Some(WEIGHTS.dissolved_oxygen),
        Parameter::Ph => Some(WEIGHTS.ph),
        Parameter::Conductivity => Some(WEIGHTS.conductivity),
        Parameter::Bod => Some(WEIGHTS.bod),
        Parameter::Nitrate => Some(WEIGHTS.nitrate),
        Parameter::FecalColiform => Some(WEIGHTS.fecal_coliform),
    }
}

fn parse_args<T: for<'de> Deserialize<'de>>(
    arguments: Option<Value>,
) -> Result<T, JsonRpcResponse> {
    let Some(args) = arguments else {
        return Err(JsonRpcResponse::error(
            Value::Null,
            INVALID_PARAMS,
            "missing tool arguments",
        ));
    };

    serde_json::from_value(args).map_err(|err| {
        JsonRpcResponse::error(
            Value::Null,
            INVALID_PARAMS,
            format!("invalid tool arguments: {err}"),
        )
    })
}

#[derive(Debug, Deserialize)]
struct ToolsCallParams {
    name: String,
    arguments: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct PredictInput {
    measurement: Measurement,
    with_uncertainty: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct InsightsInput {
    index: f64,
    category: String,
}

#[derive(Debug, Deserialize)]
struct FeedbackInput {
    measurement: Measurement,
}
