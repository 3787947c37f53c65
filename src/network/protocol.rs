// Line-delimited JSON protocol: one command object per line in, one reply per line out

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{ReportError, Voter};
use crate::query::ReportRequest;
use crate::storage::{NewReport, ReportUpdate};

/// A request line, discriminated by its `command` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    Run {
        request: ReportRequest,
    },
    SaveReport {
        report: NewReport,
    },
    GetReport {
        id: Uuid,
    },
    ListReports {
        #[serde(default)]
        public_only: bool,
    },
    UpdateReport {
        id: Uuid,
        update: ReportUpdate,
    },
    DeleteReport {
        id: Uuid,
    },
    RunSaved {
        id: Uuid,
        #[serde(default)]
        page: Option<usize>,
        #[serde(default)]
        per_page: Option<usize>,
    },
    ValidateVoter {
        voter: Voter,
    },
    Ping,
}

impl Command {
    pub fn from_line(line: &str) -> Result<Self, ReportError> {
        serde_json::from_str(line)
            .map_err(|e| ReportError::InvalidArgument(format!("malformed command: {e}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

/// `{"ok":true,"result":…}` or `{"ok":false,"error":{"kind":…,"message":…}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl Reply {
    #[must_use]
    pub const fn success(result: serde_json::Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(err: &ReportError) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(ErrorBody {
                kind: err.kind().to_string(),
                message: err.to_string(),
            }),
        }
    }

    /// Encode as a single line (newline included)
    #[must_use]
    pub fn to_line(&self) -> String {
        let mut line = serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"ok":false,"error":{{"kind":"Serialization","message":"{e}"}}}}"#)
        });
        line.push('\n');
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FilterOperator;

    #[test]
    fn test_decode_commands() {
        let run = Command::from_line(
            r#"{"command":"run","request":{"filters":[{"field":"age","operator":"isNotEmpty"}],"perPage":5}}"#,
        )
        .unwrap();
        match run {
            Command::Run { request } => {
                assert_eq!(request.filters[0].operator, FilterOperator::IsNotEmpty);
                assert_eq!(request.per_page, Some(5));
            }
            other => panic!("Expected run, got {other:?}"),
        }

        let run_saved = Command::from_line(
            r#"{"command":"runSaved","id":"67e55044-10b1-426f-9247-bb680e5fe0c8","perPage":10}"#,
        )
        .unwrap();
        assert!(matches!(run_saved, Command::RunSaved { page: None, per_page: Some(10), .. }));

        assert_eq!(Command::from_line(r#"{"command":"ping"}"#).unwrap(), Command::Ping);
        assert_eq!(
            Command::from_line(r#"{"command":"listReports","publicOnly":true}"#).unwrap(),
            Command::ListReports { public_only: true }
        );
    }

    #[test]
    fn test_bad_command_is_invalid_argument() {
        assert!(matches!(
            Command::from_line(r#"{"command":"dropTable"}"#),
            Err(ReportError::InvalidArgument(_))
        ));
        assert!(matches!(Command::from_line("not json"), Err(ReportError::InvalidArgument(_))));
    }

    #[test]
    fn test_reply_shapes() {
        let ok = Reply::success(serde_json::json!("pong"));
        assert_eq!(ok.to_line(), "{\"ok\":true,\"result\":\"pong\"}\n");

        let err = Reply::failure(&ReportError::NotFound("42".into()));
        let json: serde_json::Value = serde_json::from_str(err.to_line().trim()).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"]["kind"], "NotFound");
    }
}
