use crate::errors::ClusterResult;
use crate::model::{ClusterManagementResult, StatusResult};
use serde::Serialize;
use serde_json::{json, Value};

/// HTTP-style rendering of a management outcome for the request-reception
/// layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagementResponse {
    pub status_code: u16,
    pub body: Value,
}

impl ManagementResponse {
    /// 201 when the element was created everywhere, 500 for partial failure,
    /// and the error's own code for rejected requests.
    pub fn for_create(outcome: &ClusterResult<ClusterManagementResult>) -> Self {
        match outcome {
            Ok(result) => Self {
                status_code: if result.is_successful() { 201 } else { 500 },
                body: render(result),
            },
            Err(error) => Self {
                status_code: error.status_code(),
                body: json!({
                    "status": {
                        "result": StatusResult::Failure,
                        "message": error.to_string(),
                    }
                }),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

fn render(result: &ClusterManagementResult) -> Value {
    serde_json::to_value(result).unwrap_or_else(|error| {
        json!({
            "status": {
                "result": StatusResult::Failure,
                "message": format!("Failed to render result: {error}"),
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClusterError;
    use crate::model::{ElementId, Status};

    #[test]
    fn successful_create_is_201() {
        let mut result = ClusterManagementResult::new();
        result.add_member_status("server-1", Status::success("created"));
        result.set_persistence_status(Status::success("persisted"));

        let response = ManagementResponse::for_create(&Ok(result));
        assert_eq!(response.status_code, 201);
        assert!(response.is_success());
        assert_eq!(response.body["status"]["result"], "SUCCESS");
        assert_eq!(
            response.body["memberStatuses"]["server-1"]["result"],
            "SUCCESS"
        );
    }

    #[test]
    fn partial_failure_is_500_with_details() {
        let mut result = ClusterManagementResult::new();
        result.add_member_status("server-1", Status::success("created"));
        result.set_persistence_status(Status::failure("disk full"));

        let response = ManagementResponse::for_create(&Ok(result));
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body["status"]["result"], "FAILURE");
        assert_eq!(response.body["persistenceStatus"]["message"], "disk full");
    }

    #[test]
    fn rejected_request_uses_error_code() {
        let outcome = Err(ClusterError::EntityExists {
            id: ElementId::region("customers"),
        });
        let response = ManagementResponse::for_create(&outcome);
        assert_eq!(response.status_code, 409);
        assert_eq!(response.body["status"]["result"], "FAILURE");
        assert!(response.body["status"]["message"]
            .as_str()
            .unwrap()
            .contains("customers"));
    }
}
