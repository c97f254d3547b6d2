use cluster_config::model::{ClusterManagementResult, Status, StatusResult};
use proptest::prelude::*;

pub fn status_result_strategy() -> impl Strategy<Value = StatusResult> {
    prop_oneof![
        Just(StatusResult::Success),
        Just(StatusResult::Failure),
        Just(StatusResult::NotApplicable),
    ]
}

/// Member statuses are only ever SUCCESS or FAILURE.
pub fn member_status_strategy() -> impl Strategy<Value = Status> {
    (any::<bool>(), "[a-z ]{0,20}").prop_map(|(success, message)| Status::new(success, message))
}

pub fn persistence_status_strategy() -> impl Strategy<Value = Status> {
    status_result_strategy().prop_map(|result| match result {
        StatusResult::Success => Status::success("persisted"),
        StatusResult::Failure => Status::failure("not persisted"),
        StatusResult::NotApplicable => Status::not_applicable(),
    })
}

pub fn member_name_strategy() -> impl Strategy<Value = String> {
    "server-[0-9]{1,3}"
}

pub fn management_result_strategy() -> impl Strategy<Value = ClusterManagementResult> {
    (
        prop::collection::hash_map(member_name_strategy(), member_status_strategy(), 0..6),
        persistence_status_strategy(),
    )
        .prop_map(|(members, persistence)| {
            let mut result = ClusterManagementResult::new();
            for (member, status) in members {
                result.add_member_status(member, status);
            }
            result.set_persistence_status(persistence);
            result
        })
}
