//! Workflow subdag and step names used by deployment actions.

// Subdags
pub const ALL_PREFLIGHT_CHECKS_DAG_NAME: &str = "preflight";
pub const ARMADA_BUILD_DAG_NAME: &str = "armada_build";
pub const CREATE_ACTION_TAG: &str = "create_action_tag";
pub const DAG_CONCURRENCY_CHECK_DAG_NAME: &str = "dag_concurrency_check";
pub const DESTROY_SERVER_DAG_NAME: &str = "destroy_server";
pub const DRYDOCK_BUILD_DAG_NAME: &str = "drydock_build";
pub const GET_DEPLOY_CONF_DAG_NAME: &str = "dag_deployment_configuration";
pub const GET_RENDERED_DOC: &str = "get_rendered_doc";
pub const VALIDATE_SITE_DESIGN_DAG_NAME: &str = "validate_site_design";

// Steps
pub const ACTION_XCOM: &str = "action_xcom";
pub const DECIDE_AIRFLOW_UPGRADE: &str = "decide_airflow_upgrade";
pub const SKIP_UPGRADE_AIRFLOW: &str = "skip_upgrade_airflow";
pub const UPGRADE_AIRFLOW: &str = "upgrade_airflow";

pub const SUBDAG_NAMES: &[&str] = &[
    ALL_PREFLIGHT_CHECKS_DAG_NAME,
    ARMADA_BUILD_DAG_NAME,
    CREATE_ACTION_TAG,
    DAG_CONCURRENCY_CHECK_DAG_NAME,
    DESTROY_SERVER_DAG_NAME,
    DRYDOCK_BUILD_DAG_NAME,
    GET_DEPLOY_CONF_DAG_NAME,
    GET_RENDERED_DOC,
    VALIDATE_SITE_DESIGN_DAG_NAME,
];

pub const STEP_NAMES: &[&str] = &[
    ACTION_XCOM,
    DECIDE_AIRFLOW_UPGRADE,
    SKIP_UPGRADE_AIRFLOW,
    UPGRADE_AIRFLOW,
];

/// True when `name` is a known subdag or step name.
pub fn is_known_step(name: &str) -> bool {
    SUBDAG_NAMES.contains(&name) || STEP_NAMES.contains(&name)
}
