use serde::{Deserialize, Serialize};

use crate::auth::guard::RouteDecision;

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub path: String,
    #[serde(flatten)]
    pub decision: RouteDecision,
}
