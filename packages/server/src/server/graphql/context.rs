use std::net::IpAddr;
use std::sync::Arc;

use crate::kernel::ServerDeps;

/// GraphQL request context
///
/// Created per request; the dependency container is shared.
#[derive(Clone)]
pub struct GraphQLContext {
    pub deps: Arc<ServerDeps>,
    pub client_ip: Option<IpAddr>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(deps: Arc<ServerDeps>, client_ip: Option<IpAddr>) -> Self {
        Self { deps, client_ip }
    }
}
