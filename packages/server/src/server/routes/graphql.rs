use crate::server::graphql::{GraphQLContext, Schema};
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use juniper::http::{GraphQLBatchRequest, GraphQLRequest};
use std::sync::Arc;
use tracing::debug;

fn status_for(ok: bool, ctx: &GraphQLContext) -> StatusCode {
    if ok {
        StatusCode::OK
    } else {
        debug!(client_ip = ?ctx.client_ip, "GraphQL request failed");
        StatusCode::BAD_REQUEST
    }
}

/// GraphQL POST endpoint
pub async fn graphql_handler(
    State(schema): State<Arc<Schema>>,
    Extension(context): Extension<GraphQLContext>,
    Json(request): Json<GraphQLRequest>,
) -> Response {
    let response = request.execute(&schema, &context).await;
    let status = status_for(response.is_ok(), &context);
    (status, Json(response)).into_response()
}

/// GraphQL batch POST endpoint
pub async fn graphql_batch_handler(
    State(schema): State<Arc<Schema>>,
    Extension(context): Extension<GraphQLContext>,
    Json(batch): Json<GraphQLBatchRequest>,
) -> Response {
    let response = batch.execute(&schema, &context).await;
    let status = status_for(response.is_ok(), &context);
    (status, Json(response)).into_response()
}

const GRAPHIQL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>SafetyNet API</title>
    <style>body { margin: 0; } #graphiql { height: 100vh; }</style>
    <script crossorigin src="https://unpkg.com/react@18/umd/react.production.min.js"></script>
    <script crossorigin src="https://unpkg.com/react-dom@18/umd/react-dom.production.min.js"></script>
    <link rel="stylesheet" href="https://unpkg.com/graphiql/graphiql.min.css" />
</head>
<body>
    <div id="graphiql">Loading...</div>
    <script src="https://unpkg.com/graphiql/graphiql.min.js" type="application/javascript"></script>
    <script>
        const fetcher = GraphiQL.createFetcher({ url: '/graphql' });
        ReactDOM.createRoot(document.getElementById('graphiql'))
            .render(React.createElement(GraphiQL, { fetcher }));
    </script>
</body>
</html>
"#;

/// GraphiQL page, served in debug builds only
pub async fn graphql_playground() -> Html<&'static str> {
    Html(GRAPHIQL_PAGE)
}
