use crate::config::ServerConfig;
use crate::error::AnalyzeError;
use crate::handler::Analyzer;
use serde_json::json;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use warp::Filter;
use warp::http::StatusCode;

/// Route tree: `GET /analyze`, static assets, permissive CORS
pub fn routes(
    analyzer: Analyzer,
    public_dir: String,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let analyzer_filter = warp::any().map(move || analyzer.clone());

    let analyze = warp::path("analyze")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(analyzer_filter)
        .and_then(analyze_handler);

    let static_files = warp::get().and(warp::fs::dir(public_dir));

    analyze
        .or(static_files)
        .with(warp::cors().allow_any_origin().allow_methods(vec!["GET"]))
}

async fn analyze_handler(
    params: HashMap<String, String>,
    analyzer: Analyzer,
) -> Result<impl warp::Reply, Infallible> {
    let raw_url = params.get("url").map(String::as_str);

    let reply = match analyzer.analyze(raw_url).await {
        Ok(response) => warp::reply::with_status(warp::reply::json(&response), StatusCode::OK),
        Err(e) => error_reply(&e, raw_url.unwrap_or_default()),
    };
    Ok(reply)
}

fn error_reply(error: &AnalyzeError, url: &str) -> warp::reply::WithStatus<warp::reply::Json> {
    if error.is_input_error() {
        let body = json!({ "error": error.to_string() });
        warp::reply::with_status(warp::reply::json(&body), StatusCode::BAD_REQUEST)
    } else {
        let body = json!({
            "error": "Failed to analyze website",
            "details": error.to_string(),
            "url": url,
        });
        warp::reply::with_status(warp::reply::json(&body), StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Serve until Ctrl-C
pub async fn serve(config: &ServerConfig, analyzer: Analyzer) -> Result<(), warp::Error> {
    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    let (bound, server) = warp::serve(routes(analyzer, config.public_dir.clone()))
        .try_bind_with_graceful_shutdown(addr, async {
            tokio::signal::ctrl_c().await.ok();
            ::log::info!("Shutdown signal received");
        })?;

    ::log::info!("Server is running on http://localhost:{}", bound.port());
    server.await;
    ::log::info!("Server stopped");
    Ok(())
}
