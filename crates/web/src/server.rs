use crate::api::{ApiReply, App};
use anyhow::{anyhow, Context};
use std::io::Read;
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Read one request, dispatch it and write the JSON reply.
pub fn serve(mut request: Request, app: &App) -> anyhow::Result<()> {
    if request.method() == &Method::Options {
        let response = Response::empty(StatusCode(204));
        let response = cors_headers()?
            .into_iter()
            .fold(response, |response, header| response.with_header(header));
        request.respond(response).context("respond")?;
        return Ok(());
    }

    let mut body = String::new();
    request
        .as_reader()
        .read_to_string(&mut body)
        .context("read request body")?;
    let method = request.method().clone();
    let url = request.url().to_string();
    let reply = app.handle(&method, &url, &body);
    respond_json(request, reply)
}

fn respond_json(request: Request, reply: ApiReply) -> anyhow::Result<()> {
    let body = serde_json::to_vec_pretty(&reply.body).context("encode reply")?;
    let mut response = Response::from_data(body)
        .with_status_code(StatusCode(reply.status))
        .with_header(header("Content-Type", "application/json")?);
    for extra in cors_headers()? {
        response = response.with_header(extra);
    }
    request.respond(response).context("respond")?;
    Ok(())
}

fn cors_headers() -> anyhow::Result<Vec<Header>> {
    Ok(vec![
        header("Access-Control-Allow-Origin", "*")?,
        header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")?,
        header("Access-Control-Allow-Headers", "Content-Type")?,
    ])
}

fn header(name: &str, value: &str) -> anyhow::Result<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes())
        .map_err(|_| anyhow!("invalid header {name}: {value}"))
}
