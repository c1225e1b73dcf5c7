use crate::context::Context;
use anyhow::Result;
use comms_server::AppState;

pub fn run(ctx: &Context, port: u16, no_open: bool) -> Result<()> {
    let config = ctx.config()?;
    let model = ctx.model(&config)?;
    let state = AppState::from_config(&config, model)?;

    let rt = tokio::runtime::Runtime::new()?;
    let listener = rt.block_on(tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")))?;
    let actual_port = listener.local_addr()?.port();
    println!("Communications manager API → http://localhost:{actual_port}/api");

    rt.block_on(async move {
        tokio::select! {
            res = comms_server::serve_on(state, listener, !no_open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
