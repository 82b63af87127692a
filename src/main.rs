use clap::Parser;
use std::error::Error;
use std::io::{self, IsTerminal};
use std::net::SocketAddr;
use std::sync::Arc;

use ctf_serve::cli::Options;
use ctf_serve::config::{AppState, Config};
use ctf_serve::prompt::Prompter;
use ctf_serve::{banner, logger, server};

fn main() -> Result<(), Box<dyn Error>> {
    let options = Options::parse();
    let mut cfg = Config::load(&options)?;
    let interactive = !options.no_prompt && io::stdin().is_terminal();

    if !options.no_banner {
        banner::print_banner();
    }

    if interactive {
        Prompter::new(io::stdin().lock(), io::stdout().lock()).fill_missing(&mut cfg)?;
    }
    cfg.fill_defaults();

    logger::init(&cfg)?;
    let addr = cfg.get_socket_addr()?;
    let state = AppState::new(&cfg).map_err(|e| {
        format!(
            "Cannot serve directory '{}': {e}",
            cfg.served_directory().display()
        )
    })?;

    // Create Tokio runtime, sized by the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers.filter(|&w| w > 0) {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    let result = runtime.block_on(async_main(
        addr,
        Arc::new(state),
        interactive,
        !options.no_banner,
    ));
    // Do not wait for the blocking stdin reader
    runtime.shutdown_background();
    result
}

async fn async_main(
    addr: SocketAddr,
    state: Arc<AppState>,
    interactive: bool,
    show_banner: bool,
) -> Result<(), Box<dyn Error>> {
    let listener =
        server::create_listener(addr).map_err(|e| format!("Failed to bind {addr}: {e}"))?;

    logger::log_server_start(&addr, state.root.path(), &state.config);
    if show_banner {
        banner::print_serving(state.root.path(), &addr, interactive);
    }

    server::run(listener, state, async move {
        server::shutdown_signal(interactive).await;
    })
    .await;

    println!("Server stopped gracefully.");
    Ok(())
}
