use std::sync::Arc;

use clap::Parser;

use phrasefix::{
    cli::{Cli, Commands},
    config, corrector,
    handlers::{corrections::CorrectionsResp, Ctx},
    http, init,
};

// musl's default malloc is very slow.
#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    init::init_logger();

    let cli = Cli::parse();

    // Handle CLI commands.
    if let Some(cmd) = &cli.command {
        match cmd {
            // Generate a new config file.
            Commands::NewConfig { path } => {
                match config::generate_sample(path) {
                    Ok(_) => {
                        log::info!("config file generated: {}", path.display());
                    }
                    Err(e) => {
                        log::error!("error generating config: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }

            // Correct a single query and print it.
            Commands::Correct { language, text, .. } => {
                let settings = init::init_settings(&cli);
                let tries = init::init_tries(&settings);

                let segments = corrector::correct(
                    &tries,
                    text,
                    language,
                    &settings.allowed_distances,
                    settings.max_lookahead,
                );

                match serde_json::to_string_pretty(&CorrectionsResp::new(segments, 0)) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        log::error!("error encoding result: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }
        }
    }

    // Load config and build the dictionaries before serving.
    let settings = init::init_settings(&cli);
    let tries = Arc::new(init::init_tries(&settings));

    // Setup the global app context used in HTTP handlers.
    let ctx = Arc::new(Ctx {
        tries,
        allowed_distances: settings.allowed_distances.clone(),
        max_lookahead: settings.max_lookahead,
    });

    // Start the HTTP server.
    let routes = http::init_handlers(ctx);
    let addr = settings.address;

    log::info!("starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("error listening on {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, routes).await {
        log::error!("server error: {}", e);
        std::process::exit(1);
    }
}
