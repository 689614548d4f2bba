#![forbid(unsafe_code)]

use lazy_static::lazy_static;
use log::info;
use poem::listener::{Listener, RustlsCertificate, RustlsConfig};
use poem::{listener::TcpListener, Route};
use poem_openapi::OpenApiService;

// Sample Service Utilities
use crate::service::message::GetMessageApi;
use crate::service::message_and_user_agent::GetMessageAndUserAgentApi;
use crate::service::simple_message::GetSimpleMessageApi;
use crate::service::simple_user_message::GetSimpleUserMessageApi;
use crate::service::user_agent::GetUserAgentApi;
use crate::service::version::VersionApi;
use crate::utils::config::{init_log, init_runtime_context, RuntimeCtx, APP_ARGS, APP_DIRS,
                           TLS_CERT_FILE, TLS_KEY_FILE};
use crate::utils::errors::Errors;

// Modules
mod service;
mod utils;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "SampleService"; // for poem logging

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Lazily initialize the parameters variable so that is has a 'static lifetime.
// We exit if we can't read our parameters.
lazy_static! {
    static ref RUNTIME_CTX: RuntimeCtx = init_runtime_context();
}

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // --------------- Initialize Service -------------
    // Announce ourselves.
    println!("Starting sample_service!");

    // Only create the data directories if requested.
    if APP_ARGS.create_dirs_only {
        println!("Data directories created under {}.", APP_DIRS.root_dir);
        return Ok(());
    }

    // Initialize the server.
    sample_init();

    // --------------- Main Loop Set Up ---------------
    // Assign base URL.
    let base_url = format!("{}:{}",
        RUNTIME_CTX.parms.config.http_addr,
        RUNTIME_CTX.parms.config.http_port);

    // Create a tuple with all the endpoint structs.
    let endpoints = (GetMessageApi, GetSimpleMessageApi, GetSimpleUserMessageApi,
                     GetUserAgentApi, GetMessageAndUserAgentApi, VersionApi);
    let api_service =
        OpenApiService::new(endpoints, RUNTIME_CTX.parms.config.title.as_str(),
                            env!("CARGO_PKG_VERSION"))
        .server(base_url);

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();

    // Create the routes and run the server.
    let addr = format!("{}{}", "0.0.0.0:", RUNTIME_CTX.parms.config.http_port);
    let ui = api_service.swagger_ui();
    let app = Route::new()
        .nest("/swagger", ui)
        .at("/spec", spec)
        .at("/spec_yaml", spec_yaml)
        .nest("/", api_service);

    // ------------------ Main Loop -------------------
    if RUNTIME_CTX.parms.config.enable_tls {
        let key_file = APP_DIRS.certs_dir.clone() + TLS_KEY_FILE;
        let cert_file = APP_DIRS.certs_dir.clone() + TLS_CERT_FILE;
        info!("Listening on {} using TLS certificate {}.", addr, cert_file);
        poem::Server::new(
            TcpListener::bind(addr).rustls(
                RustlsConfig::new().fallback(
                    RustlsCertificate::new()
                        .key(std::fs::read(key_file)?)
                        .cert(std::fs::read(cert_file)?),
                ),
            ),
        )
        .name(SERVER_NAME)
        .run(app)
        .await
    } else {
        info!("Listening on {}.", addr);
        poem::Server::new(TcpListener::bind(addr))
            .name(SERVER_NAME)
            .run(app)
            .await
    }
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// sample_init:
// ---------------------------------------------------------------------------
/** Initialize all subsystems and data structures other than those needed
 * to configure the main loop processor.
 */
fn sample_init() {
    // Configure our log.
    init_log();

    // Force the reading of input parameters and initialization of runtime context.
    info!("{}", Errors::InputParms(format!("{:#?}", *RUNTIME_CTX)));

    // Log build info.
    print_version_info();
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    info!("\n*** Running SAMPLE_SERVICE={}, BRANCH={}, COMMIT={}, DIRTY={}, SRC_TS={}, RUSTC={}.",
          option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"),
          env!("GIT_BRANCH"),
          env!("GIT_COMMIT_SHORT"),
          env!("GIT_DIRTY"),
          env!("SOURCE_TIMESTAMP"),
          env!("RUSTC_VERSION"));
}
