use std::{net::IpAddr, sync::Arc};

use anyhow::Result;
use api_gateway::{
    client::RemoteEmployeeService,
    config::GatewayConfig,
    http::{self, GatewayState, ServeConfig},
};
use clap::Parser;
use platform_obs::{ObsConfig, init_tracing};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "api-gateway", version, about = "Public HTTP gateway for employee records")]
struct Cli {
    #[arg(long, env = "GATEWAY_HOST", default_value = "0.0.0.0")]
    host: IpAddr,
    #[arg(long, env = "GATEWAY_PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = GatewayConfig::load()?;
    init_tracing(ObsConfig::for_service("api-gateway"))?;

    let employees =
        RemoteEmployeeService::new(config.employee_service_url.clone(), config.request_timeout)?;
    info!(upstream = %config.employee_service_url, "forwarding to employee service");

    let state = GatewayState::new(Arc::new(employees), config.request_timeout);
    http::serve(ServeConfig::new(cli.host, cli.port), state).await
}
