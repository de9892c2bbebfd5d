//! # TR-064 service browser
//!
//! Connects to a gateway, prints the device identity and every service with
//! its actions, then lists the known hosts.
//!
//! ## Usage
//!
//! ```bash
//! TR064_USER=admin TR064_PASSWORD=secret cargo run --example list_services
//! ```
//!
//! `TR064_URL` overrides the default `https://fritz.box`, `TR064_CERTIFICATE`
//! points at the device's PEM certificate and `TR064_LOG_MODE=debug` shows
//! every SOAP exchange.

use tr064_api::logging::init_logging_from_env;
use tr064_api::{ApiError, ClientConfig, Tr064Client};

fn main() {
    if let Err(e) = init_logging_from_env() {
        eprintln!("Logging disabled: {}", e);
    }

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ApiError> {
    let client = Tr064Client::connect(ClientConfig::from_env()?)?;

    let device = client.device_info()?;
    println!("{} ({} {})", device.friendly_name, device.manufacturer, device.model_name);
    if let Some(version) = &device.software_version {
        println!("Software version {}", version);
    }
    println!();

    for name in client.list_services() {
        println!("{}", client.service_info(&name)?);

        match client.service(&name) {
            Ok(service) => {
                for action in service.list_actions() {
                    println!("    - {}", action);
                }
            }
            Err(e) => println!("    actions unavailable: {}", e),
        }
        println!();
    }

    match client.host_list() {
        Ok(hosts) => {
            println!("{} known hosts", hosts.len());
            for host in hosts {
                let name = host.get("HostName").map(String::as_str).unwrap_or("?");
                let ip = host.get("IPAddress").map(String::as_str).unwrap_or("");
                let active = host.get("Active").map(|a| a == "1").unwrap_or(false);
                println!("  {:<32} {:<16} {}", name, ip, if active { "online" } else { "offline" });
            }
        }
        Err(e) if e.is_fault() => println!("Host list not supported: {}", e),
        Err(e) => return Err(e),
    }

    Ok(())
}
