use longbox_lib::RunError;
use longbox_remote::{Client, RemoteOptions, correct_remote};

use super::{fail, make_gate, print_summary};
use crate::cli_types::ApplyArgs;

/// Run the `remote` command.
pub(crate) fn run_remote(url: String, api_key: Option<String>, apply: &ApplyArgs) {
    let api_key = match api_key.or_else(|| std::env::var("KOMGA_API_KEY").ok()) {
        Some(key) => key,
        None => fail(&RunError::config(
            "no API key: pass --api-key or set KOMGA_API_KEY",
        )),
    };

    let client = match Client::new(url, api_key) {
        Ok(client) => client,
        Err(e) => {
            log::error!("loading failed: {e}");
            std::process::exit(1);
        }
    };
    let options = RemoteOptions {
        dry_run: apply.dry_run,
    };
    let mut gate = make_gate(apply.yes);

    log::info!("Correcting series through {}", client.base_url());
    match correct_remote(&client, &options, gate.as_mut()) {
        Ok(summary) => print_summary(&summary, apply.dry_run),
        Err(e) => {
            log::error!("loading failed: {e}");
            std::process::exit(1);
        }
    }
}
