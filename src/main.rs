use std::env;

use oscdp::{logging, runtime};

fn main() -> anyhow::Result<()> {
    let settings = runtime::load_settings();

    if env::args().skip(1).any(|arg| arg == "--print-config") {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    logging::init_stderr(&settings.logging)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting oscdp player");

    runtime::run_player(&settings)
}
