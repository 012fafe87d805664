use std::env;

use oscdp::{logging, runtime};

/// Usage: `oscdp-panel [DEVICE]`. Without a device the configured link
/// device is used.
fn main() -> anyhow::Result<()> {
    let settings = runtime::load_settings();
    logging::init_file(&settings.logging)?;

    let device = env::args().nth(1);
    runtime::run_panel(&settings, device)
}
