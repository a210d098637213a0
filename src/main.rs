use anyhow::Context as _;
use clap::Parser;
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow};
use hueblock::ui::ColorBlockPicker;
use hueblock::PickerCore;
use log::{error, info, warn};
use std::fs::File;

const APP_ID: &str = "io.github.hueblock.demo";

/// hueblock - An interactive color-block picker widget for GTK4
#[derive(Parser, Debug, Clone)]
#[command(name = "hueblock")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Render the surfaces headlessly to PREFIX-block.png and
    /// PREFIX-strip.png, then exit without opening a window
    #[arg(short = 's', long = "snapshot", value_name = "PREFIX")]
    snapshot: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG still overrides the CLI setting
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting hueblock v{}", env!("CARGO_PKG_VERSION"));

    if let Some(prefix) = cli.snapshot {
        if let Err(err) = write_snapshots(&prefix) {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
        return;
    }

    let app = Application::builder().application_id(APP_ID).build();
    app.connect_activate(build_ui);

    // Pass empty args since clap already consumed them
    app.run_with_args(&["hueblock"]);
}

fn build_ui(app: &Application) {
    let picker = match ColorBlockPicker::new() {
        Ok(picker) => picker,
        Err(err) => {
            error!("failed to allocate picker surfaces: {err}");
            return;
        }
    };

    picker.set_on_color_change(|color| info!("selected color: {color}"));

    let window = ApplicationWindow::builder()
        .application(app)
        .title("hueblock")
        .default_width(260)
        .default_height(240)
        .resizable(false)
        .build();

    window.set_child(Some(picker.widget()));
    window.present();
}

/// Paint both surfaces offscreen and write them out as PNG files.
fn write_snapshots(prefix: &str) -> anyhow::Result<()> {
    let core = PickerCore::new().context("failed to allocate picker surfaces")?;

    for (surface, name) in [
        (core.block_surface(), "block"),
        (core.strip_surface(), "strip"),
    ] {
        let path = format!("{prefix}-{name}.png");
        let mut file =
            File::create(&path).with_context(|| format!("failed to create {path}"))?;
        surface
            .surface()
            .write_to_png(&mut file)
            .with_context(|| format!("failed to write {path}"))?;
        info!("wrote {path}");
    }

    Ok(())
}
