mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::scene`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use musclemap_gui_lib::appearance;
pub use musclemap_gui_lib::asset;
pub use musclemap_gui_lib::calendar;
pub use musclemap_gui_lib::export;
pub use musclemap_gui_lib::i18n;
pub use musclemap_gui_lib::scene;
pub use musclemap_gui_lib::state;

use std::path::PathBuf;

use app::MusclemapApp;
use state::AppSettings;

/// Parsed command line
#[derive(Debug, Default)]
struct CliArgs {
    /// `--model <path>`: body model overriding the configured one
    model: Option<PathBuf>,
    /// `--write-sample-model <path>`: write the sample mannequin and exit
    write_sample: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "musclemap=info,musclemap_gui_lib=info,shared=info".into()),
        )
        .init();

    let args = parse_args();

    if let Some(path) = args.write_sample {
        match asset::mannequin::write_sample_model(&path) {
            Ok(()) => tracing::info!("Wrote sample body model to {}", path.display()),
            Err(e) => {
                tracing::error!("Failed to write sample model {}: {e}", path.display());
                std::process::exit(1);
            }
        }
        return;
    }

    let settings = AppSettings::load();
    let model_path = args.model.unwrap_or_else(|| settings.asset.model_path.clone());
    let model = asset::load_body_model(&model_path);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Muscle Pain Map")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "musclemap",
        native_options,
        Box::new(move |cc| Ok(Box::new(MusclemapApp::new(cc, model, settings)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = CliArgs::default();
    let mut i = 1;
    while i < args.len() {
        match (args[i].as_str(), args.get(i + 1)) {
            ("--model", Some(path)) => {
                parsed.model = Some(PathBuf::from(path));
                i += 1;
            }
            ("--write-sample-model", Some(path)) => {
                parsed.write_sample = Some(PathBuf::from(path));
                i += 1;
            }
            (other, _) => tracing::warn!("Ignoring unknown argument {other}"),
        }
        i += 1;
    }
    parsed
}
