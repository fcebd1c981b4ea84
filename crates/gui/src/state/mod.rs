pub mod controller;
pub mod persistence;
pub mod selection;
pub mod settings;

use chrono::NaiveDate;
use glam::Vec3;
use shared::{PainStore, Severity};

use crate::asset::AssetError;
use crate::calendar::MonthCursor;
use crate::i18n::Lang;
use crate::scene::SceneGraph;
use crate::viewport::camera::{ArcBallCamera, CameraAnimator, CameraPose, ViewPreset};

pub use selection::SelectionState;
pub use settings::AppSettings;

/// Camera plus its reset animation
#[derive(Debug, Default)]
pub struct ViewState {
    pub camera: ArcBallCamera,
    pub animator: CameraAnimator,
}

/// Combined application state
pub struct AppState {
    /// Pain record for every day
    pub store: PainStore,
    pub selection: SelectionState,
    pub lang: Lang,
    /// Month shown by the calendar
    pub cursor: MonthCursor,
    /// Body model; `None` when loading failed
    pub scene: Option<SceneGraph>,
    /// Why the body model could not be loaded (shown until exit)
    pub load_error: Option<String>,
    pub view: ViewState,
    pub settings: AppSettings,
    /// Real current date, for the calendar's "today" marker
    pub today: NaiveDate,
    /// Store version last written to storage
    pub(crate) saved_version: u64,
    /// Settings changed since the last save
    pub(crate) settings_dirty: bool,
    /// Transient status line message
    pub notice: Option<String>,
}

impl AppState {
    /// Build the state from a model load result and the persisted record.
    ///
    /// A corrupt record is replaced by an empty one. A failed model load
    /// leaves the state without a scene; calendar and severity operations
    /// then do nothing.
    pub fn new(
        model: Result<SceneGraph, AssetError>,
        persisted: Option<&str>,
        settings: AppSettings,
        today: NaiveDate,
    ) -> Self {
        let (scene, load_error) = match model {
            Ok(scene) => (Some(scene), None),
            Err(e) => {
                tracing::error!("Body model unavailable: {}", e);
                (None, Some(e.to_string()))
            }
        };
        let store = PainStore::load_or_empty(persisted);

        let mut state = Self {
            saved_version: store.version(),
            store,
            selection: SelectionState::new(today),
            lang: settings.ui.language,
            cursor: MonthCursor::containing(today),
            scene,
            load_error,
            view: ViewState::default(),
            settings,
            today,
            settings_dirty: false,
            notice: None,
        };
        let front = state.preset_pose(ViewPreset::Front);
        state.view.camera.set_pose(front);
        state.repaint_all();
        state
    }

    /// Whether the body model loaded and the recording features are live
    pub fn is_ready(&self) -> bool {
        self.scene.is_some()
    }

    /// Severity of `part` on the selected date
    pub fn severity_of(&self, part: &str) -> Severity {
        self.store.severity(&self.selection.date_key(), part)
    }

    /// Pose for a preset, framed on the body bounds.
    pub fn preset_pose(&self, preset: ViewPreset) -> CameraPose {
        let camera = &self.view.camera;
        match self.scene.as_ref().and_then(|s| s.body_bounds()) {
            Some(bounds) => {
                let size = bounds.max - bounds.min;
                let extent = size.y.max(size.x).max(0.1);
                let distance = extent / (2.0 * (camera.fov * 0.5).tan()) * 1.25;
                preset.pose(bounds.center(), distance)
            }
            None => preset.pose(Vec3::new(0.0, 0.9, 0.0), 4.0),
        }
    }

    /// Write settings back to the config file if something changed them.
    pub fn save_settings_if_changed(&mut self) {
        if std::mem::take(&mut self.settings_dirty) {
            self.settings.save();
        }
    }

    /// Reapply every part's colour for the selected date.
    pub(crate) fn repaint_all(&mut self) {
        let key = self.selection.date_key();
        let day = self.store.get(&key);
        if let Some(scene) = self.scene.as_mut() {
            crate::appearance::sync_all(scene, |name| {
                day.get(name).copied().unwrap_or(Severity::None)
            });
        }
    }
}
