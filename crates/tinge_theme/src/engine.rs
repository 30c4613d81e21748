//! The theming engine
//!
//! [`ThemeEngine`] is the single source of truth for "what theme is in
//! effect right now" across three scopes:
//!
//! - **Application**: created with the engine, lives until `destroy`
//! - **Local**: one attached screen at a time, saved before discard
//! - **Remote**: recomputed from the application scope plus a
//!   scope-specific background override
//!
//! The engine is an explicitly constructed instance; hosts that want
//! one per process hold it in their composition root. All mutation
//! happens through `&mut self` from a single logical thread.

use chrono::{NaiveDateTime, NaiveTime};
use tinge_core::{Color, TokenColor};
use tracing::debug;

use crate::broker::{ChangeBroker, DynamicListener, ListenerId};
use crate::delta::ChangeDelta;
use crate::error::ThemeError;
use crate::night::{NightResolver, NightVariant, SystemProbe, ThemeMode};
use crate::palette::DerivedPalette;
use crate::roles::ColorRole;
use crate::storage::ThemeStorage;
use crate::theme::{AppTheme, BackgroundAware, ResolvedTheme};

/// Storage namespace for every key the engine persists.
pub const STORAGE_NAMESPACE: &str = "tinge";

/// Key prefix for a local scope's persisted theme, completed by the
/// owning screen's name.
pub const LOCAL_THEME_KEY_PREFIX: &str = "theme_";

/// Key for the most recent explicitly picked color.
const RECENT_COLOR_KEY: &str = "color_recent";

/// Key for the persisted theme-mode version.
const THEME_VERSION_KEY: &str = "theme_version";

/// Identity of a screen that owns the local scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenIdentity {
    /// Handle under which the screen is registered with the broker.
    pub listener: ListenerId,
    /// Stable name used as the persistence key.
    pub name: String,
}

struct LocalScope {
    screen: ScreenIdentity,
    default: AppTheme,
    theme: AppTheme,
}

/// The layered theme hierarchy plus its collaborators.
pub struct ThemeEngine {
    default_application: AppTheme,
    application: AppTheme,
    local: Option<LocalScope>,
    remote: AppTheme,
    remote_background: TokenColor,
    mode: ThemeMode,
    night_variant: NightVariant,
    palette: DerivedPalette,
    broker: ChangeBroker,
    storage: Box<dyn ThemeStorage>,
    probe: Box<dyn SystemProbe>,
}

impl ThemeEngine {
    /// Creates an engine over the given persistence and host-input
    /// seams. The application scope starts on the built-in fallback
    /// theme.
    pub fn new(storage: Box<dyn ThemeStorage>, probe: Box<dyn SystemProbe>) -> Self {
        Self {
            default_application: AppTheme::fallback(),
            application: AppTheme::default(),
            local: None,
            remote: AppTheme::default(),
            remote_background: TokenColor::Auto,
            mode: ThemeMode::App,
            night_variant: NightVariant::default(),
            palette: DerivedPalette::new(),
            broker: ChangeBroker::new(),
            storage,
            probe,
        }
    }

    // ========== Modes ==========

    pub fn theme_mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        debug!(?mode, "theme mode changed");
        self.mode = mode;
    }

    pub fn night_variant(&self) -> NightVariant {
        self.night_variant
    }

    pub fn set_night_variant(&mut self, variant: NightVariant) {
        debug!(?variant, "night variant changed");
        self.night_variant = variant;
    }

    // ========== Scopes ==========

    /// Installs the application scope: `default` holds the resolved
    /// baseline, `theme` an explicit override layered over it.
    pub fn set_application_theme(&mut self, default: AppTheme, theme: Option<AppTheme>) {
        debug!(explicit = theme.is_some(), "application theme updated");
        self.application = theme.unwrap_or_else(AppTheme::default);
        self.default_application = default;
    }

    /// Installs the local scope's theme; fails when no screen is
    /// attached.
    pub fn set_local_theme(
        &mut self,
        default: AppTheme,
        theme: Option<AppTheme>,
    ) -> Result<(), ThemeError> {
        let scope = self.local.as_mut().ok_or(ThemeError::NotAttached)?;
        debug!(
            screen = %scope.screen.name,
            explicit = theme.is_some(),
            "local theme updated"
        );
        scope.theme = theme.unwrap_or_else(AppTheme::default);
        scope.default = default;
        Ok(())
    }

    /// Installs the remote scope's theme directly.
    pub fn set_remote_theme(&mut self, theme: AppTheme) {
        debug!("remote theme updated");
        self.remote = theme;
    }

    /// Sets the remote scope's background override and recomputes the
    /// remote theme from the application scope.
    pub fn set_remote_background(&mut self, background: TokenColor) {
        self.remote_background = background;
        self.refresh_remote();
    }

    /// Recomputes the remote theme: the application scope's effective
    /// theme with the remote background override applied and its tint
    /// re-derived.
    pub fn refresh_remote(&mut self) {
        let mut remote = self.application.clone();
        if self.remote_background.is_concrete() {
            remote.background = self.remote_background;
            remote.tint_background = TokenColor::Auto;
        }
        debug!("remote theme recomputed from application scope");
        self.remote = remote;
    }

    /// Attaches a screen to the local scope.
    ///
    /// An already-attached screen is swapped out: its theme is saved
    /// and its listener removed first, exactly as an explicit
    /// `detach_local` would.
    pub fn attach(&mut self, screen: ScreenIdentity) -> Result<(), ThemeError> {
        if self.local.is_some() {
            self.detach_local()?;
        }
        debug!(screen = %screen.name, "local scope attached");
        self.local = Some(LocalScope {
            screen,
            default: AppTheme::fallback(),
            theme: AppTheme::default(),
        });
        Ok(())
    }

    /// Detaches the local scope, saving its theme first and removing
    /// the owning screen from the listener set. A no-op when nothing
    /// is attached.
    pub fn detach_local(&mut self) -> Result<(), ThemeError> {
        let Some(scope) = self.local.take() else {
            return Ok(());
        };
        debug!(screen = %scope.screen.name, "local scope detached");
        let encoded = encode_theme(&scope.theme)?;
        self.storage.save(
            STORAGE_NAMESPACE,
            &local_theme_key(&scope.screen.name),
            &encoded,
        );
        self.broker.remove_listener(scope.screen.listener);
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.local.is_some()
    }

    /// The attached screen's theme; fails fast before `attach`.
    pub fn local_theme(&self) -> Result<&AppTheme, ThemeError> {
        self.local
            .as_ref()
            .map(|scope| &scope.theme)
            .ok_or(ThemeError::NotAttached)
    }

    pub fn application_theme(&self) -> &AppTheme {
        &self.application
    }

    pub fn remote_theme(&self) -> &AppTheme {
        &self.remote
    }

    // ========== Resolution ==========

    /// The theme that wins right now: local if attached, application
    /// otherwise. The entire precedence policy.
    pub fn effective(&self) -> &AppTheme {
        match &self.local {
            Some(scope) => &scope.theme,
            None => &self.application,
        }
    }

    /// The defaults backing [`effective`](Self::effective).
    pub fn effective_default(&self) -> &AppTheme {
        match &self.local {
            Some(scope) => &scope.default,
            None => &self.default_application,
        }
    }

    /// Resolves the effective theme to concrete colors.
    pub fn resolved(&self) -> Result<ResolvedTheme, ThemeError> {
        self.effective().resolve(self.effective_default())
    }

    /// Resolves the remote theme against the application defaults.
    pub fn remote_resolved(&self) -> Result<ResolvedTheme, ThemeError> {
        self.remote.resolve(&self.default_application)
    }

    /// The concrete color for a role on the effective theme.
    pub fn resolve_role(&self, role: ColorRole) -> Result<Color, ThemeError> {
        Ok(self.resolved()?.color(role))
    }

    /// The default second argument for contrast computations: the
    /// effective theme's background.
    pub fn default_contrast_with(&self) -> Result<Color, ThemeError> {
        self.resolve_role(ColorRole::Background)
    }

    /// Substitutes the effective theme's flag for `Auto`; callers
    /// never see `Auto` back.
    pub fn resolve_background_aware(&self, flag: BackgroundAware) -> BackgroundAware {
        if flag != BackgroundAware::Auto {
            return flag;
        }
        let inherited = match self.effective().background_aware {
            BackgroundAware::Auto => self.effective_default().background_aware,
            explicit => explicit,
        };
        match inherited {
            BackgroundAware::Disable => BackgroundAware::Disable,
            BackgroundAware::Enable | BackgroundAware::Auto => BackgroundAware::Enable,
        }
    }

    /// A minimal theme seeded with the default background; the rest
    /// derives through per-role resolution.
    pub fn generate_default_theme(&self) -> AppTheme {
        AppTheme {
            background: self.effective_default().background,
            ..AppTheme::default()
        }
    }

    // ========== Night ==========

    /// Whether the night theme applies at `now`.
    pub fn is_night(&self, now: NaiveTime) -> bool {
        NightResolver::new(self.probe.as_ref()).resolve(self.mode, self.night_variant, now)
    }

    /// The next instant the day/night answer flips.
    pub fn next_transition(&self, now: NaiveDateTime) -> NaiveDateTime {
        let resolver = NightResolver::new(self.probe.as_ref());
        let is_night = resolver.resolve(self.mode, self.night_variant, now.time());
        resolver.next_transition(now, is_night)
    }

    // ========== Palette ==========

    pub fn palette(&self) -> &DerivedPalette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut DerivedPalette {
        &mut self.palette
    }

    /// Recomputes the derived palette from the effective theme.
    pub fn mutate_palette(&mut self) -> Result<(), ThemeError> {
        let theme = self.resolved()?;
        self.palette.mutate(&theme);
        Ok(())
    }

    // ========== Listeners ==========

    pub fn add_listener(&mut self, id: ListenerId, listener: Box<dyn DynamicListener>) -> bool {
        self.broker.add_listener(id, listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> Option<Box<dyn DynamicListener>> {
        self.broker.remove_listener(id)
    }

    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.broker.has_listener(id)
    }

    /// Fans a change out to every listener; see
    /// [`ChangeBroker::notify`].
    pub fn notify(&mut self, delta: &ChangeDelta) -> Result<(), ThemeError> {
        self.broker.notify(delta).map_err(ThemeError::from)
    }

    // ========== Persistence ==========

    /// Loads a screen's persisted local theme. A malformed stored
    /// value is discarded, not surfaced: the caller falls back to the
    /// wider scope.
    pub fn load_local_theme(&self, screen_name: &str) -> Option<AppTheme> {
        let stored = self
            .storage
            .load(STORAGE_NAMESPACE, &local_theme_key(screen_name))?;
        match decode_theme(&stored) {
            Ok(theme) => Some(theme),
            Err(error) => {
                debug!(screen = %screen_name, %error, "discarding malformed stored theme");
                None
            }
        }
    }

    /// Deletes a screen's persisted local theme.
    pub fn delete_local_theme(&mut self, screen_name: &str) {
        self.storage
            .delete(STORAGE_NAMESPACE, &local_theme_key(screen_name));
    }

    /// Remembers the most recent explicitly picked color.
    pub fn save_recent_color(&mut self, color: Color) {
        self.storage
            .save(STORAGE_NAMESPACE, RECENT_COLOR_KEY, &color.to_string());
    }

    pub fn recent_color(&self) -> Option<Color> {
        self.storage
            .load(STORAGE_NAMESPACE, RECENT_COLOR_KEY)?
            .parse()
            .ok()
    }

    /// Persists the theme-mode version, used by hosts to migrate
    /// stored themes across releases.
    pub fn save_theme_version(&mut self, version: u8) {
        self.storage
            .save(STORAGE_NAMESPACE, THEME_VERSION_KEY, &version.to_string());
    }

    pub fn theme_version(&self) -> Option<u8> {
        self.storage
            .load(STORAGE_NAMESPACE, THEME_VERSION_KEY)?
            .parse()
            .ok()
    }

    // ========== Lifecycle ==========

    /// Tears the engine down: the local scope is saved and detached,
    /// every listener is dropped and all scopes reset. A deliberate
    /// reset boundary, after which the engine is as freshly built.
    pub fn destroy(&mut self) -> Result<(), ThemeError> {
        self.detach_local()?;
        self.broker.clear();
        self.palette.clear();
        self.default_application = AppTheme::fallback();
        self.application = AppTheme::default();
        self.remote = AppTheme::default();
        self.remote_background = TokenColor::Auto;
        self.mode = ThemeMode::App;
        self.night_variant = NightVariant::default();
        debug!("engine destroyed");
        Ok(())
    }
}

fn local_theme_key(screen_name: &str) -> String {
    format!("{LOCAL_THEME_KEY_PREFIX}{screen_name}")
}

/// Encodes a theme for the storage seam.
pub fn encode_theme(theme: &AppTheme) -> Result<String, ThemeError> {
    Ok(serde_json::to_string(theme)?)
}

/// Decodes a theme from the storage seam.
pub fn decode_theme(encoded: &str) -> Result<AppTheme, ThemeError> {
    Ok(serde_json::from_str(encoded)?)
}
