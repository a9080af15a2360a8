//! Site theme persistence.
//!
//! The light/dark preference lives behind two small seams so the view never
//! touches ambient browser state directly: a key/value [`SettingsStore`] and a
//! [`ThemeRoot`] that marks the document as dark. The browser implementations
//! are [`LocalStorage`] and [`DocumentRoot`]; [`MemoryStore`] backs tests.

use std::cell::RefCell;
use std::collections::HashMap;

use log::{debug, warn};

use crate::error::{AppError, js_message};
use crate::types::SiteTheme;

/// Storage key holding `"light"` or `"dark"`.
pub const SITE_THEME_KEY: &str = "siteTheme";

/// Class placed on the document root while the dark theme is active.
pub const DARK_CLASS: &str = "dark";

/// Durable string key/value storage.
pub trait SettingsStore {
	/// Stored value, `None` when missing or unreadable.
	fn get(&self, key: &str) -> Option<String>;
	/// Persists `value` under `key`.
	fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

/// Document-level dark mode switch.
pub trait ThemeRoot {
	/// Adds or removes the dark marker.
	fn set_dark(&self, dark: bool) -> Result<(), AppError>;
}

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
	fn storage() -> Result<web_sys::Storage, AppError> {
		web_sys::window()
			.and_then(|w| w.local_storage().ok().flatten())
			.ok_or(AppError::Browser("localStorage"))
	}
}

impl SettingsStore for LocalStorage {
	fn get(&self, key: &str) -> Option<String> {
		Self::storage().ok()?.get_item(key).ok().flatten()
	}

	fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
		Self::storage()?
			.set_item(key, value)
			.map_err(|e| {
				debug!("localStorage.setItem failed: {}", js_message(&e));
				AppError::Browser("localStorage")
			})
	}
}

/// The `<html>` element's class list.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentRoot;

impl ThemeRoot for DocumentRoot {
	fn set_dark(&self, dark: bool) -> Result<(), AppError> {
		let root = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.document_element())
			.ok_or(AppError::Browser("document root"))?;
		root.class_list()
			.toggle_with_force(DARK_CLASS, dark)
			.map(|_| ())
			.map_err(|_| AppError::Browser("classList"))
	}
}

/// In-memory [`SettingsStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
	values: RefCell<HashMap<String, String>>,
}

impl SettingsStore for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		self.values.borrow().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
		self.values
			.borrow_mut()
			.insert(key.to_string(), value.to_string());
		Ok(())
	}
}

/// Reads and applies the site theme through injected seams.
#[derive(Clone, Copy, Debug, Default)]
pub struct SiteThemeSettings<S, R> {
	store: S,
	root: R,
}

/// The browser-backed settings used by the app.
pub type BrowserSiteTheme = SiteThemeSettings<LocalStorage, DocumentRoot>;

impl<S: SettingsStore, R: ThemeRoot> SiteThemeSettings<S, R> {
	/// Settings over the given seams.
	pub fn new(store: S, root: R) -> Self {
		Self { store, root }
	}

	/// Stored preference; light when nothing (or garbage) is stored.
	pub fn load(&self) -> SiteTheme {
		self.store
			.get(SITE_THEME_KEY)
			.and_then(|v| v.parse().ok())
			.unwrap_or_default()
	}

	/// Marks the document and persists the choice.
	pub fn apply(&self, theme: SiteTheme) {
		if let Err(e) = self.root.set_dark(theme.is_dark()) {
			warn!("could not update document theme: {}", e);
		}
		match self.store.set(SITE_THEME_KEY, theme.as_str()) {
			Ok(()) => debug!("site theme saved: {}", theme),
			Err(e) => warn!("could not persist site theme: {}", e),
		}
	}

	/// The backing store.
	pub fn store(&self) -> &S {
		&self.store
	}

	/// The document root seam.
	pub fn root(&self) -> &R {
		&self.root
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[derive(Default)]
	struct FakeRoot {
		dark: Cell<Option<bool>>,
	}

	impl ThemeRoot for FakeRoot {
		fn set_dark(&self, dark: bool) -> Result<(), AppError> {
			self.dark.set(Some(dark));
			Ok(())
		}
	}

	struct BrokenStore;

	impl SettingsStore for BrokenStore {
		fn get(&self, _: &str) -> Option<String> {
			None
		}

		fn set(&self, _: &str, _: &str) -> Result<(), AppError> {
			Err(AppError::Browser("localStorage"))
		}
	}

	#[test]
	fn defaults_to_light() {
		let settings = SiteThemeSettings::new(MemoryStore::default(), FakeRoot::default());
		assert_eq!(settings.load(), SiteTheme::Light);

		settings.store().set(SITE_THEME_KEY, "sepia").unwrap();
		assert_eq!(settings.load(), SiteTheme::Light);
	}

	#[test]
	fn selecting_dark_persists_and_marks_root() {
		let settings = SiteThemeSettings::new(MemoryStore::default(), FakeRoot::default());
		settings.apply(SiteTheme::Dark);
		assert_eq!(settings.store().get(SITE_THEME_KEY).as_deref(), Some("dark"));
		assert_eq!(settings.root().dark.get(), Some(true));
		assert_eq!(settings.load(), SiteTheme::Dark);

		settings.apply(SiteTheme::Light);
		assert_eq!(settings.store().get(SITE_THEME_KEY).as_deref(), Some("light"));
		assert_eq!(settings.root().dark.get(), Some(false));
	}

	#[test]
	fn storage_failure_still_marks_root() {
		let settings = SiteThemeSettings::new(BrokenStore, FakeRoot::default());
		settings.apply(SiteTheme::Dark);
		assert_eq!(settings.root().dark.get(), Some(true));
		assert_eq!(settings.load(), SiteTheme::Light);
	}
}
