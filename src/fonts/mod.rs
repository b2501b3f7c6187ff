//! Font availability and measurement.
//!
//! A [FontRegistry] knows every font a certificate may be drawn with. The
//! PDF base fonts are always present; custom fonts (typically a handwriting
//! face for patient values) are registered from files and may fail to load.
//! A failed registration is recorded, never raised: callers ask
//! [FontRegistry::resolve] for a font and receive the fallback they name when
//! the requested font isn't available.
//!
//! ```
//! use medcert::fonts::FontRegistry;
//! use medcert::Pt;
//! use std::collections::BTreeMap;
//!
//! let mut registry = FontRegistry::new();
//! let mut files = BTreeMap::new();
//! files.insert("Handwriting".to_string(), "/no/such/font.ttf".into());
//! let result = registry.register_fonts(&files);
//!
//! assert!(result.failed.contains_key("Handwriting"));
//! assert!(!registry.is_available("Handwriting"));
//!
//! let body = registry.resolve("Handwriting", "Helvetica");
//! assert_eq!(registry[body].name(), "Helvetica");
//! assert!(registry.width_of_text(body, "JORGE", Pt(12.0)) > Pt(0.0));
//! ```

mod builtin;
mod embedded;

pub use builtin::BuiltinFont;
pub use embedded::EmbeddedFont;

use crate::refs::{ObjectReferences, RefType};
use crate::{Error, Pt};
use id_arena::{Arena, Id};
use pdf_writer::{Name, Pdf, Ref};
use std::collections::BTreeMap;
use std::ops::Index;
use std::path::{Path, PathBuf};

/// A reference to a font held by a [FontRegistry]
pub type FontHandle = Id<RegisteredFont>;

/// The font program behind a registered name
#[derive(Debug)]
pub enum FontSource {
    Builtin(BuiltinFont),
    Embedded(EmbeddedFont),
}

/// A font known to the registry under a name
#[derive(Debug)]
pub struct RegisteredFont {
    name: String,
    source: FontSource,
}

impl RegisteredFont {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// Calculate the width of a given string of text given the font size
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        match &self.source {
            FontSource::Builtin(font) => font.width_of_text(text, size),
            FontSource::Embedded(font) => font.width_of_text(text, size),
        }
    }

    /// Encode text into the string operand this font expects in a content stream
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match &self.source {
            FontSource::Builtin(font) => font.encode(text),
            FontSource::Embedded(font) => font.encode(text),
        }
    }

    /// Write the font object(s), returning the reference for the page's font resources
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        match &self.source {
            FontSource::Builtin(font) => {
                let id = refs.gen(RefType::Font(font_index));
                writer
                    .type1_font(id)
                    .base_font(Name(font.base_font().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
                id
            }
            FontSource::Embedded(font) => font.write(refs, font_index, writer),
        }
    }
}

/// The outcome of a batch registration. Fonts that failed are listed with
/// the reason they failed; the registry itself is left usable either way.
#[derive(Debug, Default)]
pub struct RegistrationResult {
    pub registered: Vec<String>,
    pub failed: BTreeMap<String, String>,
}

impl RegistrationResult {
    pub fn all_registered(&self) -> bool {
        self.failed.is_empty()
    }
}

/// The set of fonts available to the compositor. Read-only once registration
/// is done, so a single registry can be shared by concurrent renders.
#[derive(Debug)]
pub struct FontRegistry {
    fonts: Arena<RegisteredFont>,
    by_name: BTreeMap<String, FontHandle>,
    last_resort: FontHandle,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    /// A registry holding only the PDF base fonts
    pub fn new() -> FontRegistry {
        let mut fonts = Arena::new();
        let mut by_name = BTreeMap::new();
        for font in BuiltinFont::ALL {
            let name = font.base_font().to_string();
            let id = fonts.alloc(RegisteredFont {
                name: name.clone(),
                source: FontSource::Builtin(font),
            });
            by_name.insert(name, id);
        }
        let last_resort = by_name[BuiltinFont::Helvetica.base_font()];
        FontRegistry {
            fonts,
            by_name,
            last_resort,
        }
    }

    fn insert(&mut self, name: String, source: FontSource) -> FontHandle {
        let id = self.fonts.alloc(RegisteredFont {
            name: name.clone(),
            source,
        });
        self.by_name.insert(name, id);
        id
    }

    /// Register a font from bytes already in memory. Re-registering a custom
    /// name replaces the earlier font for subsequent lookups.
    pub fn register_bytes<S: Into<String>>(
        &mut self,
        name: S,
        bytes: Vec<u8>,
    ) -> Result<FontHandle, Error> {
        let name = name.into();
        if BuiltinFont::from_name(&name).is_some() {
            return Err(Error::BuiltinShadowed(name));
        }
        let font = EmbeddedFont::load(bytes)?;
        Ok(self.insert(name, FontSource::Embedded(font)))
    }

    /// Register a font from a file on disk
    pub fn register_file<S: Into<String>, P: AsRef<Path>>(
        &mut self,
        name: S,
        path: P,
    ) -> Result<FontHandle, Error> {
        let bytes = std::fs::read(path)?;
        self.register_bytes(name, bytes)
    }

    /// Attempt to register every font in `font_files`. Each failure is logged
    /// and recorded in the result; no single failure stops the others.
    pub fn register_fonts(
        &mut self,
        font_files: &BTreeMap<String, PathBuf>,
    ) -> RegistrationResult {
        let mut result = RegistrationResult::default();
        for (name, path) in font_files {
            match self.register_file(name.as_str(), path) {
                Ok(_) => {
                    log::debug!("registered font `{}` from {}", name, path.display());
                    result.registered.push(name.clone());
                }
                Err(e) => {
                    log::warn!(
                        "font `{}` from {} is unavailable: {}",
                        name,
                        path.display(),
                        e
                    );
                    result.failed.insert(name.clone(), e.to_string());
                }
            }
        }
        result
    }

    pub fn is_available(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<FontHandle> {
        self.by_name.get(name).copied()
    }

    /// Look up `name`, falling back to `fallback` when it isn't registered.
    /// When neither is registered the result is Helvetica, which always is.
    pub fn resolve(&self, name: &str, fallback: &str) -> FontHandle {
        if let Some(handle) = self.get(name) {
            return handle;
        }
        log::debug!("font `{}` unavailable, falling back to `{}`", name, fallback);
        self.get(fallback).unwrap_or(self.last_resort)
    }

    /// Calculate the width of a given string of text given the font and font size
    pub fn width_of_text(&self, font: FontHandle, text: &str, size: Pt) -> Pt {
        self[font].width_of_text(text, size)
    }
}

impl Index<FontHandle> for FontRegistry {
    type Output = RegisteredFont;

    fn index(&self, handle: FontHandle) -> &RegisteredFont {
        &self.fonts[handle]
    }
}
