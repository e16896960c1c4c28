//! Fallback chains across locales.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::debug;

use crate::interpreter::{Bundle, ErrorKind, LoadError, LoadWarning, ResolveError};
use crate::types::Args;

/// Supplies FTL source text per locale and resource id.
pub trait ResourceLoader {
    /// Load one resource.
    ///
    /// Returns `Ok(None)` when the resource does not exist for `locale`,
    /// which is expected for partially translated locales.
    fn load(&self, locale: &str, resource_id: &str) -> Result<Option<String>, LoadError>;
}

/// Loads resources from `{root}/{locale}/{resource_id}`.
#[derive(Debug, Clone)]
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceLoader for FileLoader {
    fn load(&self, locale: &str, resource_id: &str) -> Result<Option<String>, LoadError> {
        let path = self.root.join(locale).join(resource_id);
        match fs::read_to_string(&path) {
            Ok(source) => Ok(Some(source)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LoadError::Io { path, source: e }),
        }
    }
}

/// Bundles in priority order; formatting returns the first result without
/// reference errors, or else the last bundle's result.
///
/// # Example
///
/// ```
/// use ftl::{Bundle, Localization};
///
/// let mut fr = Bundle::new("fr");
/// fr.add_source("hello = Bonjour\n").unwrap();
/// let mut en = Bundle::new("en");
/// en.add_source("hello = Hello\nbye = Goodbye\n").unwrap();
///
/// let localization = Localization::new(vec![fr, en]);
/// assert_eq!(localization.format("hello", None).0, "Bonjour");
/// assert_eq!(localization.format("bye", None).0, "Goodbye");
/// ```
#[derive(Debug, Default)]
pub struct Localization {
    bundles: Vec<Bundle>,
}

impl Localization {
    pub fn new(bundles: Vec<Bundle>) -> Self {
        Self { bundles }
    }

    /// Build one bundle per locale from every resource the loader has.
    ///
    /// Resources missing for a locale are reported as warnings. Locales are
    /// kept in the given order, including ones with no resources at all.
    pub fn from_loader(
        loader: &impl ResourceLoader,
        locales: &[&str],
        resource_ids: &[&str],
    ) -> Result<(Self, Vec<LoadWarning>), LoadError> {
        let mut bundles = Vec::with_capacity(locales.len());
        let mut warnings = Vec::new();

        for &locale in locales {
            let mut bundle = Bundle::new(locale);
            for &resource_id in resource_ids {
                match loader.load(locale, resource_id)? {
                    Some(source) => warnings.extend(bundle.add_source(&source)?),
                    None => warnings.push(LoadWarning::MissingResource {
                        locale: locale.to_string(),
                        resource_id: resource_id.to_string(),
                    }),
                }
            }
            bundles.push(bundle);
        }

        Ok((Self::new(bundles), warnings))
    }

    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    /// Format a message value with the first bundle that resolves it without
    /// a reference error.
    pub fn format(&self, id: &str, args: Option<&Args>) -> (String, Vec<ResolveError>) {
        self.format_with(id, None, args)
    }

    /// Format a message attribute, falling back like [`Localization::format`].
    pub fn format_attribute(
        &self,
        id: &str,
        attribute: &str,
        args: Option<&Args>,
    ) -> (String, Vec<ResolveError>) {
        self.format_with(id, Some(attribute), args)
    }

    fn format_with(
        &self,
        id: &str,
        attribute: Option<&str>,
        args: Option<&Args>,
    ) -> (String, Vec<ResolveError>) {
        let Some((last, rest)) = self.bundles.split_last() else {
            return (
                format!("{{{id}}}"),
                vec![ResolveError::MessageNotFound {
                    id: id.to_string(),
                    suggestions: Vec::new(),
                }],
            );
        };

        for bundle in rest {
            let (text, errors) = resolve(bundle, id, attribute, args);
            if !errors.iter().any(|error| error.kind() == ErrorKind::Reference) {
                return (text, errors);
            }
            debug!(
                "'{id}' has reference errors in '{}', trying next locale",
                bundle.locale()
            );
        }
        resolve(last, id, attribute, args)
    }
}

fn resolve(
    bundle: &Bundle,
    id: &str,
    attribute: Option<&str>,
    args: Option<&Args>,
) -> (String, Vec<ResolveError>) {
    match attribute {
        Some(attribute) => bundle.format_attribute(id, attribute, args),
        None => bundle.format(id, args),
    }
}
