use crate::error::{Result, SsotError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// FieldSet
// ---------------------------------------------------------------------------

/// Fields the validator has always required.
pub const DEFAULT_FIELDS: &[&str] = &["title", "slug", "status", "last_updated", "tags", "summary"];

/// Fields listed by `_templates/FRONT_MATTER.md`. No `status`, adds `document_type`.
pub const TEMPLATE_FIELDS: &[&str] = &[
    "title",
    "slug",
    "summary",
    "document_type",
    "tags",
    "last_updated",
];

/// Named presets for the required field set. The two disagree on `status`
/// vs `document_type`; an explicit `required_fields` list overrides either.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSet {
    #[default]
    Default,
    Template,
}

impl FieldSet {
    pub fn fields(self) -> Vec<String> {
        let names = match self {
            FieldSet::Default => DEFAULT_FIELDS,
            FieldSet::Template => TEMPLATE_FIELDS,
        };
        names.iter().map(|s| s.to_string()).collect()
    }
}

impl FromStr for FieldSet {
    type Err = SsotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(FieldSet::Default),
            "template" => Ok(FieldSet::Template),
            other => Err(SsotError::UnknownFieldSet(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SiteConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rewrite {
    pub from: String,
    pub to: String,
}

impl Rewrite {
    fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// One page exposed from outside `docs/`: `source` is read relative to the
/// root and written to `target` under the site output directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub target: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rewrites: Vec<Rewrite>,
}

impl PageSpec {
    fn verbatim(path: &str) -> Self {
        Self {
            target: path.to_string(),
            source: path.to_string(),
            rewrites: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
    #[serde(default = "default_pages")]
    pub pages: Vec<PageSpec>,
}

fn default_out_dir() -> String {
    paths::SITE_OUT_DIR.to_string()
}

fn default_pages() -> Vec<PageSpec> {
    vec![
        PageSpec {
            target: "index.md".to_string(),
            source: paths::README_MD.to_string(),
            rewrites: vec![
                Rewrite::new("./docs/", ""),
                Rewrite::new("./_templates/", "_templates/"),
                Rewrite::new(
                    "./LICENSE",
                    "https://github.com/artificial-intelligence-first/ssot/blob/main/LICENSE",
                ),
            ],
        },
        PageSpec {
            target: paths::AGENTS_MD.to_string(),
            source: paths::AGENTS_MD.to_string(),
            rewrites: vec![Rewrite::new("./docs/", "")],
        },
        PageSpec::verbatim("_templates/TOPIC_TEMPLATE.md"),
        PageSpec::verbatim("_templates/SECTION_TEMPLATE.md"),
        PageSpec::verbatim("_templates/FRONT_MATTER.md"),
    ]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            pages: default_pages(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_set: Option<FieldSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_fields: Option<Vec<String>>,
    #[serde(default)]
    pub site: SiteConfig,
}

fn default_docs_dir() -> String {
    paths::DOCS_DIR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            field_set: None,
            required_fields: None,
            site: SiteConfig::default(),
        }
    }
}

impl Config {
    /// Load `ssot.yaml` from `root`. A missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Effective required field set: an explicit list beats a named preset.
    pub fn required_fields(&self) -> Vec<String> {
        match (&self.required_fields, self.field_set) {
            (Some(fields), _) => fields.clone(),
            (None, Some(set)) => set.fields(),
            (None, None) => FieldSet::Default.fields(),
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let fields = self.required_fields();

        if fields.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "required_fields is empty; every document would pass".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if paths::validate_field_name(field).is_err() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("invalid field name '{field}' in required_fields"),
                });
            }
            if !seen.insert(field.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("field '{field}' is listed more than once"),
                });
            }
        }

        if self.required_fields.is_some() && self.field_set.is_some() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "both field_set and required_fields are set; required_fields wins"
                    .to_string(),
            });
        }

        if Path::new(&self.docs_dir).is_absolute() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "docs_dir '{}' is absolute; checks will not be portable across checkouts",
                    self.docs_dir
                ),
            });
        }

        if self.site.pages.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "site.pages is empty; `ssot site` will stage nothing".to_string(),
            });
        }

        let mut targets = HashSet::new();
        for page in &self.site.pages {
            if !targets.insert(page.target.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "site target '{}' appears more than once; the last page wins",
                        page.target
                    ),
                });
            }
            if page.rewrites.iter().any(|r| r.from.is_empty()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "site page '{}' has a rewrite with an empty 'from'; it is ignored",
                        page.target
                    ),
                });
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
