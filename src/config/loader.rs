use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a library guarded by resguard
///
/// Paths are relative to the library root unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resource directory scanned for the public surface
    pub res_dir: PathBuf,

    /// Directory holding the committed manifest
    pub manifest_dir: PathBuf,

    /// File name of the committed manifest
    pub manifest_file: String,

    /// Substring of repository paths that belong to the library (git gate)
    pub library_marker: String,

    /// Library location below `$ANDROID_BUILD_TOP`
    pub library_path: PathBuf,

    /// Resource types always left out of comparisons
    pub exclude_types: Vec<String>,

    /// Overlayable file generation
    pub overlayable: OverlayableConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayableConfig {
    /// Generate the overlayable file alongside the manifest
    pub enabled: bool,

    /// Output path of the overlayable file
    pub path: PathBuf,

    /// Value of the `name` attribute of `<overlayable>`
    pub name: String,

    /// Extra `attr` resources base layouts need from RROs
    pub extra_attrs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            res_dir: PathBuf::from("res"),
            manifest_dir: PathBuf::from("tests/apitest"),
            manifest_file: "current.xml".to_string(),
            library_marker: "car-ui-lib".to_string(),
            library_path: PathBuf::from("packages/apps/Car/libs/car-ui-lib"),
            exclude_types: vec![],
            overlayable: OverlayableConfig::default(),
        }
    }
}

impl Default for OverlayableConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("res/values/overlayable.xml"),
            name: "CarUiLibOverlayableResources".to_string(),
            extra_attrs: [
                "layout_constraintGuide_begin",
                "layout_constraintGuide_end",
                "layout_constraintHorizontal_bias",
                "layout_constraintTop_toTopOf",
                "layout_constraintTop_toBottomOf",
                "layout_constraintBottom_toBottomOf",
                "layout_constraintBottom_toTopOf",
                "layout_constraintStart_toStartOf",
                "layout_constraintStart_toEndOf",
                "layout_constraintEnd_toEndOf",
                "layout_constraintEnd_toStartOf",
                "layout_constraintLeft_toLeftOf",
                "layout_constraintLeft_toRightOf",
                "layout_constraintRight_toRightOf",
                "layout_constraintRight_toLeftOf",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations in the library root
    pub fn from_default_locations(library_root: &Path) -> Result<Self> {
        let default_names = [
            ".resguard.yml",
            ".resguard.yaml",
            ".resguard.toml",
            "resguard.toml",
        ];

        for name in &default_names {
            let path = library_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Resource directory under the library root
    pub fn res_dir(&self, library_root: &Path) -> PathBuf {
        library_root.join(&self.res_dir)
    }

    /// Manifest path under the library root, optionally with another file name
    pub fn manifest_path(&self, library_root: &Path, file_name: Option<&str>) -> PathBuf {
        library_root
            .join(&self.manifest_dir)
            .join(file_name.unwrap_or(&self.manifest_file))
    }

    /// Overlayable output path under the library root
    pub fn overlayable_path(&self, library_root: &Path) -> PathBuf {
        library_root.join(&self.overlayable.path)
    }
}
