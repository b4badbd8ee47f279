//! Error types shared by the scanner, the manifest writer and the git gate

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building, loading or writing resource catalogs
#[derive(Error, Diagnostic, Debug)]
pub enum ResourceError {
    #[error("Resource directory not found: {}", path.display())]
    #[diagnostic(code(resguard::directory_not_found))]
    DirectoryNotFound { path: PathBuf },

    #[error("File not found: {}", path.display())]
    #[diagnostic(
        code(resguard::file_not_found),
        help("run `resguard generate` to create the manifest")
    )]
    FileNotFound { path: PathBuf },

    #[error("Failed to access {}", path.display())]
    #[diagnostic(code(resguard::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}", path.display())]
    #[diagnostic(code(resguard::xml))]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Malformed resource XML in {}: {message}", path.display())]
    #[diagnostic(code(resguard::malformed_xml))]
    MalformedXml { path: PathBuf, message: String },

    #[error("<{element}> at {}:{line} has no `{attribute}` attribute", path.display())]
    #[diagnostic(code(resguard::missing_attribute))]
    MissingAttribute {
        path: PathBuf,
        line: usize,
        element: String,
        attribute: &'static str,
    },

    #[error("Git error: {stdout}{stderr}")]
    #[diagnostic(code(resguard::git))]
    GitToolFailure { stdout: String, stderr: String },

    #[error("Failed to run git")]
    #[diagnostic(code(resguard::git), help("make sure git is installed and on PATH"))]
    GitSpawn {
        #[source]
        source: std::io::Error,
    },

    #[error("{variable} not defined: run envsetup.sh / lunch")]
    #[diagnostic(
        code(resguard::missing_environment),
        help("or pass --root with the path to the library")
    )]
    MissingEnvironment { variable: &'static str },

    #[error("Failed to render manifest: {message}")]
    #[diagnostic(code(resguard::render))]
    Render { message: String },
}

impl ResourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ResourceError> = std::result::Result<T, E>;
