use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use miette::{IntoDiagnostic, WrapErr};
use serde::{Deserialize, Serialize};
use url::Url;

/// Third party dependencies every Windows build needs. Destinations are relative to source tree root
const BUILTIN: [(&str, &str); 4] = [
    (
        "https://github.com/google/protobuf/releases/download/v2.6.1/protobuf-2.6.1.zip",
        "third_party",
    ),
    (
        "https://github.com/google/googletest/archive/release-1.7.0.zip",
        "third_party",
    ),
    ("https://zlib.net/fossils/zlib-1.2.8.tar.gz", "third_party"),
    (
        "https://downloads.sourceforge.net/project/wtl/WTL%209.0/WTL%209.0.4140%20Final/WTL%209.0.4140%20Final.zip",
        "third_party/wtl",
    ),
];

/// Single archive to download and the directory to extract it into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub url: Url,
    pub destination: PathBuf,
}

/// Ordered dependencies list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub dependencies: Vec<Dependency>,
}

impl Manifest {
    /// Compiled in dependencies table
    #[must_use]
    pub fn builtin() -> Self {
        let dependencies = BUILTIN
            .iter()
            .filter_map(|(url, destination)| {
                Url::parse(url).ok().map(|url| Dependency {
                    url,
                    destination: PathBuf::from(destination),
                })
            })
            .collect();
        Self { dependencies }
    }

    /// Reads JSON manifest like `{"dependencies":[{"url":"...","destination":"..."}]}`
    pub fn from_path<P: AsRef<Path>>(path: P) -> miette::Result<Manifest> {
        let file = File::open(&path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to open manifest {}", path.as_ref().display()))?;
        Manifest::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> miette::Result<Manifest> {
        serde_json::from_reader(reader)
            .into_diagnostic()
            .wrap_err("Invalid dependencies manifest")
    }

    /// Resolves relative destinations against root specified. Absolute ones are kept as is
    #[must_use]
    pub fn rooted(self, root: &Path) -> Self {
        let dependencies = self
            .dependencies
            .into_iter()
            .map(|d| Dependency {
                destination: root.join(d.destination),
                ..d
            })
            .collect();
        Self { dependencies }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}
