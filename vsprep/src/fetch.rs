use std::{fs, io::Write, path::PathBuf, time::Duration};

use miette::{IntoDiagnostic, WrapErr, miette};
use url::Url;

use crate::{
    archive::{self, ArchiveKind},
    manifest::{Dependency, Manifest},
};

/// Downloads whole resource into memory
pub trait Download {
    fn get(&self, url: &Url) -> miette::Result<Vec<u8>>;
}

/// HTTP(S) downloader. `file://` urls are read from local file system
pub struct Http {
    client: reqwest::blocking::Client,
}

/// What has been done with a single dependency
#[derive(Debug, Clone)]
pub struct Fetched {
    pub url: Url,
    pub destination: PathBuf,
    /// None means that downloaded file is not an archive supported so nothing extracted
    pub kind: Option<ArchiveKind>,
    pub bytes: usize,
    /// Temporary file the download was stored into. Already removed
    pub temp_path: PathBuf,
}

pub struct Fetcher<D: Download> {
    download: D,
}

impl Http {
    pub fn new() -> miette::Result<Self> {
        // No timeout at all, hung request blocks the whole run
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .into_diagnostic()?;
        Ok(Self { client })
    }
}

impl Download for Http {
    fn get(&self, url: &Url) -> miette::Result<Vec<u8>> {
        if url.scheme() == "file" {
            let path = url
                .to_file_path()
                .map_err(|()| miette!("Invalid file url: {url}"))?;
            return fs::read(&path).into_diagnostic();
        }

        let response = self
            .client
            .get(url.clone())
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .into_diagnostic()?;
        let body = response.bytes().into_diagnostic()?;
        Ok(body.to_vec())
    }
}

impl<D: Download> Fetcher<D> {
    pub fn new(download: D) -> Self {
        Self { download }
    }

    /// Downloads dependency archive into temporary file, extracts it into destination
    /// and removes temporary file.
    /// File that isn't a supported or readable archive is silently skipped
    pub fn fetch_one(&self, dependency: &Dependency) -> miette::Result<Fetched> {
        let destination = &dependency.destination;
        fs::create_dir_all(destination)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to create directory {}", destination.display()))?;

        let body = self
            .download
            .get(&dependency.url)
            .wrap_err_with(|| format!("Failed to download {}", dependency.url))?;

        let mut temp = tempfile::NamedTempFile::new().into_diagnostic()?;
        temp.write_all(&body)
            .and_then(|()| temp.flush())
            .into_diagnostic()
            .wrap_err("Failed to store downloaded file")?;
        let temp_path = temp.path().to_path_buf();

        let kind = ArchiveKind::detect(&temp_path)?.filter(|k| {
            let readable = archive::is_readable(&temp_path, *k);
            if !readable {
                log::debug!("{} has {k} signature but cannot be read", dependency.url);
            }
            readable
        });
        match kind {
            Some(k) => {
                log::debug!("{} is {k} archive", dependency.url);
                archive::extract(&temp_path, k, destination)?;
            }
            None => log::debug!("{} is not an archive supported. Skipped", dependency.url),
        }

        temp.close().into_diagnostic()?;

        Ok(Fetched {
            url: dependency.url.clone(),
            destination: destination.clone(),
            kind,
            bytes: body.len(),
            temp_path,
        })
    }

    /// Fetches all manifest dependencies one by one in manifest order.
    /// The first failure stops processing the rest
    pub fn fetch_all<F>(&self, manifest: &Manifest, mut on_fetched: F) -> miette::Result<Vec<Fetched>>
    where
        F: FnMut(&Fetched),
    {
        let mut result = Vec::with_capacity(manifest.len());
        for dependency in &manifest.dependencies {
            let fetched = self.fetch_one(dependency)?;
            on_fetched(&fetched);
            result.push(fetched);
        }
        Ok(result)
    }
}
